//! スキャン結果とスタイル選択の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ScanItem: 読み取りに成功したファイル
//! - ScanError: 読み取りに失敗したファイル
//! - StyleSelection: テーマと中央カットアウトの組み合わせ

use serde::{Deserialize, Serialize};

/// 読み取り成功結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanItem {
    /// 元画像（data URL）
    pub source_image_data: String,
    pub file_name: String,
    /// QRコードに埋め込まれていたテキスト
    pub payload: String,
}

/// 読み取り失敗結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanError {
    pub source_image_data: String,
    pub file_name: String,
    pub error_detail: String,
}

/// 再描画テーマ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Black,
    White,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Black, Theme::White];

    /// ドット半径の縮小処理が必要なテーマか
    pub fn shrinks_dots(&self) -> bool {
        matches!(self, Theme::Black | Theme::White)
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "black" => Ok(Theme::Black),
            "white" => Ok(Theme::White),
            _ => Err(crate::Error::InvalidStyle(s.to_string())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Default => write!(f, "default"),
            Theme::Black => write!(f, "black"),
            Theme::White => write!(f, "white"),
        }
    }
}

/// 中央カットアウト画像
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cutout {
    #[default]
    None,
    VariantA,
    VariantB,
}

impl Cutout {
    pub const ALL: [Cutout; 3] = [Cutout::None, Cutout::VariantA, Cutout::VariantB];
}

impl std::str::FromStr for Cutout {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Cutout::None),
            "variant-a" | "varianta" | "a" => Ok(Cutout::VariantA),
            "variant-b" | "variantb" | "b" => Ok(Cutout::VariantB),
            _ => Err(crate::Error::InvalidStyle(s.to_string())),
        }
    }
}

impl std::fmt::Display for Cutout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cutout::None => write!(f, "none"),
            Cutout::VariantA => write!(f, "variant-a"),
            Cutout::VariantB => write!(f, "variant-b"),
        }
    }
}

/// スタイル選択（セッションストレージに2値で保存）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleSelection {
    pub theme: Theme,
    pub cutout: Cutout,
}

impl StyleSelection {
    pub fn new(theme: Theme, cutout: Cutout) -> Self {
        Self { theme, cutout }
    }
}
