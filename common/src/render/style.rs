//! 描画設定とテーマ別オーバーレイ
//!
//! 基本設定 (`RenderConfig::default`) にテーマごとの差分
//! (`StyleOverlay`) を重ねて最終的な描画設定を作る。

use crate::types::{Cutout, StyleSelection, Theme};
use serde::{Deserialize, Serialize};

/// データモジュールの形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotShape {
    Square,
    Rounded,
    /// 円（`<circle>`）
    Dots,
}

/// 位置検出パターン（外枠・中心）の形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerShape {
    Square,
    ExtraRounded,
    Dot,
}

/// 誤り訂正レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// 描画設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// 1モジュールあたりのピクセル数
    pub module_size: u32,
    /// クワイエットゾーン（モジュール数）
    pub margin: u32,
    pub error_correction: ErrorCorrection,
    pub dot_shape: DotShape,
    pub dot_color: String,
    pub corner_square_shape: CornerShape,
    pub corner_square_color: String,
    pub corner_dot_shape: CornerShape,
    pub corner_dot_color: String,
    /// `None` は透明背景
    pub background: Option<String>,
    pub cutout: Cutout,
    /// カットアウト画像の一辺（シンボル幅に対する比率）
    pub image_size: f64,
    /// カットアウト周囲の余白（モジュール数）
    pub image_margin: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            margin: 2,
            error_correction: ErrorCorrection::Q,
            dot_shape: DotShape::Dots,
            dot_color: "#1f2937".into(),
            corner_square_shape: CornerShape::ExtraRounded,
            corner_square_color: "#1f2937".into(),
            corner_dot_shape: CornerShape::Dot,
            corner_dot_color: "#1f2937".into(),
            background: Some("#ffffff".into()),
            cutout: Cutout::None,
            image_size: 0.3,
            image_margin: 1,
        }
    }
}

/// 基本設定に上書きする差分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverlay {
    pub error_correction: Option<ErrorCorrection>,
    pub dot_shape: Option<DotShape>,
    pub dot_color: Option<String>,
    pub corner_square_shape: Option<CornerShape>,
    pub corner_square_color: Option<String>,
    pub corner_dot_shape: Option<CornerShape>,
    pub corner_dot_color: Option<String>,
    /// `Some(None)` で背景を透明にする
    pub background: Option<Option<String>>,
    pub cutout: Option<Cutout>,
}

impl RenderConfig {
    /// 差分を重ねた新しい設定を返す（未指定の項目は元の値を維持）
    pub fn merged(&self, overlay: &StyleOverlay) -> Self {
        let mut config = self.clone();
        if let Some(level) = overlay.error_correction {
            config.error_correction = level;
        }
        if let Some(shape) = overlay.dot_shape {
            config.dot_shape = shape;
        }
        if let Some(color) = &overlay.dot_color {
            config.dot_color = color.clone();
        }
        if let Some(shape) = overlay.corner_square_shape {
            config.corner_square_shape = shape;
        }
        if let Some(color) = &overlay.corner_square_color {
            config.corner_square_color = color.clone();
        }
        if let Some(shape) = overlay.corner_dot_shape {
            config.corner_dot_shape = shape;
        }
        if let Some(color) = &overlay.corner_dot_color {
            config.corner_dot_color = color.clone();
        }
        if let Some(background) = &overlay.background {
            config.background = background.clone();
        }
        if let Some(cutout) = overlay.cutout {
            config.cutout = cutout;
        }
        config
    }
}

/// テーマごとの差分
pub fn theme_overlay(theme: Theme) -> StyleOverlay {
    match theme {
        Theme::Default => StyleOverlay::default(),
        Theme::Black => square_corners("#000000", Some("#ffffff".into())),
        Theme::White => square_corners("#ffffff", None),
    }
}

fn square_corners(color: &str, background: Option<String>) -> StyleOverlay {
    StyleOverlay {
        dot_color: Some(color.into()),
        corner_square_shape: Some(CornerShape::Square),
        corner_square_color: Some(color.into()),
        corner_dot_shape: Some(CornerShape::Square),
        corner_dot_color: Some(color.into()),
        background: Some(background),
        ..Default::default()
    }
}

/// カットアウトの差分（画像で隠れる分、誤り訂正を最大にする）
pub fn cutout_overlay(cutout: Cutout) -> StyleOverlay {
    match cutout {
        Cutout::None => StyleOverlay::default(),
        _ => StyleOverlay {
            error_correction: Some(ErrorCorrection::H),
            cutout: Some(cutout),
            ..Default::default()
        },
    }
}

/// スタイル選択から最終的な描画設定を作る
pub fn config_for(selection: &StyleSelection) -> RenderConfig {
    RenderConfig::default()
        .merged(&theme_overlay(selection.theme))
        .merged(&cutout_overlay(selection.cutout))
}
