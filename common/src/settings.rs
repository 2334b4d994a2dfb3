//! スタイル設定の保存・復元とプレビュー生成
//!
//! テーマとカットアウトはそれぞれ独立した文字列として
//! セッションストレージ（テストではメモリ）に保存する。

use crate::error::Result;
use crate::naming::svg_data_uri;
use crate::render::render_svg;
use crate::types::{Cutout, StyleSelection, Theme};
use tracing::warn;

pub const THEME_KEY: &str = "qr-restyle.theme";
pub const CUTOUT_KEY: &str = "qr-restyle.cutout";

/// プレビューに使う固定ペイロード
pub const PREVIEW_PAYLOAD: &str = "https://example.com";

/// キー・値ストア
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// 両方の選択値を保存する
pub fn persist<S: SettingsStore>(store: &mut S, style: &StyleSelection) -> Result<()> {
    store.set(THEME_KEY, &style.theme.to_string())?;
    store.set(CUTOUT_KEY, &style.cutout.to_string())?;
    Ok(())
}

/// 保存値で `current` を上書きして返す（未保存・不正な値は無視）
pub fn restore<S: SettingsStore>(store: &S, current: StyleSelection) -> StyleSelection {
    let mut style = current;
    if let Some(value) = store.get(THEME_KEY) {
        match value.parse::<Theme>() {
            Ok(theme) => style.theme = theme,
            Err(e) => warn!("ignoring stored theme: {}", e),
        }
    }
    if let Some(value) = store.get(CUTOUT_KEY) {
        match value.parse::<Cutout>() {
            Ok(cutout) => style.cutout = cutout,
            Err(e) => warn!("ignoring stored cutout: {}", e),
        }
    }
    style
}

/// プレビュー画像
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub svg: String,
    /// `<img src>` 用
    pub data_uri: String,
    /// 白テーマのとき暗い背景で表示する
    pub dark: bool,
}

pub fn preview(style: &StyleSelection) -> Result<Preview> {
    let svg = render_svg(PREVIEW_PAYLOAD, style)?;
    Ok(Preview {
        data_uri: svg_data_uri(&svg),
        svg,
        dark: style.theme == Theme::White,
    })
}

/// 設定の同期（変更時は保存してプレビュー再生成、起動時は復元してプレビュー生成）
#[derive(Debug, Clone)]
pub struct SettingsSync<S> {
    store: S,
    style: StyleSelection,
}

impl<S: SettingsStore> SettingsSync<S> {
    /// 保存値を復元する（未保存なら既定値）
    pub fn load(store: S) -> Self {
        let style = restore(&store, StyleSelection::default());
        Self { store, style }
    }

    pub fn style(&self) -> StyleSelection {
        self.style
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// 現在のスタイルのプレビュー
    pub fn preview(&self) -> Result<Preview> {
        preview(&self.style)
    }

    /// スタイル変更：両方の値を保存してからプレビューを作り直す
    pub fn change(&mut self, style: StyleSelection) -> Result<Preview> {
        self.style = style;
        persist(&mut self.store, &style)?;
        preview(&style)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Preview> {
        self.change(StyleSelection { theme, ..self.style })
    }

    pub fn set_cutout(&mut self, cutout: Cutout) -> Result<Preview> {
        self.change(StyleSelection { cutout, ..self.style })
    }
}
