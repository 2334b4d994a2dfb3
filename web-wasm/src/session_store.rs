//! sessionStorage によるスタイル設定の保存
//!
//! 値はJSONにせず、そのままの文字列で保存する。

use qr_restyle_common::{Error, Result, SettingsStore};
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok()?
}

impl SettingsStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        session_storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage = session_storage()
            .ok_or_else(|| Error::Storage("sessionStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use qr_restyle_common::settings::THEME_KEY;
    use qr_restyle_common::{Cutout, SettingsSync, StyleSelection, Theme};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_session_store_roundtrip() {
        let mut sync = SettingsSync::load(SessionStore);
        sync.set_theme(Theme::White).expect("保存失敗");
        let changed = sync.set_cutout(Cutout::VariantA).expect("保存失敗");

        assert_eq!(SessionStore.get(THEME_KEY).as_deref(), Some("white"));
        let reloaded = SettingsSync::load(SessionStore);
        assert_eq!(reloaded.style(), StyleSelection::new(Theme::White, Cutout::VariantA));
        assert_eq!(reloaded.preview().expect("プレビュー生成失敗"), changed);
    }
}
