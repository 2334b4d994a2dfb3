//! ブラウザでのファイル保存

use gloo::timers::callback::Timeout;
use qr_restyle_common::ExportFile;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Blob URL を解放するまでの猶予（クリック直後に解放すると保存が中断されるブラウザがある）
const REVOKE_DELAY_MS: u32 = 40_000;

/// Blob URL を作り、一時的な `<a download>` をクリックして保存させる
pub fn save_file(file: &ExportFile) -> Result<(), String> {
    let url = object_url(file)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "documentが取得できません".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "HtmlAnchorElementに変換できません".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor.click();

    schedule_revoke(url);
    Ok(())
}

fn object_url(file: &ExportFile) -> Result<String, String> {
    let array = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&array);

    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob作成失敗: {:?}", e))?;

    Url::create_object_url_with_blob(&blob).map_err(|e| format!("URL作成失敗: {:?}", e))
}

fn schedule_revoke(url: String) {
    Timeout::new(REVOKE_DELAY_MS, move || {
        let _ = Url::revoke_object_url(&url);
    })
    .forget();
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use qr_restyle_common::export::SVG_MIME;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;
    use web_sys::Response;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_object_url_readable_after_scheduling_revoke() {
        let file = ExportFile {
            file_name: "code.svg".into(),
            mime_type: SVG_MIME,
            bytes: b"<svg/>".to_vec(),
        };
        let url = object_url(&file).expect("URL作成失敗");
        schedule_revoke(url.clone());

        let window = web_sys::window().expect("windowなし");
        let response: Response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .expect("取得失敗")
            .dyn_into()
            .expect("Responseではない");
        assert!(response.ok());
    }
}
