//! アップロードエリアコンポーネント

use leptos::prelude::*;
use web_sys::{FileList, HtmlInputElement};

#[component]
pub fn UploadArea<F>(on_files_selected: F) -> impl IntoView
where
    F: Fn(FileList) + 'static + Clone + Send + Sync,
{
    let (is_hovered, set_is_hovered) = signal(false);

    let on_change = move |ev: web_sys::Event| {
        set_is_hovered.set(false);
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            on_files_selected(files);
        }
    };

    view! {
        <div class="upload-area">
            <input
                type="file"
                accept="image/*"
                multiple=true
                class=move || if is_hovered.get() { "hovered" } else { "" }
                on:dragenter=move |_| set_is_hovered.set(true)
                on:dragleave=move |_| set_is_hovered.set(false)
                on:change=on_change
            />
            <p class="text-muted">"対応形式: JPEG, PNG, GIF"</p>
        </div>
    }
}
