//! エクスポートボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn ExportButtons<F>(item_count: Signal<usize>, on_download_all: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="export-buttons">
            <button
                class="btn btn-primary"
                disabled=move || item_count.get() == 0
                on:click=move |_| on_download_all(())
            >
                "すべてダウンロード (ZIP)"
            </button>
        </div>
    }
}
