//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(item_count: Signal<usize>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"QR Restyle"</h1>
            <span class="file-count">{move || format!("{} ファイル", item_count.get())}</span>
        </header>
    }
}
