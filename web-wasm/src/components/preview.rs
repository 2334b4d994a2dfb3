//! プレビューコンポーネント

use leptos::prelude::*;
use qr_restyle_common::Preview;

#[component]
pub fn PreviewImage(preview: ReadSignal<Option<Preview>>) -> impl IntoView {
    let is_dark = move || preview.with(|p| p.as_ref().map(|p| p.dark).unwrap_or(false));

    view! {
        <div class="preview" class:dark=is_dark>
            {move || preview.get().map(|p| view! { <img src=p.data_uri alt="preview" /> })}
        </div>
    }
}
