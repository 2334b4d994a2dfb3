//! 手入力でのペイロード追加

use leptos::prelude::*;

#[component]
pub fn ManualEntry<F>(on_add: F) -> impl IntoView
where
    F: Fn((String, String)) + 'static + Clone + Send + Sync,
{
    let (file_name, set_file_name) = signal(String::new());
    let (payload, set_payload) = signal(String::new());

    let can_add = move || !payload.get().trim().is_empty();

    let on_click = move |_: leptos::ev::MouseEvent| {
        let text = payload.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        let name = match file_name.get_untracked().trim() {
            "" => "custom.png".to_string(),
            n => n.to_string(),
        };
        on_add((name, text));
        set_payload.set(String::new());
        set_file_name.set(String::new());
    };

    view! {
        <div class="manual-entry">
            <input
                type="text"
                placeholder="ファイル名"
                prop:value=move || file_name.get()
                on:input=move |ev| set_file_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="内容（URLなど）"
                prop:value=move || payload.get()
                on:input=move |ev| set_payload.set(event_target_value(&ev))
            />
            <button class="btn btn-primary btn-small" disabled=move || !can_add() on:click=on_click>
                "追加"
            </button>
        </div>
    }
}
