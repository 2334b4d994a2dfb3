//! スタイル選択パネル（テーマ・カットアウト）

use leptos::prelude::*;
use qr_restyle_common::{Cutout, StyleSelection, Theme};

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Default => "標準",
        Theme::Black => "黒",
        Theme::White => "白",
    }
}

fn cutout_label(cutout: Cutout) -> &'static str {
    match cutout {
        Cutout::None => "なし",
        Cutout::VariantA => "ロゴA",
        Cutout::VariantB => "ロゴB",
    }
}

#[component]
pub fn StylePanel<T, C>(style: ReadSignal<StyleSelection>, on_theme: T, on_cutout: C) -> impl IntoView
where
    T: Fn(Theme) + 'static + Clone + Send + Sync,
    C: Fn(Cutout) + 'static + Clone + Send + Sync,
{
    let theme_options = Theme::ALL
        .into_iter()
        .map(|theme| {
            let on_theme = on_theme.clone();
            view! {
                <label>
                    <input
                        type="radio"
                        name="theme"
                        value=theme.to_string()
                        prop:checked=move || style.get().theme == theme
                        on:change=move |_| on_theme(theme)
                    />
                    {theme_label(theme)}
                </label>
            }
        })
        .collect_view();

    let cutout_options = Cutout::ALL
        .into_iter()
        .map(|cutout| {
            let on_cutout = on_cutout.clone();
            view! {
                <label>
                    <input
                        type="radio"
                        name="cutout"
                        value=cutout.to_string()
                        prop:checked=move || style.get().cutout == cutout
                        on:change=move |_| on_cutout(cutout)
                    />
                    {cutout_label(cutout)}
                </label>
            }
        })
        .collect_view();

    view! {
        <fieldset>
            <legend>"テーマ"</legend>
            {theme_options}
        </fieldset>
        <fieldset>
            <legend>"中央ロゴ"</legend>
            {cutout_options}
        </fieldset>
    }
}
