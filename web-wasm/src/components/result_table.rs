//! 読み取り結果テーブル
//!
//! 成功行の後に失敗行を並べる。コントローラが更新されるたびに全体を作り直す。

use leptos::prelude::*;
use qr_restyle_common::{BatchController, ScanItem};

#[component]
pub fn ResultTable<F>(controller: RwSignal<BatchController>, on_download: F) -> impl IntoView
where
    F: Fn(ScanItem) + 'static + Clone + Send + Sync,
{
    let item_rows = move || {
        controller
            .with(|c| c.items().to_vec())
            .into_iter()
            .map(|item| {
                let on_download = on_download.clone();
                let target = item.clone();
                view! {
                    <tr>
                        <td><img src=item.source_image_data alt="" /></td>
                        <td>{item.file_name}</td>
                        <td><a href=item.payload.clone() target="_blank">{item.payload.clone()}</a></td>
                        <td>
                            <button
                                class="btn btn-primary btn-small"
                                on:click=move |_| on_download(target.clone())
                            >
                                "SVG"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let error_rows = move || {
        controller
            .with(|c| c.errors().to_vec())
            .into_iter()
            .map(|err| {
                view! {
                    <tr class="error-row">
                        <td><img src=err.source_image_data alt="" /></td>
                        <td>{err.file_name}</td>
                        <td colspan="2">{err.error_detail}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <table class="result-table">
            <thead>
                <tr>
                    <th>"画像"</th>
                    <th>"ファイル名"</th>
                    <th>"内容"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {item_rows}
                {error_rows}
            </tbody>
        </table>
    }
}
