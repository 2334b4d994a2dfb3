//! メインアプリケーションコンポーネント

use crate::components::{
    export_buttons::ExportButtons, header::Header, manual_entry::ManualEntry, preview::PreviewImage,
    result_table::ResultTable, style_panel::StylePanel, upload_area::UploadArea,
};
use crate::download::save_file;
use crate::scan::{files_from_list, ControllerSignal};
use crate::session_store::SessionStore;
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use qr_restyle_common::{
    export_all, export_one, run_batch, BatchController, Cutout, Preview, Result, ScanItem,
    SettingsSync, StyleSelection, Theme,
};
use web_sys::FileList;

fn show_preview(result: Result<Preview>, set_preview: WriteSignal<Option<Preview>>) {
    match result {
        Ok(p) => set_preview.set(Some(p)),
        Err(e) => console::error!(format!("プレビュー更新失敗: {}", e)),
    }
}

/// スタイル変更: 両方の値を保存してからプレビューを作り直す
fn apply_style_change(
    settings: StoredValue<SettingsSync<SessionStore>>,
    set_style: WriteSignal<StyleSelection>,
    set_preview: WriteSignal<Option<Preview>>,
    change: impl FnOnce(&mut SettingsSync<SessionStore>) -> Result<Preview>,
) {
    if let Some((result, current)) = settings.try_update_value(|s| (change(s), s.style())) {
        set_style.set(current);
        show_preview(result, set_preview);
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 読み取り結果（バッチごとに丸ごと置き換え）
    let controller = RwSignal::new(BatchController::new());

    // 起動時: 保存済みのスタイルを復元してプレビューを1回生成
    let settings = StoredValue::new(SettingsSync::load(SessionStore));
    let (style, set_style) = signal(settings.with_value(|s| s.style()));
    let (preview_image, set_preview) = signal(None::<Preview>);
    show_preview(settings.with_value(|s| s.preview()), set_preview);

    let on_theme = move |theme: Theme| {
        apply_style_change(settings, set_style, set_preview, |s| s.set_theme(theme));
    };
    let on_cutout = move |cutout: Cutout| {
        apply_style_change(settings, set_style, set_preview, |s| s.set_cutout(cutout));
    };

    // ファイル選択: 1件ずつ順番に読み取る
    let on_files_selected = move |list: FileList| {
        let files = files_from_list(&list);
        spawn_local(async move {
            let summary = run_batch(&ControllerSignal(controller), files).await;
            console::log!(format!(
                "読み取り完了: 成功 {} / 失敗 {} / 対象外 {}{}",
                summary.decoded,
                summary.failed,
                summary.skipped,
                if summary.abandoned { "（中断）" } else { "" }
            ));
        });
    };

    let on_manual_add = move |(file_name, payload): (String, String)| {
        controller.update(|c| c.add_manual(&file_name, &payload));
    };

    // 1件ダウンロード（エクスポート時点のスタイルで描き直す）
    let on_download_one = move |item: ScanItem| {
        let result = export_one(&item, &style.get_untracked())
            .map_err(|e| e.to_string())
            .and_then(|file| save_file(&file));
        if let Err(e) = result {
            console::error!(format!("ダウンロード失敗: {}", e));
        }
    };

    // 一括ダウンロード
    let on_download_all = move |_: ()| {
        let items = controller.with_untracked(|c| c.items().to_vec());
        let now = chrono::Local::now().fixed_offset();
        let result = export_all(&items, &style.get_untracked(), &now)
            .map_err(|e| e.to_string())
            .and_then(|file| save_file(&file));
        if let Err(e) = result {
            console::error!(format!("一括ダウンロード失敗: {}", e));
        }
    };

    let item_count = Signal::derive(move || controller.with(|c| c.items().len()));

    view! {
        <div class="container">
            <Header item_count=item_count />

            <div class="style-panel">
                <StylePanel style=style on_theme=on_theme on_cutout=on_cutout />
                <PreviewImage preview=preview_image />
            </div>

            <UploadArea on_files_selected=on_files_selected />

            <ManualEntry on_add=on_manual_add />

            <ExportButtons item_count=item_count on_download_all=on_download_all />

            <ResultTable controller=controller on_download=on_download_one />
        </div>
    }
}
