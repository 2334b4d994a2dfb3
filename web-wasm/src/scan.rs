//! ブラウザのファイル選択と一括読み取りコントローラの接続

use leptos::prelude::*;
use qr_restyle_common::{BatchController, ControllerHandle, Error, Result, SourceFile};
use web_sys::FileList;

/// 選択されたファイル
pub struct WebFile(web_sys::File);

impl SourceFile for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    async fn read(&self) -> Result<Vec<u8>> {
        let file = gloo::file::File::from(self.0.clone());
        gloo::file::futures::read_as_bytes(&file)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
    }
}

pub fn files_from_list(list: &FileList) -> Vec<WebFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(WebFile)
        .collect()
}

/// シグナル経由のコントローラ更新（更新のたびに表示が再描画される）
#[derive(Clone, Copy)]
pub struct ControllerSignal(pub RwSignal<BatchController>);

impl ControllerHandle for ControllerSignal {
    fn with_mut<R>(&self, f: impl FnOnce(&mut BatchController) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
