//! 一括読み取りコントローラ
//!
//! 選択されたファイルを1件ずつ順番に読み込み・デコードし、
//! 成功リスト（ScanItem）と失敗リスト（ScanError）に振り分ける。
//! 新しいバッチを開始すると両リストはまとめて置き換えられ、
//! 古いバッチのループは世代トークンの不一致で打ち切られる。

use crate::decode::decode_bytes;
use crate::error::Result;
use crate::naming::{image_data_url, is_accepted_image};
use crate::types::{ScanError, ScanItem};
use std::cell::RefCell;
use std::future::Future;
use tracing::debug;

/// バッチの世代
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchToken(u64);

/// 読み取り結果の保持者
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchController {
    items: Vec<ScanItem>,
    errors: Vec<ScanError>,
    generation: u64,
}

impl BatchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいバッチを開始（両リストをクリアし世代を進める）
    pub fn begin_batch(&mut self) -> BatchToken {
        self.items.clear();
        self.errors.clear();
        self.generation += 1;
        BatchToken(self.generation)
    }

    pub fn is_current(&self, token: BatchToken) -> bool {
        token.0 == self.generation
    }

    pub fn items(&self) -> &[ScanItem] {
        &self.items
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.errors.is_empty()
    }

    /// 1ファイル分の結果を記録する
    ///
    /// トークンが古い場合は何も記録せず `false` を返す。
    pub fn record(
        &mut self,
        token: BatchToken,
        file_name: &str,
        source_image_data: String,
        outcome: Result<String>,
    ) -> bool {
        if !self.is_current(token) {
            return false;
        }

        match outcome {
            Ok(payload) => self.items.push(ScanItem {
                source_image_data,
                file_name: file_name.to_string(),
                payload,
            }),
            Err(e) => self.errors.push(ScanError {
                source_image_data,
                file_name: file_name.to_string(),
                error_detail: e.to_string(),
            }),
        }
        true
    }

    /// 手入力のペイロードを成功リストに追加する
    pub fn add_manual(&mut self, file_name: &str, payload: &str) {
        self.items.push(ScanItem {
            source_image_data: String::new(),
            file_name: file_name.to_string(),
            payload: payload.to_string(),
        });
    }
}

/// コントローラへの可変アクセス手段
///
/// Web版ではシグナル、テストでは `RefCell` が実装する。
/// コントローラが破棄済みなら `None` を返し、実行中のバッチは打ち切られる。
pub trait ControllerHandle {
    fn with_mut<R>(&self, f: impl FnOnce(&mut BatchController) -> R) -> Option<R>;
}

impl ControllerHandle for RefCell<BatchController> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut BatchController) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// 読み込み元ファイル
pub trait SourceFile {
    fn name(&self) -> String;
    fn read(&self) -> impl Future<Output = Result<Vec<u8>>>;
}

/// バッチ処理の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub decoded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// 新しいバッチに置き換えられて途中で打ち切られた
    pub abandoned: bool,
}

/// ファイルを1件ずつ順番に処理する
///
/// 対象外の拡張子は記録せずに読み飛ばす。1件記録するたびに
/// `handle` 経由でコントローラが更新されるので、表示は逐次反映される。
pub async fn run_batch<H, S>(handle: &H, files: Vec<S>) -> BatchSummary
where
    H: ControllerHandle,
    S: SourceFile,
{
    let mut summary = BatchSummary::default();
    let Some(token) = handle.with_mut(|c| c.begin_batch()) else {
        summary.abandoned = true;
        return summary;
    };

    for file in files {
        let name = file.name();
        if !is_accepted_image(&name) {
            debug!(file = %name, "skipped: not an image");
            summary.skipped += 1;
            continue;
        }

        let (source, outcome) = match file.read().await {
            Ok(bytes) => (image_data_url(&name, &bytes), decode_bytes(&bytes)),
            Err(e) => (String::new(), Err(e)),
        };
        let ok = outcome.is_ok();

        let recorded = handle.with_mut(|c| c.record(token, &name, source, outcome));
        if recorded != Some(true) {
            debug!(file = %name, "batch superseded, abandoning");
            summary.abandoned = true;
            break;
        }

        if ok {
            summary.decoded += 1;
        } else {
            summary.failed += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::tests::qr_png;
    use crate::error::Error;
    use futures::executor::block_on;

    struct MemFile {
        name: String,
        bytes: Option<Vec<u8>>,
    }

    impl MemFile {
        fn new(name: &str, bytes: Vec<u8>) -> Self {
            Self { name: name.to_string(), bytes: Some(bytes) }
        }

        fn unreadable(name: &str) -> Self {
            Self { name: name.to_string(), bytes: None }
        }
    }

    impl SourceFile for MemFile {
        fn name(&self) -> String {
            self.name.clone()
        }

        async fn read(&self) -> Result<Vec<u8>> {
            self.bytes
                .clone()
                .ok_or_else(|| Error::Io(std::io::Error::other("read failed")))
        }
    }

    #[test]
    fn test_run_batch_sorts_items_and_errors() {
        let controller = RefCell::new(BatchController::new());
        let files = vec![
            MemFile::new("code1.png", qr_png("hello")),
            MemFile::new("code2.jpg", b"garbage".to_vec()),
            MemFile::new("code3.PNG", qr_png("world")),
        ];

        let summary = block_on(run_batch(&controller, files));
        assert_eq!(summary.decoded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.abandoned);

        let c = controller.borrow();
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.items()[0].file_name, "code1.png");
        assert_eq!(c.items()[0].payload, "hello");
        assert!(c.items()[0].source_image_data.starts_with("data:image/png;base64,"));
        assert_eq!(c.items()[1].payload, "world");
        assert_eq!(c.errors().len(), 1);
        assert_eq!(c.errors()[0].file_name, "code2.jpg");
        assert!(!c.errors()[0].error_detail.is_empty());
    }

    #[test]
    fn test_run_batch_skips_unaccepted_extensions() {
        let controller = RefCell::new(BatchController::new());
        let files = vec![
            MemFile::new("notes.txt", b"hello".to_vec()),
            MemFile::new("vector.svg", b"<svg/>".to_vec()),
            MemFile::new("noext", qr_png("hidden")),
        ];

        let summary = block_on(run_batch(&controller, files));
        assert_eq!(summary.skipped, 3);
        assert!(controller.borrow().is_empty());
    }

    #[test]
    fn test_run_batch_read_failure_is_recorded() {
        let controller = RefCell::new(BatchController::new());
        let summary = block_on(run_batch(&controller, vec![MemFile::unreadable("broken.gif")]));
        assert_eq!(summary.failed, 1);
        let c = controller.borrow();
        assert_eq!(c.errors()[0].file_name, "broken.gif");
        assert!(c.errors()[0].source_image_data.is_empty());
    }

    #[test]
    fn test_new_batch_replaces_lists() {
        let controller = RefCell::new(BatchController::new());
        block_on(run_batch(&controller, vec![MemFile::new("a.png", qr_png("first"))]));
        block_on(run_batch(&controller, vec![MemFile::new("b.png", b"bad".to_vec())]));

        let c = controller.borrow();
        assert!(c.items().is_empty());
        assert_eq!(c.errors().len(), 1);
        assert_eq!(c.errors()[0].file_name, "b.png");
    }

    #[test]
    fn test_stale_token_is_rejected() {
        let mut controller = BatchController::new();
        let old = controller.begin_batch();
        let new = controller.begin_batch();

        assert!(!controller.record(old, "a.png", String::new(), Ok("x".into())));
        assert!(controller.is_empty());
        assert!(controller.record(new, "b.png", String::new(), Ok("y".into())));
        assert_eq!(controller.items().len(), 1);
    }

    /// 読み込み中に別のバッチが始まった場合、古いループは打ち切られる
    #[test]
    fn test_superseded_batch_is_abandoned() {
        struct Interrupting<'a> {
            inner: MemFile,
            controller: &'a RefCell<BatchController>,
        }

        impl SourceFile for Interrupting<'_> {
            fn name(&self) -> String {
                self.inner.name()
            }

            async fn read(&self) -> Result<Vec<u8>> {
                self.controller.borrow_mut().begin_batch();
                self.inner.read().await
            }
        }

        let controller = RefCell::new(BatchController::new());
        let files = vec![
            Interrupting { inner: MemFile::new("a.png", qr_png("a")), controller: &controller },
            Interrupting { inner: MemFile::new("b.png", qr_png("b")), controller: &controller },
        ];

        let summary = block_on(run_batch(&controller, files));
        assert!(summary.abandoned);
        assert_eq!(summary.decoded, 0);
        assert!(controller.borrow().is_empty());
    }

    /// コントローラが途中で破棄された場合も打ち切りとして扱う
    #[test]
    fn test_disposed_controller_abandons_batch() {
        struct Disposable {
            controller: RefCell<BatchController>,
            remaining: std::cell::Cell<usize>,
        }

        impl ControllerHandle for Disposable {
            fn with_mut<R>(&self, f: impl FnOnce(&mut BatchController) -> R) -> Option<R> {
                let left = self.remaining.get();
                if left == 0 {
                    return None;
                }
                self.remaining.set(left - 1);
                Some(f(&mut self.controller.borrow_mut()))
            }
        }

        // begin_batch と1件目の記録まで生きている
        let handle = Disposable {
            controller: RefCell::new(BatchController::new()),
            remaining: std::cell::Cell::new(2),
        };
        let files = vec![
            MemFile::new("a.png", qr_png("a")),
            MemFile::new("b.png", qr_png("b")),
            MemFile::new("c.png", qr_png("c")),
        ];

        let summary = block_on(run_batch(&handle, files));
        assert!(summary.abandoned);
        assert_eq!(summary.decoded, 1);
        assert_eq!(handle.controller.borrow().items().len(), 1);

        let gone = Disposable {
            controller: RefCell::new(BatchController::new()),
            remaining: std::cell::Cell::new(0),
        };
        let summary = block_on(run_batch(&gone, vec![MemFile::new("a.png", qr_png("a"))]));
        assert!(summary.abandoned);
        assert_eq!(summary.decoded, 0);
    }

    #[test]
    fn test_add_manual() {
        let mut controller = BatchController::new();
        controller.add_manual("manual.png", "typed payload");
        assert_eq!(controller.items()[0].payload, "typed payload");
        assert!(controller.errors().is_empty());
    }
}
