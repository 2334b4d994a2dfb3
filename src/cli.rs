use clap::Parser;
use std::path::PathBuf;

/// 引数なしのときに表示するメッセージ
pub const MISSING_DIRECTORY: &str = "× Please provide a directory path.";

#[derive(Parser, Debug)]
#[command(name = "qr-restyle")]
#[command(about = "フォルダ内のQRコード画像を読み取り、隣にSVGとして書き出す", long_about = None)]
pub struct Cli {
    /// 画像フォルダのパス
    ///
    /// 未指定時は clap の使用法エラーではなく独自メッセージで終了コード1にするため Option。
    pub folder: Option<PathBuf>,
}
