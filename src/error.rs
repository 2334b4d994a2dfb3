use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrRestyleError {
    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("フォルダではありません: {0}")]
    NotADirectory(String),

    /// ファイルごとのエラーとしてそのまま表示する
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Common(#[from] qr_restyle_common::Error),
}

pub type Result<T> = std::result::Result<T, QrRestyleError>;
