//! フォルダ一括変換
//!
//! 直下の各ファイルを順番に読み込み・デコードし、
//! 同じフォルダに `.svg` として書き出す。既存の出力は上書きしない。

use crate::error::Result;
use crate::scanner::{self, EntryInfo, FolderEntry};
use qr_restyle_common::{decode_bytes, render_plain_svg, to_svg_file_name};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// 1ファイル分の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { source: String, target: String },
    AlreadyConverted { target: String },
    ReadError { file: String, detail: String },
    WriteError { file: String, detail: String },
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Converted { source, target } => write!(f, "✓ {} → {}", source, target),
            FileOutcome::AlreadyConverted { target } => write!(f, "× Already converted: {}", target),
            FileOutcome::ReadError { file, detail } => {
                write!(f, "× Error reading: {} ({})", file, detail)
            }
            FileOutcome::WriteError { file, detail } => {
                write!(f, "× Error writing: {} ({})", file, detail)
            }
        }
    }
}

async fn read_payload(entry: &EntryInfo) -> Result<String> {
    let bytes = tokio::fs::read(&entry.path).await?;
    let payload = decode_bytes(&bytes)?;
    debug!(file = %entry.file_name, payload_len = payload.len(), "decoded");
    Ok(payload)
}

async fn write_svg(target_path: &Path, payload: &str) -> Result<()> {
    let svg = render_plain_svg(payload)?;
    tokio::fs::write(target_path, svg).await?;
    Ok(())
}

/// 1ファイルを変換する（失敗はすべて結果として返し、処理は止めない）
pub async fn convert_file(entry: &EntryInfo, folder: &Path) -> FileOutcome {
    let payload = match read_payload(entry).await {
        Ok(p) => p,
        Err(e) => {
            return FileOutcome::ReadError {
                file: entry.file_name.clone(),
                detail: e.to_string(),
            }
        }
    };

    let target = to_svg_file_name(&entry.file_name);
    let target_path = folder.join(&target);

    let written = match tokio::fs::try_exists(&target_path).await {
        Ok(true) => return FileOutcome::AlreadyConverted { target },
        Ok(false) => write_svg(&target_path, &payload).await,
        Err(e) => Err(e.into()),
    };

    match written {
        Ok(()) => FileOutcome::Converted {
            source: entry.file_name.clone(),
            target,
        },
        Err(e) => FileOutcome::WriteError {
            file: target,
            detail: e.to_string(),
        },
    }
}

/// 列挙したエントリを変換する（列挙時に読めなかったものは読み込みエラー）
pub async fn convert_entry(entry: &FolderEntry, folder: &Path) -> FileOutcome {
    match entry {
        FolderEntry::File(info) => convert_file(info, folder).await,
        FolderEntry::Unreadable { file_name, error } => FileOutcome::ReadError {
            file: file_name.clone(),
            detail: error.to_string(),
        },
    }
}

/// フォルダ内のファイルを1件ずつ順番に変換し、結果を逐次表示する
pub async fn convert_folder(folder: &Path) -> Result<Vec<FileOutcome>> {
    let entries = scanner::scan_folder(folder)?;
    let mut outcomes = Vec::with_capacity(entries.len());

    for entry in &entries {
        let outcome = convert_entry(entry, folder).await;
        if outcome.is_converted() {
            println!("{}", outcome);
        } else {
            eprintln!("{}", outcome);
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
