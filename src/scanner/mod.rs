use crate::error::{QrRestyleError, Result};
use qr_restyle_common::is_svg;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// フォルダ直下の1エントリ
#[derive(Debug)]
pub enum FolderEntry {
    File(EntryInfo),
    /// 列挙中に読めなかったエントリ（ファイルごとのエラーとして報告する）
    Unreadable {
        file_name: String,
        error: QrRestyleError,
    },
}

impl FolderEntry {
    pub fn file_name(&self) -> &str {
        match self {
            FolderEntry::File(info) => &info.file_name,
            FolderEntry::Unreadable { file_name, .. } => file_name,
        }
    }
}

/// 隠しファイル（先頭が `.`）か
fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}

/// 変換対象のエントリを列挙する
///
/// 直下のみ。変換済み（`.svg`）と隠しファイルは除外する。
/// 画像かどうかは読み込み時に判定するので、拡張子では絞り込まない。
pub fn scan_folder(folder: &Path) -> Result<Vec<FolderEntry>> {
    if !folder.exists() {
        return Err(QrRestyleError::FolderNotFound(folder.display().to_string()));
    }
    if !folder.is_dir() {
        return Err(QrRestyleError::NotADirectory(folder.display().to_string()));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let file_name = e
                    .path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| folder.display().to_string());
                warn!("unreadable entry {}: {}", file_name, e);
                entries.push(FolderEntry::Unreadable {
                    file_name,
                    error: e.into(),
                });
                continue;
            }
        };

        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_svg(&file_name) || is_hidden(&file_name) {
            continue;
        }

        entries.push(FolderEntry::File(EntryInfo {
            path: entry.path().to_path_buf(),
            file_name,
        }));
    }

    // ファイル名でソート
    entries.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    Ok(entries)
}
