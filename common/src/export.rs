//! エクスポート（1件 / 一括ZIP）
//!
//! どちらもエクスポート時点のスタイル選択でSVGを描き直す。
//! 読み取り時の描画結果はキャッシュしない。

use crate::error::Result;
use crate::naming::{archive_name, to_svg_file_name};
use crate::render::render_svg;
use crate::types::{ScanItem, StyleSelection};
use chrono::{DateTime, FixedOffset};
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 保存するファイル1つ分
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub const SVG_MIME: &str = "image/svg+xml";
pub const ZIP_MIME: &str = "application/zip";

/// 1件分のSVGファイルを作る
pub fn export_one(item: &ScanItem, style: &StyleSelection) -> Result<ExportFile> {
    let svg = render_svg(&item.payload, style)?;
    Ok(ExportFile {
        file_name: to_svg_file_name(&item.file_name),
        mime_type: SVG_MIME,
        bytes: svg.into_bytes(),
    })
}

/// 全件をSVGに描き直してZIPにまとめる
pub fn export_all(
    items: &[ScanItem],
    style: &StyleSelection,
    now: &DateTime<FixedOffset>,
) -> Result<ExportFile> {
    let files = items
        .iter()
        .map(|item| export_one(item, style))
        .collect::<Result<Vec<_>>>()?;

    Ok(ExportFile {
        file_name: archive_name(now),
        mime_type: ZIP_MIME,
        bytes: build_archive(&files)?,
    })
}

/// ZIPアーカイブを作る（同名ファイルは後のものが優先）
pub fn build_archive(files: &[ExportFile]) -> Result<Vec<u8>> {
    let mut entries: Vec<&ExportFile> = Vec::with_capacity(files.len());
    for file in files {
        match entries.iter_mut().find(|e| e.file_name == file.file_name) {
            Some(existing) => *existing = file,
            None => entries.push(file),
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &entries {
        writer.start_file(entry.file_name.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
    }

    let bytes = writer.finish()?.into_inner();
    debug!(entries = entries.len(), bytes = bytes.len(), "archive built");
    Ok(bytes)
}
