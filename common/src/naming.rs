//! ファイル名・拡張子・data URL のユーティリティ

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

/// スキャン対象の画像拡張子（大文字小文字は区別しない）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// 出力ベクター形式の拡張子
pub const SVG_EXTENSION: &str = "svg";

lazy_static! {
    static ref TRAILING_EXTENSION: Regex = Regex::new(r"(?i)\.[0-9a-z]+$").unwrap();
}

/// 拡張子を取り出す（最後の `.` 以降）
fn extension_of(file_name: &str) -> Option<&str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// スキャン対象の画像ファイル名か
pub fn is_accepted_image(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// すでにSVGへ変換済みのファイル名か
pub fn is_svg(file_name: &str) -> bool {
    file_name.ends_with(".svg")
}

/// 末尾の拡張子だけを `.svg` に置き換える
///
/// `a.b.png` → `a.b.svg`。拡張子が無い場合は `.svg` を付け足す。
pub fn to_svg_file_name(file_name: &str) -> String {
    if TRAILING_EXTENSION.is_match(file_name) {
        TRAILING_EXTENSION
            .replace(file_name, format!(".{}", SVG_EXTENSION))
            .into_owned()
    } else {
        format!("{}.{}", file_name, SVG_EXTENSION)
    }
}

/// 一括ダウンロード用のアーカイブ名
pub fn archive_name(now: &DateTime<FixedOffset>) -> String {
    format!("QRs {}.zip", now.format("%Y-%m-%dT%H:%M:%S%:z"))
}

/// 画像ファイル名からMIMEタイプを推定
pub fn image_mime(file_name: &str) -> &'static str {
    match extension_of(file_name).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// 画像バイト列を data URL に変換（結果テーブルのサムネイル用）
pub fn image_data_url(file_name: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", image_mime(file_name), STANDARD.encode(bytes))
}

/// SVG文字列を data URI に変換（プレビュー表示用）
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}
