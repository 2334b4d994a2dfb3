//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("No QR code found in image")]
    NoQrCode,

    #[error("QR decode error: {0}")]
    Decode(String),

    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("SVG parse error: {0}")]
    Svg(#[from] roxmltree::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid style value: {0}")]
    InvalidStyle(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_no_qr_code() {
        let error = Error::NoQrCode;
        assert_eq!(format!("{}", error), "No QR code found in image");
    }

    #[test]
    fn test_error_display_invalid_style() {
        let error = Error::InvalidStyle("purple".to_string());
        assert_eq!(format!("{}", error), "Invalid style value: purple");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_svg() {
        let svg_error = roxmltree::Document::parse("<svg").unwrap_err();
        let error: Error = svg_error.into();
        assert!(matches!(error, Error::Svg(_)));
    }
}
