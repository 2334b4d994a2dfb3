//! QRコードの再描画（スタイル付きSVG）
//!
//! - `render_svg`: スタイル選択に従った描画（Web版のエクスポート・プレビュー）
//! - `render_plain_svg`: スタイルなしの既定描画（CLI版）

mod fit;
pub mod postprocess;
pub mod style;
mod svg;

pub use postprocess::{scale_circles, DOT_SCALE, XML_DECLARATION};
pub use style::{config_for, CornerShape, DotShape, ErrorCorrection, RenderConfig, StyleOverlay};

use crate::error::Result;
use crate::types::StyleSelection;
use qrcode::QrCode;
use tracing::debug;

/// 描画設定どおりにSVGを生成する（後処理・XML宣言なし）
pub fn render_with_config(payload: &str, config: &RenderConfig) -> Result<String> {
    let code = fit::encode(payload, config)?;
    Ok(svg::write_svg(&code, config))
}

/// スタイル選択に従ってSVG文書を生成する
///
/// black/white テーマでは生成後にドット半径を `DOT_SCALE` 倍に縮める。
/// 同じ入力に対して常に同一のバイト列を返す。
pub fn render_svg(payload: &str, selection: &StyleSelection) -> Result<String> {
    let config = config_for(selection);
    let raw = render_with_config(payload, &config)?;
    debug!(theme = %selection.theme, cutout = %selection.cutout, bytes = raw.len(), "rendered QR");

    if selection.theme.shrinks_dots() {
        scale_circles(&raw, DOT_SCALE)
    } else {
        Ok(format!("{}{}", XML_DECLARATION, raw))
    }
}

/// スタイルなしの既定SVG
pub fn render_plain_svg(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes())?;
    Ok(code
        .render::<qrcode::render::svg::Color>()
        .min_dimensions(200, 200)
        .build())
}
