//! 画像からQRコードのペイロードを読み取る

use crate::error::{Error, Result};
use image::DynamicImage;
use tracing::debug;

/// 画像バイト列を読み込み、最初に見つかったQRコードの内容を返す
pub fn decode_bytes(bytes: &[u8]) -> Result<String> {
    let image = image::load_from_memory(bytes)?;
    decode_image(&image)
}

/// 読み込み済み画像からQRコードの内容を返す
pub fn decode_image(image: &DynamicImage) -> Result<String> {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    debug!(width, height, grids = grids.len(), "QR grids detected");

    let mut last_error = None;
    for grid in grids {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    Err(match last_error {
        Some(detail) => Error::Decode(detail),
        None => Error::NoQrCode,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma, RgbaImage};
    use resvg::{tiny_skia, usvg};
    use qrcode::{Color, QrCode};
    use std::io::Cursor;

    /// テスト用にQRコード画像（PNG）を生成する
    pub(crate) fn qr_png(payload: &str) -> Vec<u8> {
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let width = code.width() as u32;
        let (scale, quiet) = (8u32, 4u32);
        let size = (width + quiet * 2) * scale;
        let colors = code.to_colors();

        let image = GrayImage::from_fn(size, size, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            if mx < quiet || my < quiet || mx >= width + quiet || my >= width + quiet {
                return Luma([255]);
            }
            match colors[((my - quiet) * width + (mx - quiet)) as usize] {
                Color::Dark => Luma([0]),
                Color::Light => Luma([255]),
            }
        });

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// SVG文書をラスタライズして読み取る
    ///
    /// `light_on_dark` は透明背景に明るい色で描いたシンボル用で、
    /// 黒地に合成してから明暗を反転する。
    pub(crate) fn decode_svg(svg: &str, light_on_dark: bool) -> Result<String> {
        let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap();
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).unwrap();
        pixmap.fill(if light_on_dark {
            tiny_skia::Color::BLACK
        } else {
            tiny_skia::Color::WHITE
        });
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let rgba = RgbaImage::from_raw(size.width(), size.height(), pixmap.take()).unwrap();
        let mut image = DynamicImage::ImageRgba8(rgba);
        if light_on_dark {
            image.invert();
        }
        decode_image(&image)
    }

    #[test]
    fn test_decode_generated_code() {
        let png = qr_png("hello");
        assert_eq!(decode_bytes(&png).unwrap(), "hello");
    }

    #[test]
    fn test_decode_url_payload() {
        let png = qr_png("https://example.com/path?q=1");
        assert_eq!(decode_bytes(&png).unwrap(), "https://example.com/path?q=1");
    }

    #[test]
    fn test_decode_blank_image() {
        let blank = GrayImage::from_pixel(64, 64, Luma([255]));
        let result = decode_image(&DynamicImage::ImageLuma8(blank));
        assert!(matches!(result, Err(Error::NoQrCode)));
    }

    #[test]
    fn test_decode_corrupt_bytes() {
        let result = decode_bytes(b"not an image at all");
        assert!(matches!(result, Err(Error::ImageLoad(_))));
    }
}
