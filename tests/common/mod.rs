//! テスト用の画像生成ヘルパー

#![allow(dead_code)]

use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbaImage};
use qrcode::{Color, QrCode};
use resvg::{tiny_skia, usvg};
use std::path::Path;

/// QRコードを描いたグレースケール画像
pub fn qr_image(payload: &str) -> GrayImage {
    let code = QrCode::new(payload.as_bytes()).expect("QR生成失敗");
    let width = code.width() as u32;
    let (scale, quiet) = (8u32, 4u32);
    let size = (width + quiet * 2) * scale;
    let colors = code.to_colors();

    GrayImage::from_fn(size, size, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        if mx < quiet || my < quiet || mx >= width + quiet || my >= width + quiet {
            return Luma([255]);
        }
        match colors[((my - quiet) * width + (mx - quiet)) as usize] {
            Color::Dark => Luma([0]),
            Color::Light => Luma([255]),
        }
    })
}

/// QRコードのPNGを書き出す
pub fn write_qr_png(path: &Path, payload: &str) {
    qr_image(payload)
        .save_with_format(path, ImageFormat::Png)
        .expect("PNG書き出し失敗");
}

/// QRコードを含まないJPEGを書き出す
pub fn write_blank_jpeg(path: &Path) {
    GrayImage::from_pixel(64, 64, Luma([200]))
        .save_with_format(path, ImageFormat::Jpeg)
        .expect("JPEG書き出し失敗");
}

/// ディレクトリ内のファイル名一覧（ソート済み）
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("ディレクトリ読み込み失敗")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// SVGファイルを白地にラスタライズしてQRコードの内容を読み取る
pub fn decode_svg_file(path: &Path) -> String {
    let text = std::fs::read_to_string(path).expect("SVG読み込み失敗");
    let tree = usvg::Tree::from_str(&text, &usvg::Options::default()).expect("SVG解析失敗");
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).expect("空のSVG");
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let rgba = RgbaImage::from_raw(size.width(), size.height(), pixmap.take()).expect("画素数不一致");
    qr_restyle_common::decode_image(&DynamicImage::ImageRgba8(rgba)).expect("QR読み取り失敗")
}
