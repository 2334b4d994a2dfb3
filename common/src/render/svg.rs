//! 描画設定に従ってQRシンボルをSVGとして書き出す

use super::style::{CornerShape, DotShape, RenderConfig};
use crate::naming::svg_data_uri;
use crate::types::Cutout;
use qrcode::{Color, QrCode};
use std::fmt::Write;
use std::ops::Range;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// 位置検出パターンの一辺（モジュール数）
const FINDER_SIZE: usize = 7;

const CUTOUT_A: &str = include_str!("assets/cutout-a.svg");
const CUTOUT_B: &str = include_str!("assets/cutout-b.svg");

fn cutout_asset(cutout: Cutout) -> Option<&'static str> {
    match cutout {
        Cutout::None => None,
        Cutout::VariantA => Some(CUTOUT_A),
        Cutout::VariantB => Some(CUTOUT_B),
    }
}

/// 数値を属性値として整形（末尾の0を落とす）
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn is_finder(x: usize, y: usize, width: usize) -> bool {
    let near = |v: usize| v < FINDER_SIZE;
    let far = |v: usize| v >= width - FINDER_SIZE;
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}

/// カットアウトで隠すモジュール範囲（縦横共通）と画像の一辺
pub(super) fn hidden_area(config: &RenderConfig, width: usize) -> Option<(Range<usize>, usize)> {
    cutout_asset(config.cutout)?;

    let mut side = (width as f64 * config.image_size).ceil() as usize;
    if side % 2 == 0 {
        side += 1;
    }
    let hidden = (side + 2 * config.image_margin as usize).min(width);
    let start = (width - hidden) / 2;
    Some((start..start + hidden, side))
}

/// QRシンボルをSVG文書（XML宣言なし）として書き出す
pub(crate) fn write_svg(code: &QrCode, config: &RenderConfig) -> String {
    let width = code.width();
    let m = config.module_size as f64;
    let offset = config.margin as f64 * m;
    let total = (width as f64 + 2.0 * config.margin as f64) * m;
    let colors = code.to_colors();
    let hidden = hidden_area(config, width);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="{ns}" version="1.1" width="{t}" height="{t}" viewBox="0 0 {t} {t}">"#,
        ns = SVG_NAMESPACE,
        t = fmt_num(total),
    );

    if let Some(background) = &config.background {
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{t}" height="{t}" fill="{background}"/>"#,
            t = fmt_num(total),
        );
    }

    // データモジュール
    let _ = write!(out, r#"<g fill="{}">"#, config.dot_color);
    for y in 0..width {
        for x in 0..width {
            if colors[y * width + x] != Color::Dark || is_finder(x, y, width) {
                continue;
            }
            if let Some((range, _)) = &hidden {
                // 機能パターンは隠さない
                if range.contains(&x) && range.contains(&y) && !code.is_functional(x, y) {
                    continue;
                }
            }
            let px = offset + x as f64 * m;
            let py = offset + y as f64 * m;
            write_dot(&mut out, config.dot_shape, px, py, m);
        }
    }
    out.push_str("</g>");

    // 位置検出パターン
    let origins = [(0, 0), (width - FINDER_SIZE, 0), (0, width - FINDER_SIZE)];
    for (cx, cy) in origins {
        let px = offset + cx as f64 * m;
        let py = offset + cy as f64 * m;
        write_corner_square(&mut out, config, px, py, m);
        write_corner_dot(&mut out, config, px + 2.0 * m, py + 2.0 * m, m);
    }

    if let (Some((range, side)), Some(asset)) = (&hidden, cutout_asset(config.cutout)) {
        let image_start = offset + (range.start + config.image_margin as usize) as f64 * m;
        let image_side = *side as f64 * m;
        let _ = write!(
            out,
            r#"<image x="{x}" y="{x}" width="{s}" height="{s}" href="{href}"/>"#,
            x = fmt_num(image_start),
            s = fmt_num(image_side),
            href = svg_data_uri(asset),
        );
    }

    out.push_str("</svg>");
    out
}

fn write_dot(out: &mut String, shape: DotShape, x: f64, y: f64, m: f64) {
    let _ = match shape {
        DotShape::Square => write!(
            out,
            r#"<rect x="{}" y="{}" width="{m}" height="{m}"/>"#,
            fmt_num(x),
            fmt_num(y),
            m = fmt_num(m),
        ),
        DotShape::Rounded => write!(
            out,
            r#"<rect x="{}" y="{}" width="{m}" height="{m}" rx="{}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(m * 0.3),
            m = fmt_num(m),
        ),
        DotShape::Dots => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}"/>"#,
            fmt_num(x + m / 2.0),
            fmt_num(y + m / 2.0),
            fmt_num(m / 2.0),
        ),
    };
}

/// 外枠（7x7、太さ1モジュール）はストロークで描く
fn write_corner_square(out: &mut String, config: &RenderConfig, x: f64, y: f64, m: f64) {
    let inset = m / 2.0;
    let side = 6.0 * m;
    let rx = match config.corner_square_shape {
        CornerShape::Square => None,
        CornerShape::ExtraRounded => Some(side * 0.25),
        CornerShape::Dot => Some(side / 2.0),
    };
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{s}" height="{s}"{rx} fill="none" stroke="{}" stroke-width="{}"/>"#,
        fmt_num(x + inset),
        fmt_num(y + inset),
        config.corner_square_color,
        fmt_num(m),
        s = fmt_num(side),
        rx = rx.map(|r| format!(r#" rx="{}""#, fmt_num(r))).unwrap_or_default(),
    );
}

/// 中心（3x3）
fn write_corner_dot(out: &mut String, config: &RenderConfig, x: f64, y: f64, m: f64) {
    let side = 3.0 * m;
    let color = &config.corner_dot_color;
    let _ = match config.corner_dot_shape {
        CornerShape::Dot => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
            fmt_num(x + side / 2.0),
            fmt_num(y + side / 2.0),
            fmt_num(side / 2.0),
        ),
        CornerShape::Square => write!(
            out,
            r#"<rect x="{}" y="{}" width="{s}" height="{s}" fill="{color}"/>"#,
            fmt_num(x),
            fmt_num(y),
            s = fmt_num(side),
        ),
        CornerShape::ExtraRounded => write!(
            out,
            r#"<rect x="{}" y="{}" width="{s}" height="{s}" rx="{}" fill="{color}"/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(side * 0.3),
            s = fmt_num(side),
        ),
    };
}
