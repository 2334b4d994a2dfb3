//! カットアウト付きシンボルのバージョン選択
//!
//! カットアウトの下に隠れるデータモジュールはすべて誤りとして数え、
//! RSブロックごとの訂正能力に収まるまでバージョンを上げる。

use super::style::RenderConfig;
use super::svg::hidden_area;
use crate::error::{Error, Result};
use crate::types::Cutout;
use qrcode::bits::Bits;
use qrcode::{EcLevel, QrCode, Version};
use std::collections::HashSet;
use tracing::debug;

const MAX_VERSION: i16 = 40;

/// 描画設定に合うQRシンボルを生成する
pub(crate) fn encode(payload: &str, config: &RenderConfig) -> Result<QrCode> {
    let level: EcLevel = config.error_correction.into();
    let mut code = QrCode::with_error_correction_level(payload.as_bytes(), level)?;
    if config.cutout == Cutout::None {
        return Ok(code);
    }

    loop {
        if fits_error_budget(&code, config)? {
            return Ok(code);
        }
        let next = match code.version() {
            Version::Normal(v) if v < MAX_VERSION => v + 1,
            _ => {
                return Err(Error::InvalidStyle(format!(
                    "cutout {} hides more modules than error correction allows",
                    config.cutout
                )))
            }
        };
        debug!(version = next, "cutout exceeds error budget, raising version");
        code = QrCode::with_version(payload.as_bytes(), Version::Normal(next), level)?;
    }
}

/// 隠れる符号語がすべてのRSブロックで訂正可能な数以内か
pub(crate) fn fits_error_budget(code: &QrCode, config: &RenderConfig) -> Result<bool> {
    let width = code.width();
    let Some((range, _)) = hidden_area(config, width) else {
        return Ok(true);
    };

    let layout = BlockLayout::new(code.version(), code.error_correction_level())?;
    let mut hidden = HashSet::new();
    for (index, (x, y)) in data_module_order(code).into_iter().enumerate() {
        if range.contains(&x) && range.contains(&y) {
            hidden.insert(index / 8);
        }
    }

    let mut per_block = vec![0usize; layout.blocks];
    for codeword in hidden {
        if let Some(block) = layout.block_of(codeword) {
            per_block[block] += 1;
        }
    }

    let capacity = code.max_allowed_errors() / layout.blocks;
    Ok(per_block.iter().all(|&n| n <= capacity))
}

/// データモジュールの配置順（右下から2列ずつ蛇行、タイミング列は飛ばす）
pub(crate) fn data_module_order(code: &QrCode) -> Vec<(usize, usize)> {
    let width = code.width();
    let mut order = Vec::with_capacity(width * width);
    let mut right = width - 1;
    let mut upward = true;

    loop {
        if right == 6 {
            right = 5;
        }
        for i in 0..width {
            let y = if upward { width - 1 - i } else { i };
            for x in [right, right - 1] {
                if !code.is_functional(x, y) {
                    order.push((x, y));
                }
            }
        }
        upward = !upward;
        if right < 2 {
            break;
        }
        right -= 2;
    }
    order
}

/// 配置順の符号語がどのRSブロックに属するか
struct BlockLayout {
    blocks: usize,
    /// データ符号語（配置順）ごとのブロック番号
    data_blocks: Vec<usize>,
    ec_len: usize,
}

impl BlockLayout {
    /// 符号語の並べ替えを番号付きのダミーデータで再現して求める
    fn new(version: Version, level: EcLevel) -> Result<Self> {
        let data_len = Bits::new(version).max_len(level)? / 8;

        let low: Vec<u8> = (0..data_len).map(|i| (i & 0xff) as u8).collect();
        let high: Vec<u8> = (0..data_len).map(|i| (i >> 8) as u8).collect();
        let (low_order, ec) = qrcode::ec::construct_codewords(&low, version, level)?;
        let (high_order, _) = qrcode::ec::construct_codewords(&high, version, level)?;
        let source: Vec<usize> = low_order
            .iter()
            .zip(&high_order)
            .map(|(&l, &h)| (h as usize) << 8 | l as usize)
            .collect();

        // 先頭から各ブロックの1番目が並び、ブロック0の2番目で一巡する
        let blocks = source.iter().position(|&i| i == 1).unwrap_or(1).max(1);
        let starts = &source[..blocks];
        let data_blocks = source
            .iter()
            .map(|&i| starts.partition_point(|&s| s <= i).saturating_sub(1))
            .collect();

        Ok(Self {
            blocks,
            data_blocks,
            ec_len: ec.len(),
        })
    }

    fn block_of(&self, codeword: usize) -> Option<usize> {
        let data_len = self.data_blocks.len();
        if codeword < data_len {
            Some(self.data_blocks[codeword])
        } else if codeword < data_len + self.ec_len {
            Some((codeword - data_len) % self.blocks)
        } else {
            // 端数ビット
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::config_for;
    use crate::types::{StyleSelection, Theme};

    #[test]
    fn test_data_module_order_covers_every_data_module() {
        let code = QrCode::new(b"hello").unwrap();
        let order = data_module_order(&code);
        let width = code.width();
        let data_modules = (0..width)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| !code.is_functional(x, y))
            .count();
        assert_eq!(order.len(), data_modules);
        assert_eq!(order.iter().collect::<HashSet<_>>().len(), data_modules);
        // 右下から上へ
        assert_eq!(order[0], (width - 1, width - 1));
        assert_eq!(order[1], (width - 2, width - 1));
        assert_eq!(order[2], (width - 1, width - 2));
    }

    #[test]
    fn test_block_layout_single_block() {
        // 1-H: データ9 + 誤り訂正17、1ブロック
        let layout = BlockLayout::new(Version::Normal(1), EcLevel::H).unwrap();
        assert_eq!(layout.blocks, 1);
        assert_eq!(layout.data_blocks.len(), 9);
        assert_eq!(layout.ec_len, 17);
        assert_eq!(layout.block_of(25), Some(0));
        assert_eq!(layout.block_of(26), None);
    }

    #[test]
    fn test_block_layout_uneven_groups() {
        // 5-H: 11バイト x2 + 12バイト x2
        let layout = BlockLayout::new(Version::Normal(5), EcLevel::H).unwrap();
        assert_eq!(layout.blocks, 4);
        assert_eq!(layout.data_blocks.len(), 46);
        assert_eq!(&layout.data_blocks[..4], &[0, 1, 2, 3]);
        // 末尾の2つは長いブロックの12バイト目
        assert_eq!(&layout.data_blocks[44..], &[2, 3]);
        assert_eq!(layout.block_of(46), Some(0));
        assert_eq!(layout.block_of(47), Some(1));
    }

    #[test]
    fn test_short_payload_with_cutout_raises_version() {
        let config = config_for(&StyleSelection::new(Theme::Black, Cutout::VariantA));
        let auto = QrCode::with_error_correction_level(b"hello", EcLevel::H).unwrap();
        assert!(!fits_error_budget(&auto, &config).unwrap());

        let code = encode("hello", &config).unwrap();
        assert!(code.width() > auto.width());
        assert!(fits_error_budget(&code, &config).unwrap());
    }

    #[test]
    fn test_every_cutout_result_fits_budget() {
        let long = "x".repeat(300);
        let payloads = ["a", "hello", "https://example.com", long.as_str()];
        for cutout in [Cutout::VariantA, Cutout::VariantB] {
            let config = config_for(&StyleSelection::new(Theme::Default, cutout));
            for payload in payloads {
                let code = encode(payload, &config).unwrap();
                assert!(fits_error_budget(&code, &config).unwrap(), "{}", payload.len());
            }
        }
    }

    #[test]
    fn test_no_cutout_keeps_smallest_version() {
        let config = config_for(&StyleSelection::default());
        let code = encode("hello", &config).unwrap();
        assert_eq!(code.version(), Version::Normal(1));
    }
}
