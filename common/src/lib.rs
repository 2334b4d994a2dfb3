//! QR Restyle Common Library
//!
//! CLIとWeb(WASM)で共有される読み取り・再描画・エクスポート処理

pub mod batch;
pub mod decode;
pub mod error;
pub mod export;
pub mod naming;
pub mod render;
pub mod settings;
pub mod types;

pub use batch::{run_batch, BatchController, BatchSummary, BatchToken, ControllerHandle, SourceFile};
pub use decode::{decode_bytes, decode_image};
pub use error::{Error, Result};
pub use export::{export_all, export_one, ExportFile};
pub use naming::{is_accepted_image, is_svg, to_svg_file_name};
pub use render::{render_plain_svg, render_svg};
pub use settings::{Preview, SettingsStore, SettingsSync};
pub use types::{Cutout, ScanError, ScanItem, StyleSelection, Theme};
