pub mod export_buttons;
pub mod header;
pub mod manual_entry;
pub mod preview;
pub mod result_table;
pub mod style_panel;
pub mod upload_area;
