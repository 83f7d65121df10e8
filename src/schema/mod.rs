pub mod defaults;
pub mod types;

pub use defaults::baseline_row;
pub use types::{ChannelRow, ChannelTable, Column, Value};

/// Header of every CHIRP file this crate writes.
pub fn chirp_header() -> Vec<&'static str> {
    let mut header = Vec::with_capacity(Column::COUNT + 1);
    header.push("Location");
    header.extend(Column::ALL.iter().map(Column::as_str));
    header
}
