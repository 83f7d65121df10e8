// src/process/mod.rs

pub mod index;
pub mod merge;
pub mod normalize;
pub mod raw;
pub mod template;
pub mod write;

pub use index::{reindex, reindexed};
pub use merge::merge;
pub use normalize::normalize;
pub use raw::{load_raw_table, RawTable};
pub use template::NameTemplate;
pub use write::write_chirp_csv;
