//! LanceDB storage for per-category chunk indexes.
pub mod index;
pub mod schema;
pub mod table;

pub use index::{CategoryIndex, SourceRecord};
