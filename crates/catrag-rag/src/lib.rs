//! Index building and question answering over the per-category indexes.
pub mod builder;
pub mod clients;
pub mod query;

pub use builder::{BuildOutcome, BuildReport, IndexBuilder};
pub use clients::Clients;
pub use query::{index_not_found_message, QueryOutcome, QueryService};
