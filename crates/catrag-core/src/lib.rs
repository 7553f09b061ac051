pub mod category;
pub mod config;
pub mod data_processor;
pub mod error;
pub mod fingerprint;
pub mod loader;
pub mod prompt;
pub mod splitter;
pub mod traits;
pub mod types;

pub use category::Category;
pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use prompt::PromptTemplate;
pub use traits::{ChatModel, Embedder};
pub use types::{Document, DocumentChunk, RetrievedChunk};
