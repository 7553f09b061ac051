use std::fs;
use std::path::Path;

use serde_json::Value;

use super::{source_of, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::Document;

/// A JSON array of records; every element becomes its own document holding
/// the element's compact JSON text.
pub struct JsonRecordsLoader;

impl DocumentLoader for JsonRecordsLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| Error::load(path, e))?;
        let Value::Array(records) = value else {
            return Err(Error::load(path, "expected a top-level JSON array of records"));
        };
        let source = source_of(path);
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let content = serde_json::to_string(record).map_err(|e| Error::load(path, e))?;
                Ok(Document::new(content, source.clone(), "application/json", i + 1))
            })
            .collect()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
