use std::path::Path;

use super::{source_of, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::Document;

pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let content = pdf_extract::extract_text(path).map_err(|e| Error::load(path, e))?;
        Ok(vec![Document::new(content, source_of(path), "application/pdf", 1)])
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}
