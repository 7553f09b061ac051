//! Format-specific document loaders, dispatched by file extension.

use std::path::Path;

use crate::error::Result;
use crate::types::Document;

mod excel;
mod json;
mod pdf;
mod word;

pub use excel::ExcelLoader;
pub use json::JsonRecordsLoader;
pub use pdf::PdfLoader;
pub use word::{extract_document_xml_text, WordLoader};

pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Vec<Document>>;

    /// Lowercase extensions without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}

pub struct LoaderRegistry {
    loaders: Vec<Box<dyn DocumentLoader>>,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self {
            loaders: vec![
                Box::new(PdfLoader),
                Box::new(WordLoader),
                Box::new(ExcelLoader),
                Box::new(JsonRecordsLoader),
            ],
        }
    }
}

impl LoaderRegistry {
    /// Loader for `path`, or `None` when the extension is not supported.
    pub fn find(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.loaders
            .iter()
            .find(|l| l.supported_extensions().contains(&ext.as_str()))
            .map(|l| l.as_ref())
    }
}

pub(crate) fn source_of(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_lowercase_extension() {
        let registry = LoaderRegistry::default();
        for name in ["a.pdf", "b.DOCX", "c.doc", "d.xlsx", "e.Json"] {
            assert!(registry.find(Path::new(name)).is_some(), "{name} should have a loader");
        }
        for name in ["notes.txt", "sheet.xls", "README", "archive.zip"] {
            assert!(registry.find(Path::new(name)).is_none(), "{name} should be unsupported");
        }
    }
}
