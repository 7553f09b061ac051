//! Word documents: plain text from the OOXML `word/document.xml` part.
//!
//! Legacy binary `.doc` files are routed here too; they are not zip
//! containers and fail with a load error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{source_of, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::Document;

const DOCUMENT_PART: &str = "word/document.xml";

pub struct WordLoader;

impl DocumentLoader for WordLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let mut archive = zip::ZipArchive::new(File::open(path)?).map_err(|e| Error::load(path, e))?;
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| Error::load(path, e))?;
        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        let content = extract_document_xml_text(&xml).map_err(|e| Error::load(path, e))?;
        Ok(vec![Document::new(
            content,
            source_of(path),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            1,
        )])
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx", "doc"]
    }
}

/// Text runs of a `document.xml` body, one line per paragraph.
pub fn extract_document_xml_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Leave</w:t></w:r><w:r><w:t xml:space="preserve"> Policy</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Days</w:t><w:tab/><w:t>Type &amp; Location</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = extract_document_xml_text(xml).unwrap();
        assert_eq!(text, "Leave Policy\n\nDays\tType & Location");
    }
}
