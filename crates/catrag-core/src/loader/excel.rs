use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use super::{source_of, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::Document;

/// All sheets of a workbook as one document: a sheet-name line followed by
/// its non-empty rows, cells separated by tabs.
pub struct ExcelLoader;

impl DocumentLoader for ExcelLoader {
    fn load(&self, path: &Path) -> Result<Vec<Document>> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| Error::load(path, e))?;
        let mut lines = Vec::new();
        for name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&name).map_err(|e| Error::load(path, e))?;
            lines.push(name);
            for row in range.rows() {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                if cells.iter().all(|c| c.trim().is_empty()) {
                    continue;
                }
                lines.push(cells.join("\t"));
            }
        }
        Ok(vec![Document::new(
            lines.join("\n"),
            source_of(path),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            1,
        )])
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xlsx"]
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
