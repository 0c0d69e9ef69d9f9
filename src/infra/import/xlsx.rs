use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::domain::entities::sheet::SheetRow;
use crate::error::LoadError;
use crate::usecase::ports::workbook::WorkbookSource;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| v.as_f64().to_string()),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Text grid of `range`, padded so that `[0][0]` is cell A1 even when the
/// used range starts further down or right.
pub fn range_to_rows(range: &Range<Data>) -> Vec<SheetRow> {
    let (first_row, first_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let mut rows = vec![SheetRow::new(); first_row];
    rows.extend(range.rows().map(|cells| {
        let mut row = vec![String::new(); first_col];
        row.extend(cells.iter().map(cell_to_string));
        row
    }));
    rows
}

pub struct XlsxWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let sheets = open_workbook_auto(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

impl WorkbookSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_rows(&mut self, sheet: &str) -> Result<Vec<SheetRow>, LoadError> {
        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|source| LoadError::Read {
                sheet: sheet.to_string(),
                source,
            })?;
        let rows = range_to_rows(&range);
        log::debug!(
            "read {} rows from sheet '{sheet}' of {}",
            rows.len(),
            self.path.display()
        );
        Ok(rows)
    }
}
