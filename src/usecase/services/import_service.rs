use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::entities::sheet::LoadedSheet;
use crate::error::LoadError;
use crate::infra::fs::output::list_workbooks;
use crate::infra::import::xlsx::XlsxWorkbook;
use crate::usecase::ports::workbook::WorkbookSource;
use crate::usecase::services::sheet_loader::load_sheet;

pub struct ImportService {
    data_dir: PathBuf,
}

impl ImportService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_workbooks(&self) -> Result<Vec<PathBuf>> {
        list_workbooks(&self.data_dir)
    }

    pub fn sheet_names(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        Ok(XlsxWorkbook::open(path)?.sheet_names())
    }

    pub fn load(&self, path: &Path, sheet_name: Option<&str>) -> Result<LoadedSheet, LoadError> {
        let mut workbook = XlsxWorkbook::open(path)?;
        load_sheet(&mut workbook, sheet_name)
    }
}
