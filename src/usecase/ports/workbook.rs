use crate::domain::entities::sheet::SheetRow;
use crate::error::LoadError;

/// An opened workbook whose sheets can be read as text grids.
pub trait WorkbookSource {
    fn sheet_names(&self) -> Vec<String>;

    /// Every row of `sheet`, header row included, cells coerced to text.
    fn read_rows(&mut self, sheet: &str) -> Result<Vec<SheetRow>, LoadError>;
}
