pub mod document;
pub mod workbook;
