pub mod package;
pub mod xml;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::BODY_FONT_PT;
use crate::domain::entities::document::TableDocument;
use crate::error::{DocumentError, SaveError};
use crate::usecase::ports::document::DocumentWriter;

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocumentWriter for DocxWriter {
    fn write(&self, document: &TableDocument, path: &Path) -> Result<(), SaveError> {
        let body = xml::document_xml(document)?;
        let styles = xml::styles_xml(&document.font_name, BODY_FONT_PT)?;

        let file = File::create(path).map_err(|e| SaveError::from_io(path.to_path_buf(), e))?;
        let writer = package::write_package(BufWriter::new(file), &body, &styles)
            .map_err(|e| match e {
                DocumentError::Io(source) => SaveError::from_io(path.to_path_buf(), source),
                other => SaveError::Document(other),
            })?;
        writer
            .into_inner()
            .map_err(|e| SaveError::from_io(path.to_path_buf(), e.into_error()))?;
        Ok(())
    }
}
