use std::path::Path;

use crate::domain::entities::document::TableDocument;
use crate::error::SaveError;

pub trait DocumentWriter {
    fn write(&self, document: &TableDocument, path: &Path) -> Result<(), SaveError>;
}
