use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;

use crate::domain::entities::sheet::{ColumnMapping, SheetRow};
use crate::error::SaveError;
use crate::infra::fs::output::resolve_output_path;
use crate::usecase::ports::document::DocumentWriter;
use crate::usecase::services::grouping::group_rows;
use crate::usecase::services::layout::{plan_rows, render_document};

pub struct ExportRequest<'a> {
    pub rows: &'a [SheetRow],
    pub indices: &'a [usize],
    pub mapping: &'a ColumnMapping,
    pub group_column: Option<usize>,
    pub source_name: &'a str,
    pub file_name: &'a str,
}

pub struct ExportService {
    writer: Arc<dyn DocumentWriter>,
    output_dir: PathBuf,
}

impl ExportService {
    pub fn new(writer: Arc<dyn DocumentWriter>, output_dir: PathBuf) -> Self {
        Self { writer, output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Groups, lays out and saves the selected rows.
    ///
    /// Returns `Ok(None)` when the destination could not be written for lack
    /// of permission; that run produces no document but is not a fault.
    pub fn build(&self, request: &ExportRequest<'_>) -> Result<Option<PathBuf>, SaveError> {
        let groups = group_rows(request.rows, request.indices, request.group_column);
        let plan = plan_rows(&groups);
        log::debug!(
            "row plan: {} group headers, {} data rows",
            plan.group_header_count(),
            plan.data_row_count()
        );

        let document = render_document(request.rows, &plan, request.mapping, request.source_name);
        let path = resolve_output_path(
            &self.output_dir,
            request.file_name,
            Local::now().naive_local(),
        );

        match self.writer.write(&document, &path) {
            Ok(()) => {
                log::info!("document saved: {}", path.display());
                Ok(Some(path))
            }
            Err(SaveError::PermissionDenied { path }) => {
                log::error!(
                    "cannot save {}: permission denied (close the file in other programs and check access to the output folder)",
                    path.display()
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
