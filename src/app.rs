use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::infra::docx::DocxWriter;
use crate::platform::desktop::launcher::open_document;
use crate::ui::console::prompt::{Prompter, RULE};
use crate::ui::console::wizard::{choose_groups, choose_rows, choose_sheet, choose_workbook};
use crate::usecase::services::export_service::{ExportRequest, ExportService};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::layout::output_file_name;
use crate::usecase::services::selection::{
    available_groups, filter_by_groups, parse_selection, resolve_view_positions, select_groups,
};

/// Answers given up front on the command line; each one skips its prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub sheet: Option<String>,
    pub groups: Option<String>,
    pub rows: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved(PathBuf),
    /// The run stopped without producing a document; the reason was shown.
    Ended(String),
}

fn end(prompter: &mut dyn Prompter, reason: impl Into<String>) -> RunOutcome {
    let reason = reason.into();
    prompter.say(&reason);
    RunOutcome::Ended(reason)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs the wizard: workbook, sheet, groups, rows, then the document.
///
/// A user abort surfaces as an error wrapping
/// [`WizardAbort`](crate::error::WizardAbort).
pub fn run(
    config: &AppConfig,
    options: &RunOptions,
    prompter: &mut dyn Prompter,
) -> Result<RunOutcome> {
    config.ensure_directories()?;
    let import = ImportService::new(config.data_dir.clone());

    let workbook = match &options.file {
        Some(path) => path.clone(),
        None => {
            let files = import.list_workbooks()?;
            match choose_workbook(prompter, &files, import.data_dir())? {
                Some(path) => path,
                None => return Ok(end(prompter, "No file selected.")),
            }
        }
    };

    let sheet = match &options.sheet {
        Some(sheet) => sheet.clone(),
        None => {
            let names = match import.sheet_names(&workbook) {
                Ok(names) => names,
                Err(err) => {
                    log::error!("failed to read {}: {err}", workbook.display());
                    return Ok(end(prompter, format!("Failed to read Excel file: {err}")));
                }
            };
            let Some(first) = names.first() else {
                return Ok(end(prompter, "The Excel file has no sheets."));
            };
            choose_sheet(prompter, &names, first)?
        }
    };

    let loaded = match import.load(&workbook, Some(sheet.as_str())) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::error!("failed to load {}: {err}", workbook.display());
            return Ok(end(prompter, format!("Failed to read Excel file: {err}")));
        }
    };

    prompter.say("Column headers found in the sheet:");
    for (idx, header) in loaded.headers.iter().enumerate() {
        if !header.is_empty() {
            prompter.say(&format!("  Column {}: {header}", idx + 1));
        }
    }
    if loaded.rows.is_empty() {
        return Ok(end(prompter, "The sheet has no data rows."));
    }
    prompter.say(&format!(
        "Loaded {} data rows from sheet '{}'",
        loaded.rows.len(),
        loaded.sheet_name
    ));

    let groups = available_groups(&loaded.rows, loaded.group_column);
    let selected_groups = match &options.groups {
        Some(expr) if loaded.group_column.is_some() && !groups.is_empty() => {
            let picked = select_groups(&groups, expr);
            if picked.is_empty() {
                return Ok(end(prompter, "No structure matched the group selection."));
            }
            Some(picked)
        }
        Some(_) => None,
        None => choose_groups(prompter, &groups, loaded.group_column.is_some())?,
    };

    let all: Vec<usize> = (0..loaded.rows.len()).collect();
    let view = filter_by_groups(
        &loaded.rows,
        &all,
        loaded.group_column,
        selected_groups.as_deref(),
    );
    if view.is_empty() {
        return Ok(end(prompter, "No rows left after filtering by structure."));
    }
    if selected_groups.is_some() {
        prompter.say(&format!(
            "{} rows available for the selected structures.",
            view.len()
        ));
    }

    let indices = match &options.rows {
        Some(expr) => resolve_view_positions(&view, &parse_selection(expr, view.len())),
        None => choose_rows(prompter, &loaded.rows, &view)?,
    };
    let Some(file_name) = output_file_name(&indices) else {
        return Ok(end(prompter, "No rows selected."));
    };

    let export = ExportService::new(Arc::new(DocxWriter), config.output_dir.clone());
    let saved = export
        .build(&ExportRequest {
            rows: &loaded.rows,
            indices: &indices,
            mapping: &loaded.mapping,
            group_column: loaded.group_column,
            source_name: &source_name(&workbook),
            file_name: &file_name,
        })
        .with_context(|| format!("failed to create document {file_name}"))?;

    let Some(path) = saved else {
        return Ok(end(
            prompter,
            format!(
                "The document could not be saved to {}. Close it in other programs and check folder permissions.",
                export.output_dir().display()
            ),
        ));
    };

    prompter.say(&format!("Document saved: {}", path.display()));
    if config.open_after_save {
        open_document(&path);
    }
    prompter.say(RULE);
    prompter.say("Done.");
    prompter.say(RULE);
    Ok(RunOutcome::Saved(path))
}
