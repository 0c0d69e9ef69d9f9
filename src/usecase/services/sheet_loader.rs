use crate::config::{
    CONTROLLED_PARAMETER_CANDIDATES, DEFECT_NAME_CANDIDATES, GROUP_CANDIDATES, NOTE_CANDIDATES,
    PHOTO_NUMBER_CANDIDATES,
};
use crate::domain::entities::sheet::{ColumnMapping, LoadedSheet, LogicalField};
use crate::error::LoadError;
use crate::usecase::ports::workbook::WorkbookSource;
use crate::usecase::services::header_matcher::find_column;

fn candidates_for(field: LogicalField) -> &'static [&'static str] {
    match field {
        LogicalField::DefectName => DEFECT_NAME_CANDIDATES,
        LogicalField::PhotoNumber => PHOTO_NUMBER_CANDIDATES,
        LogicalField::ControlledParameter => CONTROLLED_PARAMETER_CANDIDATES,
        LogicalField::Note => NOTE_CANDIDATES,
    }
}

pub fn build_mapping(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for field in LogicalField::ALL {
        let column = find_column(headers, candidates_for(field));
        match column {
            Some(idx) => log::info!(
                "column '{}' mapped to column {} ({})",
                field.label(),
                idx + 1,
                headers[idx]
            ),
            None => log::warn!(
                "column '{}' not found, it will be left empty",
                field.label()
            ),
        }
        mapping.set(field, column);
    }
    mapping
}

pub fn find_group_column(headers: &[String]) -> Option<usize> {
    let column = find_column(headers, GROUP_CANDIDATES);
    if let Some(idx) = column {
        log::info!(
            "group column mapped to column {} ({})",
            idx + 1,
            headers[idx]
        );
    }
    column
}

/// Resolves `sheet_name` (first declared sheet when `None`), splits off the
/// header row and maps headers to output fields.
pub fn load_sheet(
    source: &mut dyn WorkbookSource,
    sheet_name: Option<&str>,
) -> Result<LoadedSheet, LoadError> {
    let names = source.sheet_names();
    let sheet_name = match sheet_name {
        Some(name) if names.iter().any(|n| n == name) => name.to_string(),
        Some(name) => return Err(LoadError::SheetNotFound(name.to_string())),
        None => names.first().cloned().ok_or(LoadError::NoSheets)?,
    };

    let mut rows = source.read_rows(&sheet_name)?.into_iter();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| LoadError::EmptySheet(sheet_name.clone()))?
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect();
    let rows: Vec<_> = rows.collect();

    for (idx, header) in headers.iter().enumerate() {
        if !header.is_empty() {
            log::debug!("header column {}: {header}", idx + 1);
        }
    }

    let mapping = build_mapping(&headers);
    let group_column = find_group_column(&headers);
    log::info!(
        "loaded {} data rows from sheet '{sheet_name}'",
        rows.len()
    );

    Ok(LoadedSheet {
        sheet_name,
        headers,
        rows,
        mapping,
        group_column,
    })
}
