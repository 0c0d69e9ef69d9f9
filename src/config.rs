use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const DATA_DIR_NAME: &str = "data";
pub const OUTPUT_DIR_NAME: &str = "output";
pub const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
pub const OUTPUT_FILE_PREFIX: &str = "Defects_selection_";
pub const OUTPUT_FILE_EXTENSION: &str = "docx";

pub const DEFECT_NAME_CANDIDATES: &[&str] = &[
    "name of defect / damage",
    "name of defect/damage",
    "name of defect",
    "defect",
    "damage",
];

pub const GROUP_CANDIDATES: &[&str] = &[
    "name of structures",
    "structures",
    "structure",
    "structure type",
    "structural element",
];

pub const PHOTO_NUMBER_CANDIDATES: &[&str] = &[
    "photo number from photo materials",
    "photo number",
    "photo",
    "photo materials",
    "photo number from photo",
];

pub const CONTROLLED_PARAMETER_CANDIDATES: &[&str] = &[
    "controlled defect parameter",
    "defect parameter",
    "controlled parameter",
    "parameter",
    "parameters",
];

pub const NOTE_CANDIDATES: &[&str] = &["note", "notes", "comment", "remarks"];

pub const TABLE_HEADERS: [&str; 6] = [
    "No.",
    "Name of defect/damage",
    "Location",
    "Photo number from photo materials",
    "Controlled defect parameter (depth, opening width, hardness, strength, continuity)",
    "Note",
];
pub const COLUMN_ORDINALS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

pub const DOCUMENT_TITLE: &str = "List of defects and damage";

pub const FONT_NAME: &str = "Roboto";
pub const TITLE_FONT_PT: f64 = 14.0;
pub const INFO_FONT_PT: f64 = 9.0;
pub const BODY_FONT_PT: f64 = 11.0;
pub const GROUP_HEADER_FONT_PT: f64 = 12.0;
/// Eighths of a point.
pub const BORDER_SIZE: u32 = 4;
pub const BORDER_COLOR: &str = "000000";

pub const PAGE_WIDTH_IN: f64 = 11.69;
pub const PAGE_HEIGHT_IN: f64 = 8.27;
pub const PAGE_MARGIN_IN: f64 = 0.5;
pub const TABLE_WIDTH_IN: f64 = 9.27;
pub const COLUMN_WIDTH_TARGETS_IN: [f64; 6] = [0.25, 2.5, 1.5, 1.0, 2.5, 1.5];

pub const PREVIEW_MAX_ROWS: usize = 20;
pub const PREVIEW_MAX_COLUMNS: usize = 2;
pub const PREVIEW_CELL_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub open_after_save: bool,
}

impl AppConfig {
    pub fn from_base_dir(base_dir: PathBuf, open_after_save: bool) -> Self {
        Self {
            data_dir: base_dir.join(DATA_DIR_NAME),
            output_dir: base_dir.join(OUTPUT_DIR_NAME),
            base_dir,
            open_after_save,
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.output_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory: {}", dir.display()))?;
            log::info!("checked directory: {}", dir.display());
        }
        Ok(())
    }
}

pub fn default_base_dir() -> Result<PathBuf> {
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match from_exe {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("failed to resolve working directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_derives_data_and_output_dirs() {
        let config = AppConfig::from_base_dir(PathBuf::from("/srv/defects"), true);

        assert_eq!(config.data_dir, PathBuf::from("/srv/defects/data"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/defects/output"));
        assert!(config.open_after_save);
    }

    #[test]
    fn table_schema_has_six_columns() {
        assert_eq!(TABLE_HEADERS.len(), COLUMN_WIDTH_TARGETS_IN.len());
        assert_eq!(COLUMN_ORDINALS.len(), COLUMN_WIDTH_TARGETS_IN.len());
    }
}
