use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("failed to read sheet {sheet}: {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet {0} has no header row")]
    EmptySheet(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to format document xml: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to package document: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write document package: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("permission denied while saving {path}")]
    PermissionDenied { path: PathBuf },

    #[error("failed to save {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl SaveError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            SaveError::PermissionDenied { path }
        } else {
            SaveError::Io { path, source }
        }
    }
}

/// The user ended the interactive session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled by user")]
pub struct WizardAbort;
