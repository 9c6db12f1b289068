//! Error types for sheet export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The requested sheet does not exist in the scene.
    #[error("Sheet {index} out of range (scene has {count} sheet(s))")]
    SheetOutOfRange { index: usize, count: usize },

    /// Writing a sheet file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
