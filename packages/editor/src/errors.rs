//! Error types for the editor

use crate::export::ExportError;
use crate::surface::SurfaceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown buffer: {0}")]
    UnknownBuffer(String),

    #[error("Buffer declared twice: {0}")]
    DuplicateBuffer(String),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

pub type EditorResult<T> = Result<T, EditorError>;
