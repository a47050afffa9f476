pub mod compose;
pub mod export;
pub mod preview;
pub mod scope;

pub use compose::{compose, ComposeArgs};
pub use export::{export, ExportArgs};
pub use preview::{preview, PreviewArgs};
pub use scope::{scope, ScopeArgs};

use anyhow::{Context, Result};
use std::path::Path;

/// Read an optional source file; a missing argument reads as an empty buffer
pub(crate) fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(String::new()),
    }
}
