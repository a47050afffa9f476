//! # Session State
//!
//! Tracks whether the session has changes that were not exported yet, and
//! hands export collaborators a read-only snapshot of the author's text.

use crate::SourceBufferSet;
use serde::{Deserialize, Serialize};

/// Unscoped author text of the markup and stylesheet buffers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub markup: String,
    pub style: String,
}

/// Unsaved-changes bookkeeping for one playground session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    dirty: bool,

    /// Edits since the last export
    edits: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every buffer edit
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.edits += 1;
    }

    /// Called only once an export action has succeeded
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        self.edits = 0;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn edits_since_export(&self) -> usize {
        self.edits
    }

    pub fn snapshot(&self, buffers: &SourceBufferSet) -> Snapshot {
        Snapshot {
            markup: buffers.markup().unwrap_or_default().to_string(),
            style: buffers.style().unwrap_or_default().to_string(),
        }
    }
}
