//! # Source Buffers
//!
//! The named editable buffers of a playground. Buffers are created once from
//! the editable regions discovered in the host page and are never removed;
//! edits replace their content.

use crate::{EditorError, EditorResult};
use playground_compiler_html::ComposeInput;
use serde::{Deserialize, Serialize};

/// Id of the markup buffer
pub const MARKUP_BUFFER: &str = "markup";

/// Id of the stylesheet buffer
pub const STYLE_BUFFER: &str = "style";

const MARKUP_IDS: &[&str] = &[MARKUP_BUFFER, "html"];
const STYLE_IDS: &[&str] = &[STYLE_BUFFER, "css"];

/// When edits to a buffer reach the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// Every keystroke, debounced
    #[default]
    Realtime,
    /// Only on the commit key chord, immediately
    ExplicitCommit,
}

/// One named editable unit of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    pub id: String,
    pub content: String,
    pub mode: CommitMode,
}

impl Buffer {
    pub fn new(id: impl Into<String>, content: impl Into<String>, mode: CommitMode) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            mode,
        }
    }

    pub fn realtime(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, content, CommitMode::Realtime)
    }
}

/// The buffers of one playground, in discovery order
#[derive(Debug, Clone, Default)]
pub struct SourceBufferSet {
    buffers: Vec<Buffer>,
}

impl SourceBufferSet {
    pub fn new(discovered: impl IntoIterator<Item = Buffer>) -> EditorResult<Self> {
        let mut buffers: Vec<Buffer> = Vec::new();

        for buffer in discovered {
            if buffers.iter().any(|b| b.id == buffer.id) {
                return Err(EditorError::DuplicateBuffer(buffer.id));
            }
            buffers.push(buffer);
        }

        Ok(Self { buffers })
    }

    pub fn get(&self, id: &str) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.id == id)
    }

    /// Replace a buffer's content, returning its commit mode
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) -> EditorResult<CommitMode> {
        let buffer = self
            .buffers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| EditorError::UnknownBuffer(id.to_string()))?;

        buffer.content = content.into();
        Ok(buffer.mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Content of the markup buffer, if there is one
    pub fn markup(&self) -> Option<&str> {
        self.first_of(MARKUP_IDS)
    }

    /// Content of the stylesheet buffer, if there is one
    pub fn style(&self) -> Option<&str> {
        self.first_of(STYLE_IDS)
    }

    pub fn compose_input(&self) -> ComposeInput<'_> {
        ComposeInput {
            markup: self.markup(),
            style: self.style(),
        }
    }

    fn first_of(&self, ids: &[&str]) -> Option<&str> {
        ids.iter()
            .find_map(|id| self.get(id))
            .map(|b| b.content.as_str())
    }
}
