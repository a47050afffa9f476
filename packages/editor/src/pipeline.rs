//! # Preview Pipeline
//!
//! Coordinates the edit → preview lifecycle: Edit → Debounce → Compose → Render
//!
//! The engine owns:
//! - The source buffers and the session's unsaved-changes flag
//! - The change scheduler (realtime buffers only)
//! - The preview surface and its render resource
//!
//! It is driven from outside: callers push edits and call `tick` when the
//! scheduler's deadline comes due.

use crate::export::{self, ExportAction, ExportArtifact};
use crate::{
    Buffer, ChangeScheduler, CommitMode, EditorResult, PreviewSurfaceManager, SessionState,
    Snapshot, SourceBufferSet, SurfaceBackend, DEFAULT_QUIET_INTERVAL,
};
use playground_compiler_css::ScopeSelector;
use playground_compiler_html::{compose_to_html, CompileOptions, DEFAULT_TITLE};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Container the preview styles are confined to
    pub scope_selector: ScopeSelector,

    /// Quiet period before a burst of realtime edits is rendered
    pub quiet_interval: Duration,

    /// Title of composed and exported documents
    pub title: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            scope_selector: ScopeSelector::default(),
            quiet_interval: DEFAULT_QUIET_INTERVAL,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// What an edit led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Realtime edit; a recompute is due at `deadline`
    Scheduled { deadline: Instant },
    /// Explicit-commit edit; the preview was recomputed synchronously
    Rendered(RecomputeReport),
}

/// Result of one recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeReport {
    /// Recomputes so far, including this one
    pub version: u64,

    /// Size of the rendered document
    pub bytes: usize,
}

/// The live-preview engine of one playground
pub struct PreviewEngine<B: SurfaceBackend> {
    options: EngineOptions,
    buffers: SourceBufferSet,
    scheduler: ChangeScheduler,
    session: SessionState,
    surface: PreviewSurfaceManager<B>,
    version: u64,
}

impl<B: SurfaceBackend> PreviewEngine<B> {
    /// Create an engine over the discovered buffers. Nothing is rendered
    /// until the first `recompute`.
    pub fn new(
        options: EngineOptions,
        discovered: impl IntoIterator<Item = Buffer>,
        backend: B,
    ) -> EditorResult<Self> {
        let buffers = SourceBufferSet::new(discovered)?;
        info!(
            buffers = buffers.len(),
            scope = %options.scope_selector,
            quiet_ms = options.quiet_interval.as_millis() as u64,
            "Preview engine created"
        );

        Ok(Self {
            scheduler: ChangeScheduler::new(options.quiet_interval),
            options,
            buffers,
            session: SessionState::new(),
            surface: PreviewSurfaceManager::new(backend),
            version: 0,
        })
    }

    /// Apply an edit event from the editor widget.
    ///
    /// Realtime buffers schedule a debounced recompute; explicit-commit
    /// buffers recompute immediately.
    pub fn apply_edit(
        &mut self,
        buffer_id: &str,
        content: impl Into<String>,
        now: Instant,
    ) -> EditorResult<EditOutcome> {
        let mode = self.buffers.set_content(buffer_id, content)?;
        self.session.mark_dirty();

        match mode {
            CommitMode::Realtime => {
                self.scheduler.notify_at(buffer_id, now);
                let deadline = now + self.scheduler.quiet_interval();
                Ok(EditOutcome::Scheduled { deadline })
            }
            CommitMode::ExplicitCommit => {
                // The synchronous recompute covers whatever was pending
                self.scheduler.cancel();
                Ok(EditOutcome::Rendered(self.recompute_or_retry(buffer_id, now)?))
            }
        }
    }

    /// Fire the scheduled recompute if it is due at `now`. A failed render is
    /// retried on a later tick.
    pub fn tick(&mut self, now: Instant) -> EditorResult<Option<RecomputeReport>> {
        match self.scheduler.poll_at(now) {
            Some(trigger) => {
                info!(
                    buffer_id = %trigger.buffer_id,
                    coalesced = trigger.notifications,
                    "Debounced recompute"
                );
                self.recompute_or_retry(&trigger.buffer_id, now).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Recompute, re-arming the scheduler when the render fails so the
    /// latest contents are retried after another quiet interval
    fn recompute_or_retry(&mut self, buffer_id: &str, now: Instant) -> EditorResult<RecomputeReport> {
        match self.recompute() {
            Ok(report) => Ok(report),
            Err(e) => {
                self.scheduler.notify_at(buffer_id, now);
                warn!(buffer_id = %buffer_id, "Render retry scheduled");
                Err(e)
            }
        }
    }

    /// When `tick` next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Compose the preview from the current buffers and render it
    #[instrument(skip(self), fields(version = self.version + 1))]
    pub fn recompute(&mut self) -> EditorResult<RecomputeReport> {
        let document = self.compose_preview();

        if let Err(e) = self.surface.render(&document) {
            warn!(error = %e, "Preview render failed");
            return Err(e.into());
        }

        self.version += 1;
        let report = RecomputeReport {
            version: self.version,
            bytes: document.len(),
        };
        info!(bytes = report.bytes, "Preview rendered");
        Ok(report)
    }

    /// The preview document for the current buffer contents
    pub fn compose_preview(&self) -> String {
        let options = CompileOptions {
            title: self.options.title.clone(),
            ..CompileOptions::preview(self.options.scope_selector.clone())
        };
        compose_to_html(&self.buffers.compose_input(), &options)
    }

    /// Export the unscoped buffers. Clears the unsaved-changes flag on success.
    pub fn export(&mut self, action: &ExportAction) -> EditorResult<ExportArtifact> {
        let artifact = export::export(&self.snapshot(), action, &self.options.title)?;

        info!(
            kind = action.kind(),
            edits = self.session.edits_since_export(),
            "Exported session"
        );
        self.session.clear_dirty();
        Ok(artifact)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot(&self.buffers)
    }

    /// Whether leaving now would lose changes
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn buffers(&self) -> &SourceBufferSet {
        &self.buffers
    }

    pub fn surface(&self) -> &PreviewSurfaceManager<B> {
        &self.surface
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Recomputes completed so far
    pub fn version(&self) -> u64 {
        self.version
    }
}
