//! # Playground Editor
//!
//! Live-preview engine for an in-browser code playground.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ buffers: named markup / stylesheet text     │
//! └─────────────────────────────────────────────┘
//!                     ↓ edit
//! ┌─────────────────────────────────────────────┐
//! │ scheduler: trailing-edge debounce           │
//! │  (explicit-commit buffers skip it)          │
//! └─────────────────────────────────────────────┘
//!                     ↓ recompute
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html + compiler-css:               │
//! │  document with the scoped stylesheet        │
//! └─────────────────────────────────────────────┘
//!                     ↓ render
//! ┌─────────────────────────────────────────────┐
//! │ surface: one live render resource           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use playground_editor::{Buffer, EngineOptions, ObjectUrlSurface, PreviewEngine};
//!
//! let mut engine = PreviewEngine::new(
//!     EngineOptions::default(),
//!     vec![Buffer::realtime("markup", ""), Buffer::realtime("style", "")],
//!     ObjectUrlSurface::new(),
//! )?;
//!
//! engine.apply_edit("markup", "<p>hi</p>", Instant::now())?;
//!
//! // Later, from the event loop
//! if let Some(report) = engine.tick(Instant::now())? {
//!     println!("rendered v{}", report.version);
//! }
//! ```

mod buffers;
mod errors;
pub mod export;
mod pipeline;
mod scheduler;
mod session;
pub mod surface;

pub use buffers::{Buffer, CommitMode, SourceBufferSet, MARKUP_BUFFER, STYLE_BUFFER};
pub use errors::{EditorError, EditorResult};
pub use export::{ExportAction, ExportArtifact, ExportError, ExportFile, RemoteOptions};
pub use pipeline::{EditOutcome, EngineOptions, PreviewEngine, RecomputeReport};
pub use scheduler::{ChangeScheduler, Trigger, DEFAULT_QUIET_INTERVAL};
pub use session::{SessionState, Snapshot};
pub use surface::{
    FileSurface, ObjectUrl, ObjectUrlSurface, PreviewSurfaceManager, SrcdocSurface,
    SurfaceBackend, SurfaceError, SurfaceState,
};

// Re-export for embedders configuring the engine
pub use playground_compiler_css::ScopeSelector;
