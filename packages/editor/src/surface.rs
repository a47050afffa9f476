//! # Preview Surface
//!
//! The isolated surface the composed document is rendered into, and the
//! transient resource backing it (an object URL, a file, ...).
//!
//! ```text
//! Empty ──render──▶ Rendering ──▶ Rendered ──render──▶ Rendering ──▶ Rendered ...
//! ```
//!
//! A render allocates the new resource, installs it, and only then releases
//! the previous one, so the surface never shows a blank state and at most
//! one resource is live once `render` returns.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to allocate render resource: {0}")]
    Allocation(String),

    #[error("Failed to install render resource: {0}")]
    Install(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A rendering technology able to back a preview surface
pub trait SurfaceBackend {
    /// Handle to the transient resource backing the surface
    type Resource: fmt::Debug;

    /// Create a resource holding `document`
    fn allocate(&mut self, document: &str) -> SurfaceResult<Self::Resource>;

    /// Make the surface display `resource`
    fn install(&mut self, resource: &Self::Resource) -> SurfaceResult<()>;

    /// Free a resource that no longer backs the surface
    fn release(&mut self, resource: Self::Resource);

    /// Make the surface display nothing
    fn uninstall(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Empty,
    Rendering,
    Rendered,
}

/// Owns a surface backend and the single resource currently installed in it
pub struct PreviewSurfaceManager<B: SurfaceBackend> {
    backend: B,
    current: Option<B::Resource>,
    state: SurfaceState,
    allocated: u64,
    released: u64,
}

impl<B: SurfaceBackend> PreviewSurfaceManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
            state: SurfaceState::Empty,
            allocated: 0,
            released: 0,
        }
    }

    /// Install `document` as the surface content.
    ///
    /// On failure the previously installed resource stays live and the
    /// state goes back to what it was.
    pub fn render(&mut self, document: &str) -> SurfaceResult<()> {
        let previous_state = self.state;
        self.state = SurfaceState::Rendering;

        let resource = match self.backend.allocate(document) {
            Ok(resource) => resource,
            Err(e) => {
                warn!(error = %e, "Render resource allocation failed, keeping previous surface");
                self.state = previous_state;
                return Err(e);
            }
        };
        self.allocated += 1;

        if let Err(e) = self.backend.install(&resource) {
            warn!(error = %e, "Render resource install failed, keeping previous surface");
            self.release(resource);
            self.state = previous_state;
            return Err(e);
        }

        debug!(resource = ?resource, bytes = document.len(), "Installed render resource");
        if let Some(old) = self.current.replace(resource) {
            self.release(old);
        }

        self.state = SurfaceState::Rendered;
        Ok(())
    }

    /// Release the current resource and return to `Empty`
    pub fn clear(&mut self) {
        if let Some(resource) = self.current.take() {
            self.backend.uninstall();
            self.release(resource);
        }
        self.state = SurfaceState::Empty;
    }

    fn release(&mut self, resource: B::Resource) {
        debug!(resource = ?resource, "Releasing render resource");
        self.backend.release(resource);
        self.released += 1;
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn current(&self) -> Option<&B::Resource> {
        self.current.as_ref()
    }

    /// Resources allocated and not yet released
    pub fn live_resources(&self) -> u64 {
        self.allocated - self.released
    }

    pub fn released_resources(&self) -> u64 {
        self.released
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: SurfaceBackend> Drop for PreviewSurfaceManager<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Handle to an object URL, e.g. `blob:playground/3`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectUrl(pub String);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Surface whose frame `src` points at a revocable object URL
#[derive(Debug, Default)]
pub struct ObjectUrlSurface {
    next_id: u64,
    objects: BTreeMap<ObjectUrl, String>,
    src: Option<ObjectUrl>,
}

impl ObjectUrlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL the frame currently shows
    pub fn src(&self) -> Option<&ObjectUrl> {
        self.src.as_ref()
    }

    /// Document behind a URL that has not been revoked
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&str> {
        self.objects.get(url).map(String::as_str)
    }

    /// URLs created and not yet revoked
    pub fn live_urls(&self) -> usize {
        self.objects.len()
    }
}

impl SurfaceBackend for ObjectUrlSurface {
    type Resource = ObjectUrl;

    fn allocate(&mut self, document: &str) -> SurfaceResult<ObjectUrl> {
        self.next_id += 1;
        let url = ObjectUrl(format!("blob:playground/{}", self.next_id));
        self.objects.insert(url.clone(), document.to_string());
        Ok(url)
    }

    fn install(&mut self, resource: &ObjectUrl) -> SurfaceResult<()> {
        if !self.objects.contains_key(resource) {
            return Err(SurfaceError::Install(format!("{} was revoked", resource)));
        }
        self.src = Some(resource.clone());
        Ok(())
    }

    fn release(&mut self, resource: ObjectUrl) {
        self.objects.remove(&resource);
    }

    fn uninstall(&mut self) {
        self.src = None;
    }
}

/// Surface whose frame content is assigned directly as a document string
#[derive(Debug, Default)]
pub struct SrcdocSurface {
    srcdoc: Option<String>,
}

impl SrcdocSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn srcdoc(&self) -> Option<&str> {
        self.srcdoc.as_deref()
    }
}

impl SurfaceBackend for SrcdocSurface {
    type Resource = String;

    fn allocate(&mut self, document: &str) -> SurfaceResult<String> {
        Ok(document.to_string())
    }

    fn install(&mut self, resource: &String) -> SurfaceResult<()> {
        self.srcdoc = Some(resource.clone());
        Ok(())
    }

    // The document lives in the frame itself; nothing to free
    fn release(&mut self, _resource: String) {}

    fn uninstall(&mut self) {
        self.srcdoc = None;
    }
}

/// Host page file that frames the current preview file
pub const FILE_SURFACE_INDEX: &str = "index.html";

/// Surface backed by files in a directory: each render writes
/// `preview-<n>.html`, and `index.html` frames the current one.
///
/// Preview files and the index left behind by an earlier run in the same
/// directory are removed when the surface is created.
#[derive(Debug)]
pub struct FileSurface {
    dir: PathBuf,
    next_id: u64,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> SurfaceResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let surface = Self { dir, next_id: 0 };
        surface.remove_stale_files()?;
        Ok(surface)
    }

    fn remove_stale_files(&self) -> SurfaceResult<()> {
        let staging = staging_name();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };

            if is_preview_file(name) || name == FILE_SURFACE_INDEX || name == staging {
                debug!(file = name, "Removing stale preview file");
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(FILE_SURFACE_INDEX)
    }
}

impl SurfaceBackend for FileSurface {
    type Resource = PathBuf;

    fn allocate(&mut self, document: &str) -> SurfaceResult<PathBuf> {
        self.next_id += 1;
        let path = self.dir.join(format!("preview-{}.html", self.next_id));
        fs::write(&path, document)?;
        Ok(path)
    }

    fn install(&mut self, resource: &PathBuf) -> SurfaceResult<()> {
        let file_name = resource
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SurfaceError::Install(format!("{} has no file name", resource.display())))?;

        let index = format!(
            "<!DOCTYPE html>\n<html>\n<body style=\"margin:0\">\n<iframe src=\"{}\" style=\"border:0;width:100vw;height:100vh\"></iframe>\n</body>\n</html>\n",
            file_name
        );

        // Swap the index in with a rename so readers never see a partial file
        let staging = self.dir.join(staging_name());
        fs::write(&staging, index)?;
        fs::rename(&staging, self.index_path())?;
        Ok(())
    }

    fn release(&mut self, resource: PathBuf) {
        if let Err(e) = fs::remove_file(&resource) {
            warn!(path = %resource.display(), error = %e, "Failed to remove preview file");
        }
    }

    // An index left in place would frame a deleted file
    fn uninstall(&mut self) {
        let index = self.index_path();
        if let Err(e) = fs::remove_file(&index) {
            warn!(path = %index.display(), error = %e, "Failed to remove preview index");
        }
    }
}

fn staging_name() -> String {
    format!("{}.tmp", FILE_SURFACE_INDEX)
}

/// `preview-<n>.html`
fn is_preview_file(name: &str) -> bool {
    name.strip_prefix("preview-")
        .and_then(|rest| rest.strip_suffix(".html"))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}
