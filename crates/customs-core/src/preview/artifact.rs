//! Preview artifacts and the display-handle seam.

use std::cell::OnceCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::tabular::Grid;
use crate::error::PreviewError;
use crate::file::{FileHandle, FileId};
use crate::format::FileKind;

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one artifact instance.
///
/// A handle that is deselected and selected again gets a new artifact with
/// a new id, which is how late decode completions are recognized as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactId(u64);

impl ArtifactId {
    fn next() -> Self {
        Self(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A revocable reference usable for rendering raw bytes (an object URL in
/// the browser).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplayHandle(String);

impl DisplayHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform backend that creates and revokes display handles.
///
/// Only [`PreviewCache`](super::PreviewCache) calls `release`, and only for
/// handles it acquired.
pub trait DisplayHandles<B> {
    /// Create a handle for the file's content.
    fn acquire(&mut self, file: &FileHandle<B>) -> Result<DisplayHandle, PreviewError>;

    /// Revoke a handle previously returned by [`acquire`](Self::acquire).
    fn release(&mut self, handle: &DisplayHandle);
}

/// Cached renderable state for one selected file.
#[derive(Debug)]
pub struct PreviewArtifact {
    id: ArtifactId,
    file: FileId,
    kind: FileKind,
    display: Option<DisplayHandle>,
    tabular: OnceCell<Grid>,
}

impl PreviewArtifact {
    pub(super) fn new(file: FileId, kind: FileKind, display: Option<DisplayHandle>) -> Self {
        Self {
            id: ArtifactId::next(),
            file,
            kind,
            display,
            tabular: OnceCell::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    #[inline]
    pub fn file(&self) -> FileId {
        self.file
    }

    #[inline]
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Handle for rendering the raw bytes, if one could be created.
    #[inline]
    pub fn display_handle(&self) -> Option<&DisplayHandle> {
        self.display.as_ref()
    }

    /// Decoded grid, or `None` while decoding is pending or after it failed.
    ///
    /// An empty grid means the file decoded to zero rows.
    #[inline]
    pub fn tabular_data(&self) -> Option<&Grid> {
        self.tabular.get()
    }

    /// Fill the grid. Returns `false` if it was already set.
    pub(super) fn fill(&self, grid: Grid) -> bool {
        self.tabular.set(grid).is_ok()
    }
}
