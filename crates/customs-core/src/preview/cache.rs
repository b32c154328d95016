//! Selection-bounded cache of preview artifacts.
//!
//! The cache owns the selection, the view cursor, and one artifact per
//! selected file. Artifacts are created lazily by [`PreviewCache::get`] and
//! destroyed as soon as their file leaves the selection.
//!
//! Tabular decoding happens outside the cache: `get` hands out a
//! [`DecodeJob`], the caller drives it to a [`DecodeResult`], and
//! [`PreviewCache::complete`] applies it. A result whose artifact is no longer
//! tracked is dropped.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, warn};

use super::artifact::{ArtifactId, DisplayHandles, PreviewArtifact};
use super::tabular::{Grid, TabularDecoder};
use crate::error::{DecodeError, PreviewError};
use crate::file::{FileHandle, FileId};
use crate::format::FileKind;

/// Cursor movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Token tying a decode result to the artifact that requested it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeTicket {
    file: FileId,
    artifact: ArtifactId,
}

/// Pending tabular decode issued by [`PreviewCache::get`].
#[must_use = "a decode job does nothing unless it is run and completed"]
pub struct DecodeJob<B> {
    ticket: DecodeTicket,
    file: FileHandle<B>,
}

impl<B> DecodeJob<B> {
    pub fn ticket(&self) -> DecodeTicket {
        self.ticket
    }

    pub fn file(&self) -> &FileHandle<B> {
        &self.file
    }

    /// Run the decoder. Feed the result back with [`PreviewCache::complete`].
    pub async fn run<D: TabularDecoder<B>>(self, decoder: &D) -> DecodeResult {
        let result = decoder.decode(&self.file).await;
        DecodeResult {
            ticket: self.ticket,
            result,
        }
    }
}

/// Finished decode, ready to be applied.
#[derive(Debug)]
pub struct DecodeResult {
    pub ticket: DecodeTicket,
    pub result: Result<Grid, DecodeError>,
}

/// What [`PreviewCache::complete`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The grid was stored on the artifact.
    Applied,
    /// Decoding failed; the artifact stays without data.
    Failed,
    /// The artifact is gone (deselected, disposed, or replaced).
    Stale,
}

/// Result of [`PreviewCache::get`].
pub struct Lookup<B> {
    pub artifact: Rc<PreviewArtifact>,
    /// Present only on the call that created a tabular artifact.
    pub decode: Option<DecodeJob<B>>,
}

/// Multi-file preview cache.
pub struct PreviewCache<B, H: DisplayHandles<B>> {
    handles: H,
    selection: Vec<FileHandle<B>>,
    cursor: usize,
    entries: HashMap<FileId, Rc<PreviewArtifact>>,
}

impl<B, H: DisplayHandles<B>> PreviewCache<B, H> {
    /// Creates an empty cache over a display-handle backend.
    pub fn new(handles: H) -> Self {
        Self {
            handles,
            selection: Vec::new(),
            cursor: 0,
            entries: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Replace the selection.
    ///
    /// Artifacts of files absent from `handles` are destroyed before this
    /// returns; artifacts of files still present are kept. The cursor resets
    /// to 0 when it no longer fits.
    pub fn select(&mut self, handles: Vec<FileHandle<B>>) {
        let keep: HashSet<FileId> = handles.iter().map(FileHandle::id).collect();
        let dropped: Vec<FileId> = self
            .entries
            .keys()
            .filter(|id| !keep.contains(id))
            .copied()
            .collect();

        for id in dropped {
            if let Some(artifact) = self.entries.remove(&id) {
                destroy(&mut self.handles, &artifact);
            }
        }

        let old_cursor = self.cursor;
        self.selection = handles;
        if self.selection.len() <= old_cursor {
            self.cursor = 0;
        }
    }

    /// Append files to the selection, silently skipping unsupported formats.
    ///
    /// Returns the number of files accepted.
    pub fn append(&mut self, handles: impl IntoIterator<Item = FileHandle<B>>) -> usize {
        let mut next = self.selection.clone();
        let before = next.len();
        next.extend(handles.into_iter().filter(|h| h.kind().is_accepted()));
        let accepted = next.len() - before;
        if accepted > 0 {
            self.select(next);
        }
        accepted
    }

    /// Remove the file at `index`, releasing its artifact.
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<FileHandle<B>> {
        if index >= self.selection.len() {
            return None;
        }
        let mut next = self.selection.clone();
        let removed = next.remove(index);
        self.select(next);
        Some(removed)
    }

    #[inline]
    pub fn selection(&self) -> &[FileHandle<B>] {
        &self.selection
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    // ------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------

    /// Index of the previewed file; `None` when nothing is selected.
    pub fn cursor(&self) -> Option<usize> {
        (!self.selection.is_empty()).then_some(self.cursor)
    }

    /// The file under the cursor.
    pub fn current(&self) -> Option<&FileHandle<B>> {
        self.selection.get(self.cursor)
    }

    /// Move the cursor circularly. No-op with fewer than two files.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.selection.len();
        if len <= 1 {
            return;
        }
        self.cursor = match direction {
            Direction::Next => (self.cursor + 1) % len,
            Direction::Previous => (self.cursor + len - 1) % len,
        };
    }

    /// Point the cursor at `index`. Returns `false` if out of range.
    pub fn focus(&mut self, index: usize) -> bool {
        if index < self.selection.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------------
    // Artifacts
    // ------------------------------------------------------------------------

    /// Return the artifact for a selected file, creating it on first access.
    ///
    /// Creation allocates the display handle immediately. For tabular files
    /// the creating call also returns the one [`DecodeJob`] for that artifact.
    pub fn get(&mut self, file: &FileHandle<B>) -> Result<Lookup<B>, PreviewError> {
        if let Some(artifact) = self.entries.get(&file.id()) {
            return Ok(Lookup {
                artifact: Rc::clone(artifact),
                decode: None,
            });
        }

        if !self.selection.contains(file) {
            return Err(PreviewError::NotSelected(file.id()));
        }

        let kind = file.kind();
        let display = match self.handles.acquire(file) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("preview: no display handle for {}: {}", file.name(), e);
                None
            }
        };

        let artifact = Rc::new(PreviewArtifact::new(file.id(), kind, display));
        debug!("preview: created artifact for {} ({})", file.name(), kind);

        let decode = (kind == FileKind::Tabular).then(|| DecodeJob {
            ticket: DecodeTicket {
                file: file.id(),
                artifact: artifact.id(),
            },
            file: file.clone(),
        });

        self.entries.insert(file.id(), Rc::clone(&artifact));
        Ok(Lookup { artifact, decode })
    }

    /// [`get`](Self::get) for the file under the cursor.
    pub fn get_current(&mut self) -> Option<Lookup<B>> {
        let file = self.current()?.clone();
        self.get(&file).ok()
    }

    /// Apply a finished decode.
    ///
    /// Results for artifacts that are no longer tracked are discarded.
    pub fn complete(&mut self, done: DecodeResult) -> DecodeOutcome {
        let DecodeResult { ticket, result } = done;

        let Some(artifact) = self
            .entries
            .get(&ticket.file)
            .filter(|artifact| artifact.id() == ticket.artifact)
        else {
            debug!("preview: discarding stale decode for file {}", ticket.file);
            return DecodeOutcome::Stale;
        };

        match result {
            Ok(grid) => {
                let rows = grid.len();
                if artifact.fill(grid) {
                    debug!("preview: decoded {} rows for file {}", rows, ticket.file);
                    DecodeOutcome::Applied
                } else {
                    DecodeOutcome::Stale
                }
            }
            Err(e) => {
                warn!("preview: decode failed for file {}: {}", ticket.file, e);
                DecodeOutcome::Failed
            }
        }
    }

    /// Whether an artifact is cached for `file`.
    pub fn is_cached(&self, file: &FileHandle<B>) -> bool {
        self.entries.contains_key(&file.id())
    }

    /// Files that currently own an artifact.
    pub fn cached_files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.entries.keys().copied()
    }

    #[inline]
    pub fn live_artifacts(&self) -> usize {
        self.entries.len()
    }

    /// The display-handle backend.
    #[inline]
    pub fn handles(&self) -> &H {
        &self.handles
    }

    /// Destroy every cached artifact.
    ///
    /// The selection is kept; a later [`get`](Self::get) starts over with
    /// fresh artifacts and fresh handles.
    pub fn dispose(&mut self) {
        for (_, artifact) in self.entries.drain() {
            destroy(&mut self.handles, &artifact);
        }
    }
}

impl<B, H: DisplayHandles<B>> Drop for PreviewCache<B, H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn destroy<B, H: DisplayHandles<B>>(handles: &mut H, artifact: &PreviewArtifact) {
    if let Some(handle) = artifact.display_handle() {
        handles.release(handle);
    }
    debug!("preview: destroyed artifact for file {}", artifact.file());
}
