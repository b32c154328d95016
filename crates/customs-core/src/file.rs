//! File handles supplied by the file source.
//!
//! A [`FileHandle`] is an opaque, cheaply clonable reference to one
//! user-supplied file. Identity is assigned at construction: two handles
//! built from identical name and size are still distinct, while clones of a
//! handle share its identity.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::format::{FileKind, classify};

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`FileHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        Self(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct FileEntry<B> {
    id: FileId,
    name: String,
    byte_len: u64,
    mime_hint: String,
    blob: B,
}

/// Reference to one user-supplied file's bytes, name, and declared type.
///
/// `B` is the platform blob: `web_sys::File` in the browser, `Vec<u8>`
/// natively.
pub struct FileHandle<B> {
    inner: Rc<FileEntry<B>>,
}

impl<B> FileHandle<B> {
    /// Wraps a blob with its metadata under a fresh identity.
    pub fn new(name: impl Into<String>, mime_hint: impl Into<String>, byte_len: u64, blob: B) -> Self {
        Self {
            inner: Rc::new(FileEntry {
                id: FileId::next(),
                name: name.into(),
                byte_len,
                mime_hint: mime_hint.into(),
                blob,
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> FileId {
        self.inner.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.inner.byte_len
    }

    #[inline]
    pub fn mime_hint(&self) -> &str {
        &self.inner.mime_hint
    }

    #[inline]
    pub fn blob(&self) -> &B {
        &self.inner.blob
    }

    /// Format classification of this file.
    pub fn kind(&self) -> FileKind {
        classify(self.name(), self.mime_hint())
    }
}

impl FileHandle<Vec<u8>> {
    /// Builds an in-memory handle whose length is taken from the bytes.
    pub fn from_bytes(name: impl Into<String>, mime_hint: impl Into<String>, bytes: Vec<u8>) -> Self {
        let len = bytes.len() as u64;
        Self::new(name, mime_hint, len, bytes)
    }
}

impl<B> Clone for FileHandle<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B> PartialEq for FileHandle<B> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<B> Eq for FileHandle<B> {}

impl<B> fmt::Debug for FileHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("byte_len", &self.byte_len())
            .field("mime_hint", &self.mime_hint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_per_construction() {
        let a = FileHandle::from_bytes("a.pdf", "", vec![1, 2, 3]);
        let b = FileHandle::from_bytes("a.pdf", "", vec![1, 2, 3]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.byte_len(), 3);
    }

    #[test]
    fn test_kind_uses_name_and_mime() {
        let sheet = FileHandle::from_bytes("Invoice.XLS", "", Vec::new());
        assert_eq!(sheet.kind(), FileKind::Tabular);
        let pdf = FileHandle::from_bytes("scan", "application/pdf", Vec::new());
        assert_eq!(pdf.kind(), FileKind::Pdf);
    }
}
