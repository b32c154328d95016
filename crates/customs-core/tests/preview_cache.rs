//! Preview cache lifecycle tests: selection-bounded artifacts, handle
//! release, and late decode completions.

use std::cell::RefCell;
use std::collections::HashSet;
use std::future::{self, Future};
use std::rc::Rc;

use customs_core::preview::{
    CellValue, DecodeOutcome, DisplayHandle, DisplayHandles, Grid, PreviewCache, TabularDecoder,
};
use customs_core::{DecodeError, FileHandle, FileId, PreviewError};

type Bytes = Vec<u8>;

/// Display-handle backend that hands out unique values and records releases.
#[derive(Default)]
struct RecordingHandles {
    issued: u64,
    live: HashSet<DisplayHandle>,
    released: Vec<DisplayHandle>,
}

impl DisplayHandles<Bytes> for RecordingHandles {
    fn acquire(&mut self, file: &FileHandle<Bytes>) -> Result<DisplayHandle, PreviewError> {
        self.issued += 1;
        let handle = DisplayHandle::new(format!("blob:{}/{}", file.name(), self.issued));
        self.live.insert(handle.clone());
        Ok(handle)
    }

    fn release(&mut self, handle: &DisplayHandle) {
        assert!(self.live.remove(handle), "released unknown handle {handle}");
        self.released.push(handle.clone());
    }
}

/// Decoder that returns a fixed grid and counts invocations.
#[derive(Clone, Default)]
struct FixedDecoder {
    calls: Rc<RefCell<u32>>,
    fail: bool,
}

impl FixedDecoder {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl TabularDecoder<Bytes> for FixedDecoder {
    fn decode(&self, file: &FileHandle<Bytes>) -> impl Future<Output = Result<Grid, DecodeError>> {
        *self.calls.borrow_mut() += 1;
        let result = if self.fail {
            Err(DecodeError::Workbook("corrupt".to_string()))
        } else {
            Ok(vec![
                vec![CellValue::Text("file".into()), CellValue::Text(file.name().into())],
                vec![CellValue::Text("gross kg".into()), CellValue::Number(1250.5)],
            ])
        };
        future::ready(result)
    }
}

fn file(name: &str) -> FileHandle<Bytes> {
    FileHandle::from_bytes(name, "", name.as_bytes().to_vec())
}

fn new_cache() -> PreviewCache<Bytes, RecordingHandles> {
    PreviewCache::new(RecordingHandles::default())
}

fn ids(files: &[FileHandle<Bytes>]) -> HashSet<FileId> {
    files.iter().map(FileHandle::id).collect()
}

#[test]
fn live_artifacts_track_selection_across_selects() {
    let pool: Vec<_> = ["a.pdf", "b.xlsx", "c.pdf", "d.xls", "e.pdf"]
        .into_iter()
        .map(file)
        .collect();
    let rounds: [&[usize]; 5] = [&[0, 1, 2], &[1, 2, 3], &[4], &[], &[0, 4, 2]];

    let mut cache = new_cache();
    for round in rounds {
        let chosen: Vec<_> = round.iter().map(|&i| pool[i].clone()).collect();
        cache.select(chosen.clone());
        for f in &chosen {
            let _ = cache.get(f).expect("selected file");
        }

        let cached: HashSet<_> = cache.cached_files().collect();
        assert_eq!(cached, ids(&chosen));
        assert_eq!(cache.handles().live.len(), chosen.len());
    }
}

#[test]
fn select_releases_only_dropped_files() {
    let a = file("A.pdf");
    let b = file("B.xlsx");
    let mut cache = new_cache();
    cache.select(vec![a.clone(), b.clone()]);

    let a_handle = cache.get(&a).unwrap().artifact.display_handle().cloned().unwrap();
    let b_artifact = cache.get(&b).unwrap().artifact;

    cache.select(vec![b.clone()]);

    assert_eq!(cache.handles().released, vec![a_handle]);
    assert!(!cache.is_cached(&a));
    let b_again = cache.get(&b).unwrap();
    assert!(Rc::ptr_eq(&b_artifact, &b_again.artifact));
    assert!(b_again.decode.is_none());
}

#[tokio::test]
async fn deselect_keeps_decoded_grid_of_remaining_file() {
    let a = file("A.pdf");
    let b = file("B.xlsx");
    let decoder = FixedDecoder::default();
    let mut cache = new_cache();
    cache.select(vec![a.clone(), b.clone()]);

    cache.get(&a).unwrap();
    let lookup = cache.get(&b).unwrap();
    let done = lookup.decode.expect("tabular file gets a decode job").run(&decoder).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Applied);

    cache.select(vec![b.clone()]);

    let grid = lookup.artifact.tabular_data().expect("grid survives");
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[0][1], CellValue::Text("B.xlsx".into()));
    assert_eq!(cache.handles().released.len(), 1);
}

#[tokio::test]
async fn repeated_get_before_decode_shares_one_artifact() {
    let x = file("x.xlsx");
    let y = file("y.xlsx");
    let decoder = FixedDecoder::default();
    let mut cache = new_cache();
    cache.select(vec![x.clone(), y.clone()]);

    let first = cache.get(&x).unwrap();
    let second = cache.get(&x).unwrap();
    assert!(Rc::ptr_eq(&first.artifact, &second.artifact));
    assert!(second.decode.is_none());
    assert!(first.artifact.tabular_data().is_none());

    let done = first.decode.unwrap().run(&decoder).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Applied);

    assert_eq!(*decoder.calls.borrow(), 1);
    assert!(second.artifact.tabular_data().is_some());
    assert_eq!(cache.handles().issued, 1);
}

#[tokio::test]
async fn late_completion_after_deselect_is_discarded() {
    let sheet = file("late.xlsx");
    let decoder = FixedDecoder::default();
    let mut cache = new_cache();
    cache.select(vec![sheet.clone()]);

    let lookup = cache.get(&sheet).unwrap();
    let job = lookup.decode.unwrap();
    cache.select(Vec::new());

    let done = job.run(&decoder).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Stale);
    assert!(lookup.artifact.tabular_data().is_none());
    assert_eq!(cache.live_artifacts(), 0);
}

#[tokio::test]
async fn late_completion_does_not_fill_reselected_artifact() {
    let sheet = file("again.xlsx");
    let decoder = FixedDecoder::default();
    let mut cache = new_cache();
    cache.select(vec![sheet.clone()]);

    let old_job = cache.get(&sheet).unwrap().decode.unwrap();
    cache.select(Vec::new());
    cache.select(vec![sheet.clone()]);
    let fresh = cache.get(&sheet).unwrap();

    let stale = old_job.run(&decoder).await;
    assert_eq!(cache.complete(stale), DecodeOutcome::Stale);
    assert!(fresh.artifact.tabular_data().is_none());

    let done = fresh.decode.unwrap().run(&decoder).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Applied);
    assert!(fresh.artifact.tabular_data().is_some());
}

#[tokio::test]
async fn late_completion_after_dispose_is_discarded() {
    let sheet = file("disposed.xlsx");
    let decoder = FixedDecoder::default();
    let mut cache = new_cache();
    cache.select(vec![sheet.clone()]);

    let job = cache.get(&sheet).unwrap().decode.unwrap();
    cache.dispose();

    let done = job.run(&decoder).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Stale);
    assert_eq!(cache.live_artifacts(), 0);
}

#[tokio::test]
async fn decode_failure_leaves_artifact_without_data() {
    let sheet = file("broken.xlsx");
    let mut cache = new_cache();
    cache.select(vec![sheet.clone()]);

    let lookup = cache.get(&sheet).unwrap();
    let done = lookup.decode.unwrap().run(&FixedDecoder::failing()).await;
    assert_eq!(cache.complete(done), DecodeOutcome::Failed);
    assert!(lookup.artifact.tabular_data().is_none());
    assert!(cache.is_cached(&sheet));
}

#[test]
fn get_after_dispose_uses_fresh_handle() {
    let doc = file("doc.pdf");
    let mut cache = new_cache();
    cache.select(vec![doc.clone()]);

    let before = cache.get(&doc).unwrap().artifact.display_handle().cloned().unwrap();
    cache.dispose();
    assert_eq!(cache.handles().released, vec![before.clone()]);

    let after = cache.get(&doc).unwrap().artifact.display_handle().cloned().unwrap();
    assert_ne!(before, after);
    assert_eq!(cache.live_artifacts(), 1);
}

#[test]
fn dropping_cache_releases_handles() {
    struct Shared(Rc<RefCell<Vec<DisplayHandle>>>);

    impl DisplayHandles<Bytes> for Shared {
        fn acquire(&mut self, file: &FileHandle<Bytes>) -> Result<DisplayHandle, PreviewError> {
            Ok(DisplayHandle::new(format!("blob:{}", file.id())))
        }

        fn release(&mut self, handle: &DisplayHandle) {
            self.0.borrow_mut().push(handle.clone());
        }
    }

    let released = Rc::new(RefCell::new(Vec::new()));
    let doc = file("doc.pdf");
    {
        let mut cache = PreviewCache::new(Shared(Rc::clone(&released)));
        cache.select(vec![doc.clone()]);
        cache.get(&doc).unwrap();
    }
    assert_eq!(released.borrow().len(), 1);
}

#[test]
fn failed_handle_acquisition_still_caches_artifact() {
    struct Refusing;

    impl DisplayHandles<Bytes> for Refusing {
        fn acquire(&mut self, _file: &FileHandle<Bytes>) -> Result<DisplayHandle, PreviewError> {
            Err(PreviewError::HandleUnavailable("quota".to_string()))
        }

        fn release(&mut self, _handle: &DisplayHandle) {
            panic!("nothing was acquired");
        }
    }

    let doc = file("doc.pdf");
    let mut cache = PreviewCache::new(Refusing);
    cache.select(vec![doc.clone()]);
    let lookup = cache.get(&doc).unwrap();
    assert!(lookup.artifact.display_handle().is_none());

    cache.select(Vec::new());
    assert_eq!(cache.live_artifacts(), 0);
}
