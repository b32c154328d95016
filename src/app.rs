//! Root application module.
//!
//! Contains the main App component, AppContext definition, WorkspaceState,
//! ResultState, and application-level setup logic following Leptos
//! conventions.

use customs_core::preview::{DecodeOutcome, Direction, Grid, PreviewCache};
use customs_core::{FileKind, ProcessingResult, ResultEdit};
use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::components::Shell;
use crate::config::{COPY_NOTICE_MS, MAX_PREVIEW_ROWS, form_prefill};
use crate::platform::{FileDecoder, ObjectUrls, file_handle};
use crate::utils::{dom, process_documents};

/// Preview cache over browser files.
pub type FileCache = PreviewCache<File, ObjectUrls>;

// ============================================================================
// WorkspaceState
// ============================================================================

/// One row of the upload list.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSummary {
    pub name: String,
    pub byte_len: u64,
    pub kind: FileKind,
}

/// Renderable state of the file under the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentPreview {
    pub name: String,
    pub kind: FileKind,
    /// Object URL of the raw bytes.
    pub url: Option<String>,
    /// Leading rows of the decoded sheet; `None` until decoding finishes.
    pub rows: Option<Grid>,
    /// Total row count of the decoded sheet.
    pub total_rows: usize,
}

/// Selected files and their preview cache.
///
/// The cache is not reactive and holds `!Send` browser handles, so it lives
/// in local storage; `revision` is bumped on every change that should
/// re-render.
///
/// # Note
///
/// This struct is `Copy` because both fields are arena handles.
#[derive(Clone, Copy)]
pub struct WorkspaceState {
    cache: StoredValue<FileCache, LocalStorage>,
    /// Change counter for the cache contents.
    pub revision: RwSignal<u64>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new_local(PreviewCache::new(ObjectUrls)),
            revision: RwSignal::new(0),
        }
    }

    /// Run a mutation on the cache and notify readers.
    fn mutate<R>(&self, f: impl FnOnce(&mut FileCache) -> R) -> Option<R> {
        let out = self.cache.try_update_value(f);
        self.revision.update(|r| *r += 1);
        out
    }

    /// Read from the cache, subscribing to changes.
    fn read<R>(&self, f: impl FnOnce(&FileCache) -> R) -> Option<R> {
        self.revision.track();
        self.cache.try_with_value(f)
    }

    /// Add dropped or picked files; unsupported formats are ignored.
    pub fn add_files(&self, files: Vec<File>) {
        let offered = files.len();
        let accepted = self
            .mutate(|cache| cache.append(files.into_iter().map(file_handle)))
            .unwrap_or(0);
        if accepted < offered {
            info!("upload: ignored {} unsupported file(s)", offered - accepted);
        }
    }

    pub fn remove(&self, index: usize) {
        self.mutate(|cache| cache.remove_at(index));
    }

    pub fn advance(&self, direction: Direction) {
        self.mutate(|cache| cache.advance(direction));
    }

    pub fn focus(&self, index: usize) {
        self.mutate(|cache| cache.focus(index));
    }

    /// Release every preview resource.
    pub fn dispose(&self) {
        self.cache.try_update_value(|cache| cache.dispose());
    }

    pub fn files(&self) -> Vec<FileSummary> {
        self.read(|cache| {
            cache
                .selection()
                .iter()
                .map(|f| FileSummary {
                    name: f.name().to_string(),
                    byte_len: f.byte_len(),
                    kind: f.kind(),
                })
                .collect()
        })
        .unwrap_or_default()
    }

    /// `(cursor, len)` when something is selected.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.read(|cache| cache.cursor().map(|c| (c, cache.selection().len())))
            .flatten()
    }

    /// Browser files in selection order, for upload.
    pub fn blobs(&self) -> Vec<File> {
        self.cache
            .try_with_value(|cache| cache.selection().iter().map(|f| f.blob().clone()).collect())
            .unwrap_or_default()
    }

    /// Preview of the file under the cursor.
    ///
    /// Creates the artifact on first access and starts its decode if the
    /// file is a spreadsheet.
    pub fn current(&self) -> Option<CurrentPreview> {
        self.revision.track();
        let (name, lookup) = self
            .cache
            .try_update_value(|cache| {
                let name = cache.current()?.name().to_string();
                Some((name, cache.get_current()?))
            })
            .flatten()?;

        if let Some(job) = lookup.decode {
            let cache = self.cache;
            let revision = self.revision;
            spawn_local(async move {
                let done = job.run(&FileDecoder).await;
                let outcome = cache.try_update_value(|c| c.complete(done));
                if outcome == Some(DecodeOutcome::Applied) {
                    revision.update(|r| *r += 1);
                }
            });
        }

        let artifact = lookup.artifact;
        let grid = artifact.tabular_data();
        Some(CurrentPreview {
            name,
            kind: artifact.kind(),
            url: artifact.display_handle().map(|h| h.to_string()),
            rows: grid.map(|g| g.iter().take(MAX_PREVIEW_ROWS).cloned().collect()),
            total_rows: grid.map_or(0, Vec::len),
        })
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ResultState
// ============================================================================

/// Processing request state and the editable result.
#[derive(Clone, Copy)]
pub struct ResultState {
    pub data: RwSignal<Option<ProcessingResult>>,
    /// Last user-visible failure message.
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    /// Short-lived confirmation (e.g. "Copied").
    pub notice: RwSignal<Option<String>>,
}

impl ResultState {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            notice: RwSignal::new(None),
        }
    }

    /// Send the selected files to the processing service.
    ///
    /// No retry; a failure becomes the error message.
    pub fn process(&self, files: Vec<File>) {
        if files.is_empty() || self.loading.get_untracked() {
            return;
        }
        let state = *self;
        state.loading.set(true);
        state.error.set(None);

        spawn_local(async move {
            match process_documents(&files).await {
                Ok(result) => {
                    info!("process: received result");
                    state.data.set(Some(result));
                }
                Err(e) => {
                    error!("process: {}", e);
                    state.error.set(Some(e.to_string()));
                }
            }
            state.loading.set(false);
        });
    }

    /// Apply an editor change. Malformed input is ignored.
    pub fn edit(&self, edit: ResultEdit) {
        self.data.update(|data| {
            if let Some(result) = data
                && !result.apply(edit)
            {
                log::debug!("editor: ignored malformed input");
            }
        });
    }

    /// Whether Reset is available: a result exists and no request is in
    /// flight.
    pub fn can_reset(&self) -> bool {
        reset_allowed(self.loading.get(), self.data.with(Option::is_some))
    }

    /// Clear the result. Ignored while a request is in flight, since its
    /// response would bring the result back.
    pub fn reset(&self) {
        if reset_allowed(self.loading.get_untracked(), self.data.with_untracked(Option::is_some)) {
            self.data.set(None);
        }
    }

    /// Copy the whole result as pretty JSON.
    pub fn copy_json(&self) {
        let Some(text) = self
            .data
            .with_untracked(|data| data.as_ref().map(|r| r.to_pretty_json()))
        else {
            return;
        };
        let text = match text {
            Ok(text) => text,
            Err(e) => {
                warn!("export: {}", e);
                return;
            }
        };

        let notice = self.notice;
        spawn_local(async move {
            match dom::write_clipboard(&text).await {
                Ok(()) => {
                    notice.set(Some("Copied".to_string()));
                    gloo_timers::future::TimeoutFuture::new(COPY_NOTICE_MS).await;
                    notice.set(None);
                }
                Err(e) => warn!("export: {}", e),
            }
        });
    }

    /// Open the external form pre-filled from the result.
    pub fn open_form(&self) {
        let url = self
            .data
            .with_untracked(|data| data.as_ref().map(|r| form_prefill().build(r)));
        match url {
            Some(Ok(url)) => {
                if !dom::open_in_new_tab(url.as_str()) {
                    warn!("export: popup blocked for {}", url);
                }
            }
            Some(Err(e)) => {
                error!("export: {}", e);
                self.error.set(Some(e.to_string()));
            }
            None => {}
        }
    }
}

fn reset_allowed(loading: bool, has_result: bool) -> bool {
    has_result && !loading
}

impl Default for ResultState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **Workspace**: Selected files, view cursor, preview cache
/// - **Result**: Processing request status and the editable result
#[derive(Clone, Copy)]
pub struct AppContext {
    pub workspace: WorkspaceState,
    pub result: ResultState,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            workspace: WorkspaceState::new(),
            result: ResultState::new(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Renders the main Shell component
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    font-family: system-ui, sans-serif;
                ">
                    <h1 style="color: #c0392b; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="color: #c0392b; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                        style="padding: 0.5rem 1.5rem; cursor: pointer;"
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Shell />
        </ErrorBoundary>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_needs_result_and_idle_request() {
        assert!(reset_allowed(false, true));
        assert!(!reset_allowed(true, true));
        assert!(!reset_allowed(false, false));
        assert!(!reset_allowed(true, false));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_reset_is_ignored_while_processing() {
        let state = ResultState::new();
        state.data.set(Some(ProcessingResult::default()));
        state.loading.set(true);

        assert!(!state.can_reset());
        state.reset();
        assert!(state.data.get_untracked().is_some());

        state.loading.set(false);
        assert!(state.can_reset());
        state.reset();
        assert!(state.data.get_untracked().is_none());
    }
}
