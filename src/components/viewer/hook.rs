//! Derived preview signals for the document viewer.

use leptos::prelude::*;

use crate::app::{AppContext, CurrentPreview};

/// Signals the viewer renders from.
#[derive(Clone, Copy)]
pub struct ViewerData {
    /// Preview of the document under the cursor.
    pub current: Memo<Option<CurrentPreview>>,
    /// `(cursor, len)` of the selection.
    pub position: Signal<Option<(usize, usize)>>,
    /// Whether paging buttons do anything.
    pub can_page: Signal<bool>,
}

pub fn use_viewer_data() -> ViewerData {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let current = Memo::new(move |_| ctx.workspace.current());
    let position = Signal::derive(move || ctx.workspace.position());
    let can_page = Signal::derive(move || position.get().is_some_and(|(_, len)| len > 1));

    ViewerData {
        current,
        position,
        can_page,
    }
}
