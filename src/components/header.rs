//! Application header.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/header.module.css");

/// Title bar with the selection count.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let count = Signal::derive(move || ctx.workspace.position().map_or(0, |(_, len)| len));

    view! {
        <header class=css::header>
            <h1 class=css::title>{APP_NAME}</h1>
            <span class=css::subtitle>
                {move || match count.get() {
                    0 => "No documents selected".to_string(),
                    1 => "1 document".to_string(),
                    n => format!("{n} documents"),
                }}
            </span>
        </header>
    }
}
