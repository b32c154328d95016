//! Page layout.
//!
//! Left column holds the uploader and the document viewer; the right column
//! holds the result editor.

use leptos::prelude::*;

use super::editor::ResultEditor;
use super::header::Header;
use super::uploader::FileUploader;
use super::viewer::DocumentViewer;

stylance::import_crate_style!(css, "src/components/shell.module.css");

#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class=css::shell>
            <Header />
            <main class=css::main>
                <section class=css::documents>
                    <FileUploader />
                    <DocumentViewer />
                </section>
                <section class=css::result>
                    <ResultEditor />
                </section>
            </main>
        </div>
    }
}
