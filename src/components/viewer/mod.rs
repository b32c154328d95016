//! Paged document viewer.
//!
//! PDFs are embedded from their object URL; spreadsheets show the first
//! sheet as a table once decoded.

mod hook;

use customs_core::preview::{CellValue, Direction, Grid};
use customs_core::FileKind;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, CurrentPreview};
use crate::components::icons as ic;
use hook::use_viewer_data;

stylance::import_crate_style!(css, "src/components/viewer/viewer.module.css");

#[component]
pub fn DocumentViewer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let data = use_viewer_data();

    // Object URLs must not outlive the page that displays them
    on_cleanup(move || ctx.workspace.dispose());

    view! {
        <div class=css::viewer>
            <div class=css::toolbar>
                <button
                    class=css::pageButton
                    title="Previous document"
                    disabled=move || !data.can_page.get()
                    on:click=move |_| ctx.workspace.advance(Direction::Previous)
                >
                    <Icon icon=ic::CHEVRON_LEFT />
                </button>
                <span class=css::counter>
                    {move || match data.position.get() {
                        Some((cursor, len)) => format!("{} / {}", cursor + 1, len),
                        None => "0 / 0".to_string(),
                    }}
                </span>
                <button
                    class=css::pageButton
                    title="Next document"
                    disabled=move || !data.can_page.get()
                    on:click=move |_| ctx.workspace.advance(Direction::Next)
                >
                    <Icon icon=ic::CHEVRON_RIGHT />
                </button>
                <span class=css::docName>
                    {move || data.current.get().map(|c| c.name).unwrap_or_default()}
                </span>
            </div>

            <div class=css::body>
                {move || match data.current.get() {
                    None => view! {
                        <p class=css::placeholder>"Upload documents to preview them here."</p>
                    }.into_any(),
                    Some(preview) => match preview.kind {
                        FileKind::Pdf => view! { <PdfPreview preview=preview /> }.into_any(),
                        FileKind::Tabular => view! { <SheetPreview preview=preview /> }.into_any(),
                        FileKind::Unsupported => view! {
                            <p class=css::placeholder>"Preview not supported for this file type."</p>
                        }.into_any(),
                    },
                }}
            </div>
        </div>
    }
}

#[component]
fn PdfPreview(preview: CurrentPreview) -> impl IntoView {
    match preview.url {
        Some(url) => {
            let href = url.clone();
            view! {
                <object class=css::pdfFrame data=url type="application/pdf">
                    <p class=css::placeholder>
                        "This browser cannot display PDFs inline. "
                        <a href=href target="_blank" rel="noopener noreferrer">
                            "Open in a new tab " <Icon icon=ic::EXTERNAL_LINK />
                        </a>
                    </p>
                </object>
            }
            .into_any()
        }
        None => view! { <p class=css::placeholder>"Preview unavailable."</p> }.into_any(),
    }
}

#[component]
fn SheetPreview(preview: CurrentPreview) -> impl IntoView {
    let Some(rows) = preview.rows else {
        return view! { <p class=css::placeholder>"Loading..."</p> }.into_any();
    };
    if rows.is_empty() {
        return view! { <p class=css::placeholder>"The first sheet is empty."</p> }.into_any();
    }

    let shown = rows.len();
    let total = preview.total_rows;

    view! {
        <div class=css::tableWrap>
            <SheetTable rows=rows />
        </div>
        {(total > shown).then(|| view! {
            <p class=css::truncated>{format!("Showing {shown} of {total} rows")}</p>
        })}
    }
    .into_any()
}

#[component]
fn SheetTable(rows: Grid) -> impl IntoView {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = rows.into_iter();
    let head = rows.next().unwrap_or_default();

    view! {
        <table class=css::sheet>
            <thead>
                <tr>{padded(head, width).map(|cell| view! { <th>{cell.to_string()}</th> }).collect_view()}</tr>
            </thead>
            <tbody>
                {rows
                    .map(|row| view! {
                        <tr>{padded(row, width).map(|cell| view! { <td>{cell.to_string()}</td> }).collect_view()}</tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// Pad a ragged row with empty cells.
fn padded(row: Vec<CellValue>, width: usize) -> impl Iterator<Item = CellValue> {
    let missing = width.saturating_sub(row.len());
    row.into_iter().chain(std::iter::repeat_n(CellValue::Empty, missing))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_pdf_preview_embeds_and_links_object_url() {
        let preview = CurrentPreview {
            name: "invoice.pdf".to_string(),
            kind: FileKind::Pdf,
            url: Some("blob:http://localhost/1234".to_string()),
            rows: None,
            total_rows: 0,
        };

        leptos::mount::mount_to_body(move || view! { <PdfPreview preview=preview.clone() /> });

        let object = document().query_selector("object").unwrap().expect("pdf object");
        assert_eq!(object.get_attribute("data").as_deref(), Some("blob:http://localhost/1234"));
        let link = object.query_selector("a").unwrap().expect("fallback link");
        assert_eq!(link.get_attribute("href").as_deref(), Some("blob:http://localhost/1234"));
    }
}
