//! File selection: drop zone, file picker, and the selected-file list.
//!
//! Only PDF and spreadsheet files are kept; anything else is dropped when
//! added.

use customs_core::format_file_size;
use leptos::ev::{DragEvent, Event};
use leptos::prelude::*;
use leptos_icons::Icon;
use web_sys::HtmlInputElement;

use crate::app::{AppContext, FileSummary};
use crate::components::icons as ic;
use crate::config::ACCEPTED_EXTENSIONS;
use crate::utils::dom::files_from_list;

stylance::import_crate_style!(css, "src/components/uploader/uploader.module.css");

#[component]
pub fn FileUploader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let (dragging, set_dragging) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_drag_leave = move |_: DragEvent| set_dragging.set(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let files = files_from_list(ev.data_transfer().and_then(|dt| dt.files()));
        ctx.workspace.add_files(files);
    };

    let on_change = move |ev: Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        ctx.workspace.add_files(files_from_list(input.files()));
        // Allow picking the same file again
        input.set_value("");
    };

    let on_browse = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class=css::uploader>
            <div
                class=move || {
                    if dragging.get() {
                        format!("{} {}", css::dropZone, css::dropZoneActive)
                    } else {
                        css::dropZone.to_string()
                    }
                }
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
                on:click=on_browse
            >
                <span class=css::dropIcon><Icon icon=ic::UPLOAD /></span>
                <p class=css::dropText>"Drop PDF or Excel files here, or click to browse"</p>
            </div>
            <input
                node_ref=input_ref
                class=css::hiddenInput
                type="file"
                multiple=true
                accept=ACCEPTED_EXTENSIONS
                on:change=on_change
            />

            <Show when=move || !ctx.workspace.files().is_empty()>
                <ul class=css::fileList>
                    {move || {
                        ctx.workspace
                            .files()
                            .into_iter()
                            .enumerate()
                            .map(|(index, file)| view! { <FileRow index=index file=file /> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}

/// One selected file with its size and a remove button.
#[component]
fn FileRow(index: usize, file: FileSummary) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_current =
        Signal::derive(move || ctx.workspace.position().is_some_and(|(cursor, _)| cursor == index));

    view! {
        <li
            class=move || {
                if is_current.get() {
                    format!("{} {}", css::fileRow, css::fileRowCurrent)
                } else {
                    css::fileRow.to_string()
                }
            }
            on:click=move |_| ctx.workspace.focus(index)
        >
            <span class=css::fileIcon><Icon icon=ic::for_kind(file.kind) /></span>
            <span class=css::fileName title=file.name.clone()>{file.name.clone()}</span>
            <span class=css::fileSize>{format_file_size(file.byte_len)}</span>
            <button
                class=css::removeButton
                title="Remove"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.workspace.remove(index);
                }
            >
                <Icon icon=ic::CLOSE />
            </button>
        </li>
    }
}
