//! Result panel: processing controls, editable result fields, and export.
//!
//! Field edits are committed on change. Text that does not parse is
//! dropped and the field snaps back to the stored value.

use customs_core::result::resolve;
use customs_core::{ExportField, ProcessingResult, ResultEdit};
use leptos::ev::Event;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/editor/editor.module.css");

#[component]
pub fn ResultEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let result = ctx.result;

    let has_files = Signal::derive(move || ctx.workspace.position().is_some());
    let has_result = Signal::derive(move || result.data.with(Option::is_some));

    let on_process = move |_: leptos::ev::MouseEvent| result.process(ctx.workspace.blobs());

    view! {
        <div class=css::editor>
            <div class=css::actions>
                <button
                    class=format!("{} {}", css::button, css::primary)
                    disabled=move || !has_files.get() || result.loading.get()
                    on:click=on_process
                >
                    <Icon icon=ic::PLAY />
                    {move || if result.loading.get() { " Processing..." } else { " Process documents" }}
                </button>
                <button
                    class=css::button
                    disabled=move || !result.can_reset()
                    on:click=move |_| result.reset()
                >
                    <Icon icon=ic::RESET />
                    " Reset"
                </button>
            </div>

            {move || result.error.get().map(|message| view! {
                <p class=css::error role="alert">{message}</p>
            })}

            <Show
                when=move || has_result.get()
                fallback=|| view! {
                    <p class=css::placeholder>"Process the selected documents to extract the shipment data."</p>
                }
            >
                <ResultFields />
                <ExportSummary />
                <div class=css::actions>
                    <button class=css::button on:click=move |_| result.copy_json()>
                        <Icon icon=ic::COPY />
                        " Copy JSON"
                    </button>
                    <button class=css::button on:click=move |_| result.open_form()>
                        <Icon icon=ic::EXTERNAL_LINK />
                        " Open form"
                    </button>
                    {move || result.notice.get().map(|notice| view! {
                        <span class=css::notice>{notice}</span>
                    })}
                </div>
            </Show>
        </div>
    }
}

/// Editable fields of the result record.
#[component]
fn ResultFields() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let data = ctx.result.data;

    let text_of = move |f: fn(&ProcessingResult) -> String| {
        Signal::derive(move || data.with(|d| d.as_ref().map(f).unwrap_or_default()))
    };

    view! {
        <div class=css::fields>
            <EditorField
                label="General entity (JSON)"
                value=text_of(ProcessingResult::general_entity_text)
                edit=ResultEdit::GeneralEntity
                multiline=true
            />
            <EditorField
                label="Gross weights"
                value=text_of(ProcessingResult::gross_weights_text)
                edit=ResultEdit::GrossWeights
            />
            <EditorField
                label="Average gross weight"
                value=text_of(|r| optional_text(r.average_gross_weight))
                edit=ResultEdit::AverageGrossWeight
            />
            <EditorField
                label="Prices"
                value=text_of(ProcessingResult::prices_text)
                edit=ResultEdit::Prices
            />
            <EditorField
                label="Average price"
                value=text_of(|r| optional_text(r.average_price))
                edit=ResultEdit::AveragePrice
            />
            <EditorField
                label="Line item count"
                value=text_of(|r| optional_text(r.line_item_count))
                edit=ResultEdit::LineItemCount
            />
        </div>
    }
}

fn optional_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One labelled input bound to a result field.
#[component]
fn EditorField(
    label: &'static str,
    value: Signal<String>,
    edit: fn(String) -> ResultEdit,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let on_change = move |ev: Event| {
        ctx.result.edit(edit(event_target_value(&ev)));
        // Rejected text is not stored; show the stored value again
        ctx.result.data.notify();
    };

    let input = if multiline {
        view! {
            <textarea class=css::textarea rows=8 prop:value=value on:change=on_change />
        }
        .into_any()
    } else {
        view! {
            <input class=css::input type="text" prop:value=value on:change=on_change />
        }
        .into_any()
    };

    view! {
        <label class=css::field>
            <span class=css::label>{label}</span>
            {input}
        </label>
    }
}

/// Values that will be sent to the external form.
#[component]
fn ExportSummary() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let rows = move || {
        ctx.result.data.with(|data| {
            let Some(result) = data else {
                return Vec::new();
            };
            ExportField::ALL
                .into_iter()
                .map(|field| (field, resolve(result, field)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <dl class=css::summary>
            {move || {
                rows()
                    .into_iter()
                    .map(|(field, value)| {
                        let missing = value.is_none();
                        view! {
                            <dt>{field.label()}</dt>
                            <dd class=if missing { css::missing } else { "" }>
                                {summary_text(value)}
                            </dd>
                        }
                    })
                    .collect_view()
            }}
        </dl>
    }
}

/// Display text of a resolved export value.
fn summary_text(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
