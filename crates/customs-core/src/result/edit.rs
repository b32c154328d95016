//! Edits from the result editor.
//!
//! Malformed input never clears a field: the edit is ignored and the
//! previous value stays.

use serde_json::Value;

use super::record::{ProcessingResult, count_from_value};

/// One field edit, carrying the raw text typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultEdit {
    /// JSON text for the general entity.
    GeneralEntity(String),
    /// Comma-separated gross weights.
    GrossWeights(String),
    AverageGrossWeight(String),
    /// Comma-separated prices.
    Prices(String),
    AveragePrice(String),
    LineItemCount(String),
}

impl ProcessingResult {
    /// Apply an edit. Returns `false` when the text was rejected.
    pub fn apply(&mut self, edit: ResultEdit) -> bool {
        match edit {
            ResultEdit::GeneralEntity(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => {
                    self.general_entity = value;
                    true
                }
                Err(_) => false,
            },
            ResultEdit::GrossWeights(text) => {
                self.gross_weight_list = parse_number_list(&text);
                true
            }
            ResultEdit::Prices(text) => {
                self.price_list = parse_number_list(&text);
                true
            }
            ResultEdit::AverageGrossWeight(text) => {
                set_if_parsed(&mut self.average_gross_weight, parse_number(&text))
            }
            ResultEdit::AveragePrice(text) => {
                set_if_parsed(&mut self.average_price, parse_number(&text))
            }
            ResultEdit::LineItemCount(text) => set_if_parsed(
                &mut self.line_item_count,
                count_from_value(&Value::String(text)),
            ),
        }
    }
}

/// Split on commas, keeping the pieces that parse as finite numbers.
fn parse_number_list(text: &str) -> Vec<f64> {
    text.split(',').filter_map(parse_number).collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn set_if_parsed<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    match parsed {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}
