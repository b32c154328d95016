//! Logical export fields and fallback-key resolution.
//!
//! The service does not pin down key spelling, so each field lists the keys
//! it accepts in priority order. The first key holding a non-empty value wins.

use std::fmt;

use serde_json::{Map, Value};

use super::record::ProcessingResult;

/// A value exported to the external form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportField {
    BillOfLading,
    ContainerNumber,
    ConsigneeName,
    ConsigneeAddress,
    DateOfExport,
    LineItemCount,
    AverageGrossWeight,
    AveragePrice,
}

impl ExportField {
    /// Every field, in form order.
    pub const ALL: [ExportField; 8] = [
        Self::BillOfLading,
        Self::ContainerNumber,
        Self::ConsigneeName,
        Self::ConsigneeAddress,
        Self::DateOfExport,
        Self::LineItemCount,
        Self::AverageGrossWeight,
        Self::AveragePrice,
    ];

    /// Accepted key spellings, most preferred first.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Self::BillOfLading => &[
                "bill_of_lading_number",
                "billOfLadingNumber",
                "bill_of_lading",
                "billOfLading",
                "bl_number",
                "blNumber",
            ],
            Self::ContainerNumber => &["container_number", "containerNumber", "container_no", "containerNo"],
            Self::ConsigneeName => &["consignee_name", "consigneeName", "consignee"],
            Self::ConsigneeAddress => &["consignee_address", "consigneeAddress"],
            Self::DateOfExport => &["date_of_export", "dateOfExport", "export_date", "exportDate"],
            Self::LineItemCount => &["line_item_count", "lineItemCount"],
            Self::AverageGrossWeight => &["average_gross_weight", "averageGrossWeight"],
            Self::AveragePrice => &["average_price", "averagePrice"],
        }
    }

    /// Whether the value lives inside the general entity rather than at the
    /// top level of the record.
    pub fn is_entity_field(self) -> bool {
        !matches!(
            self,
            Self::LineItemCount | Self::AverageGrossWeight | Self::AveragePrice
        )
    }

    /// Human label for the editor and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::BillOfLading => "Bill of lading number",
            Self::ContainerNumber => "Container number",
            Self::ConsigneeName => "Consignee name",
            Self::ConsigneeAddress => "Consignee address",
            Self::DateOfExport => "Date of export",
            Self::LineItemCount => "Line item count",
            Self::AverageGrossWeight => "Average gross weight",
            Self::AveragePrice => "Average price",
        }
    }
}

impl fmt::Display for ExportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First non-empty value among `keys`, rendered as text.
///
/// Strings count when non-blank, numbers and bools always count; null,
/// arrays, and objects are skipped.
pub fn lookup(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// `150.0` renders as "150", matching what the form expects.
fn number_text(n: &serde_json::Number) -> String {
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => i.to_string(),
        (None, Some(f)) => f.to_string(),
        (None, None) => n.to_string(),
    }
}

/// Resolve a field against a result record.
pub fn resolve(result: &ProcessingResult, field: ExportField) -> Option<String> {
    let source = if field.is_entity_field() {
        result.entity_object()?
    } else {
        result.top_level()
    };
    lookup(&source, field.keys())
}
