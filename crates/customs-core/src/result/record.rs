//! The processing result record.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ExportError;

/// Matches a Markdown code fence around a JSON payload.
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*\n?(.*?)\s*```\s*$").expect("valid code fence pattern")
});

/// Structured result of `POST /api/process-documents`.
///
/// Metric fields are optional so that a missing snake_case key can fall back
/// to other spellings kept in [`extra`](Self::extra).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Shipping entity extracted from the documents. Usually an object, but
    /// the service may send it as (fenced) JSON text.
    #[serde(default)]
    pub general_entity: Value,
    #[serde(default)]
    pub gross_weight_list: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_gross_weight: Option<f64>,
    #[serde(default)]
    pub price_list: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_item_count: Option<u64>,
    /// Any other top-level keys, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessingResult {
    /// Parse a response body.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// The general entity as a JSON object, if it is one or encodes one.
    pub fn entity_object(&self) -> Option<Map<String, Value>> {
        match &self.general_entity {
            Value::Object(map) => Some(map.clone()),
            Value::String(text) => match serde_json::from_str(strip_code_fence(text)) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            },
            _ => None,
        }
    }

    /// Top-level keys of the record as they would be serialized.
    pub fn top_level(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Pretty-printed JSON of the whole record (clipboard export).
    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Editor text for the general entity.
    pub fn general_entity_text(&self) -> String {
        serde_json::to_string_pretty(&self.general_entity).unwrap_or_default()
    }

    /// Editor text for the gross weights ("1, 2.5, 3").
    pub fn gross_weights_text(&self) -> String {
        join_numbers(&self.gross_weight_list)
    }

    /// Editor text for the prices.
    pub fn prices_text(&self) -> String {
        join_numbers(&self.price_list)
    }
}

/// Remove a surrounding Markdown code fence, if present.
pub fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text.trim(), |body| body.as_str())
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accepts `12`, `12.0`, `"12"`, or null.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

pub(crate) fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const RESPONSE: &str = r#"{
        "general_entity": {"bill_of_lading_number": "MAEU123", "consignee_name": "Acme"},
        "gross_weight_list": [100.0, 200.5],
        "average_gross_weight": 150.25,
        "price_list": [10, 20],
        "average_price": 15,
        "line_item_count": 2
    }"#;

    #[test]
    fn test_parse_response() {
        let result = ProcessingResult::from_json(RESPONSE).unwrap();
        assert_eq!(result.gross_weight_list, vec![100.0, 200.5]);
        assert_eq!(result.average_gross_weight, Some(150.25));
        assert_eq!(result.price_list, vec![10.0, 20.0]);
        assert_eq!(result.line_item_count, Some(2));
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_lenient_count() {
        for body in [
            r#"{"line_item_count": 7}"#,
            r#"{"line_item_count": 7.0}"#,
            r#"{"line_item_count": " 7 "}"#,
        ] {
            let result = ProcessingResult::from_json(body).unwrap();
            assert_eq!(result.line_item_count, Some(7), "{body}");
        }
        let result = ProcessingResult::from_json(r#"{"line_item_count": "n/a"}"#).unwrap();
        assert_eq!(result.line_item_count, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let result = ProcessingResult::from_json("{}").unwrap();
        assert_eq!(result.general_entity, Value::Null);
        assert!(result.gross_weight_list.is_empty());
        assert_eq!(result.average_price, None);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let result = ProcessingResult::from_json(r#"{"lineItemCount": 4}"#).unwrap();
        assert_eq!(result.extra.get("lineItemCount"), Some(&json!(4)));
        assert_eq!(result.top_level().get("lineItemCount"), Some(&json!(4)));
        assert!(!result.top_level().contains_key("line_item_count"));
    }

    #[test]
    fn test_entity_object_from_fenced_string() {
        let result = ProcessingResult {
            general_entity: json!("```json\n{\"container_number\": \"MSCU7654321\"}\n```"),
            ..Default::default()
        };
        let entity = result.entity_object().unwrap();
        assert_eq!(entity.get("container_number"), Some(&json!("MSCU7654321")));
    }

    #[test]
    fn test_entity_object_rejects_non_objects() {
        let result = ProcessingResult {
            general_entity: json!("not json at all"),
            ..Default::default()
        };
        assert!(result.entity_object().is_none());
        let result = ProcessingResult {
            general_entity: json!([1, 2]),
            ..Default::default()
        };
        assert!(result.entity_object().is_none());
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_pretty_json_round_trips_values() {
        let result = ProcessingResult::from_json(RESPONSE).unwrap();
        let text = result.to_pretty_json().unwrap();
        assert!(text.contains("\n  \"gross_weight_list\""));
        assert_eq!(ProcessingResult::from_json(&text).unwrap(), result);
    }

    #[test]
    fn test_editor_texts() {
        let result = ProcessingResult::from_json(RESPONSE).unwrap();
        assert_eq!(result.gross_weights_text(), "100, 200.5");
        assert_eq!(result.prices_text(), "10, 20");
        assert!(result.general_entity_text().contains("\"consignee_name\": \"Acme\""));
    }
}
