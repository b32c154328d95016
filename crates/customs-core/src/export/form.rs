//! Pre-filled link to the external form service.
//!
//! The form accepts one `entry.<ID>=<value>` query parameter per field.

use log::debug;
use url::Url;

use crate::error::ExportError;
use crate::result::{ExportField, ProcessingResult, resolve};

/// Form endpoint plus the entry ID of every exported field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPrefill {
    endpoint: String,
    entries: Vec<(ExportField, String)>,
}

impl FormPrefill {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            entries: Vec::new(),
        }
    }

    /// Map a field to its entry ID (the part after `entry.`).
    pub fn entry(mut self, field: ExportField, id: impl Into<String>) -> Self {
        self.entries.push((field, id.into()));
        self
    }

    /// Build from a static `(field, id)` table.
    pub fn with_entries(endpoint: impl Into<String>, table: &[(ExportField, &str)]) -> Self {
        table
            .iter()
            .fold(Self::new(endpoint), |form, (field, id)| form.entry(*field, *id))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the pre-filled URL. Fields without a value are left out.
    pub fn build(&self, result: &ProcessingResult) -> Result<Url, ExportError> {
        let mut url = Url::parse(&self.endpoint)?;
        let values: Vec<(String, String)> = self
            .entries
            .iter()
            .filter_map(|(field, id)| {
                let value = resolve(result, *field);
                if value.is_none() {
                    debug!("form: no value for {}", field);
                }
                value.map(|v| (format!("entry.{}", id), v))
            })
            .collect();

        if !values.is_empty() {
            url.query_pairs_mut().extend_pairs(values);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FORM: &str = "https://forms.example.com/d/customs/viewform";

    fn form() -> FormPrefill {
        FormPrefill::with_entries(
            FORM,
            &[
                (ExportField::BillOfLading, "101"),
                (ExportField::ConsigneeAddress, "104"),
                (ExportField::LineItemCount, "106"),
                (ExportField::AveragePrice, "108"),
            ],
        )
    }

    #[test]
    fn test_build_encodes_values_in_order() {
        let result = ProcessingResult {
            general_entity: json!({
                "bill_of_lading_number": "MAEU 123",
                "consigneeAddress": "1 Harbour Rd & Co, Busan",
            }),
            line_item_count: Some(3),
            average_price: Some(42.5),
            ..Default::default()
        };

        let url = form().build(&result).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("entry.101".to_string(), "MAEU 123".to_string()),
                ("entry.104".to_string(), "1 Harbour Rd & Co, Busan".to_string()),
                ("entry.106".to_string(), "3".to_string()),
                ("entry.108".to_string(), "42.5".to_string()),
            ]
        );
        assert!(url.as_str().starts_with(FORM));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_missing_values_are_omitted() {
        let result = ProcessingResult {
            average_price: Some(7.0),
            ..Default::default()
        };
        let url = form().build(&result).unwrap();
        assert_eq!(url.query(), Some("entry.108=7"));
    }

    #[test]
    fn test_no_values_leaves_endpoint_untouched() {
        let url = form().build(&ProcessingResult::default()).unwrap();
        assert_eq!(url.as_str(), FORM);
    }

    #[test]
    fn test_invalid_endpoint() {
        let form = FormPrefill::new("not a url").entry(ExportField::AveragePrice, "1");
        assert!(matches!(
            form.build(&ProcessingResult::default()),
            Err(ExportError::InvalidEndpoint(_))
        ));
    }
}
