//! Product input shapes and field-level validation.
//!
//! The wire shape is camelCase throughout; storage casing is handled at
//! the `db` crate boundary.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;
use crate::gtin::{is_valid_gtin, GTIN_FORMAT_MESSAGE};

/// One key/value row of an extra table. Keys are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraRow {
    pub key: String,
    pub value: String,
}

/// An ordered, titled block of key/value rows attached to a product.
/// Owned entirely by its parent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraTable {
    pub title: String,
    pub rows: Vec<ExtraRow>,
}

/// User-supplied product fields, as carried in the multipart `data` part.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(custom(function = validate_gtin_field))]
    pub gtin: String,

    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,

    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub origin: Option<String>,

    /// Pre-existing image location, honoured only when no binary image
    /// part accompanies the request and no stored image exists.
    pub image_url: Option<String>,

    pub extra_tables: Option<Vec<ExtraTable>>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a [`ProductInput`], collecting every field failure before
/// any persistence is attempted.
pub fn validate_input(input: &ProductInput) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::FieldValidation(collect_field_errors(&errors)))
}

fn validate_gtin_field(gtin: &str) -> Result<(), ValidationError> {
    if is_valid_gtin(gtin) {
        Ok(())
    } else {
        let mut err = ValidationError::new("gtin_format");
        err.message = Some(Cow::Borrowed(GTIN_FORMAT_MESSAGE));
        Err(err)
    }
}

/// Flatten validator output into `{field, message}` pairs.
fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(field_errors) = kind {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn input(gtin: &str, name: &str) -> ProductInput {
        ProductInput {
            gtin: gtin.to_string(),
            product_name: name.to_string(),
            brand: None,
            category: None,
            description: None,
            weight: None,
            origin: None,
            image_url: None,
            extra_tables: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_input(&input("8499383300123", "Olive Oil")).is_ok());
    }

    #[test]
    fn bad_gtin_reports_the_gtin_field() {
        let err = validate_input(&input("123", "Olive Oil")).unwrap_err();
        assert_matches!(err, CoreError::FieldValidation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "gtin");
            assert_eq!(fields[0].message, GTIN_FORMAT_MESSAGE);
        });
    }

    #[test]
    fn missing_name_reports_the_name_field() {
        let err = validate_input(&input("8499383300123", "")).unwrap_err();
        assert_matches!(err, CoreError::FieldValidation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "product_name");
        });
    }

    #[test]
    fn all_failures_are_collected_at_once() {
        let err = validate_input(&input("abc", "")).unwrap_err();
        assert_matches!(err, CoreError::FieldValidation(fields) => {
            assert_eq!(fields.len(), 2);
        });
    }

    #[test]
    fn extra_tables_round_trip_through_serde() {
        let table = ExtraTable {
            title: "Nutrition".to_string(),
            rows: vec![
                ExtraRow {
                    key: "Energy".to_string(),
                    value: "120 kcal".to_string(),
                },
                ExtraRow {
                    key: "Energy".to_string(),
                    value: "500 kJ".to_string(),
                },
            ],
        };
        let json = serde_json::to_string(&table).unwrap();
        let back: ExtraTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn input_parses_camel_case_wire_shape() {
        let input: ProductInput = serde_json::from_str(
            r#"{
                "gtin": "8499383300123",
                "productName": "Olive Oil",
                "extraTables": [{"title": "T", "rows": [{"key": "k", "value": "v"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(input.product_name, "Olive Oil");
        assert_eq!(input.extra_tables.unwrap()[0].rows[0].key, "k");
    }
}
