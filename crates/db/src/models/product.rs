//! Product row model and write DTO.
//!
//! The casing boundary lives entirely in the derives on [`Product`]:
//! sqlx maps snake_case column names by field, serde renders the
//! camelCase wire shape. The mapping is total and round-trip-safe
//! (property-tested below), replacing any ad-hoc key rewriting.

use chrono::{DateTime, Utc};
use digilink_core::product::{ExtraTable, ProductInput};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque id, `prod_<uuid>`, distinct from the GTIN.
    pub id: String,
    /// The natural business key. Unique, immutable once assigned.
    pub gtin: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub origin: Option<String>,
    /// Public location of the image in the asset store.
    pub image_url: Option<String>,
    pub extra_tables: Option<Json<Vec<ExtraTable>>>,
    /// Assigned once on insert, never mutated by updates.
    pub created_at: DateTime<Utc>,
}

/// The full set of writable fields for an insert or replace.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub gtin: String,
    pub product_name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub weight: Option<String>,
    pub origin: Option<String>,
    pub image_url: Option<String>,
    pub extra_tables: Option<Json<Vec<ExtraTable>>>,
}

impl ProductFields {
    /// Combine validated user input with the reconciled asset location.
    pub fn from_input(input: ProductInput, image_url: Option<String>) -> Self {
        Self {
            gtin: input.gtin,
            product_name: input.product_name,
            brand: input.brand,
            category: input.category,
            description: input.description,
            weight: input.weight,
            origin: input.origin,
            image_url,
            extra_tables: input.extra_tables.map(Json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digilink_core::product::ExtraRow;

    fn sample() -> Product {
        Product {
            id: "prod_5f2c1c1e-0000-0000-0000-000000000000".to_string(),
            gtin: "8499383300123".to_string(),
            product_name: "Olive Oil".to_string(),
            brand: Some("Aceites Sur".to_string()),
            category: None,
            description: Some("Extra virgin".to_string()),
            weight: Some("750 ml".to_string()),
            origin: Some("ES".to_string()),
            image_url: Some("https://cdn.example.com/product-images/x.png".to_string()),
            extra_tables: Some(Json(vec![ExtraTable {
                title: "Nutrition".to_string(),
                rows: vec![ExtraRow {
                    key: "Energy".to_string(),
                    value: "120 kcal".to_string(),
                }],
            }])),
            created_at: "2026-02-01T10:30:00Z".parse().unwrap(),
        }
    }

    /// The storage/wire casing mapping must hold `from(to(x)) == x`.
    #[test]
    fn serde_round_trip_is_lossless() {
        let product = sample();
        let json = serde_json::to_value(&product).unwrap();
        let back: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), json);
        assert_eq!(back.product_name, product.product_name);
        assert_eq!(back.created_at, product.created_at);
    }

    /// Same property with every optional field unset.
    #[test]
    fn serde_round_trip_with_bare_record() {
        let product = Product {
            brand: None,
            category: None,
            description: None,
            weight: None,
            origin: None,
            image_url: None,
            extra_tables: None,
            ..sample()
        };
        let json = serde_json::to_value(&product).unwrap();
        let back: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&back).unwrap(), json);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("productName").is_some());
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("extraTables").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("product_name").is_none());
    }

    #[test]
    fn from_input_carries_the_reconciled_image_url() {
        let input: ProductInput = serde_json::from_str(
            r#"{"gtin": "40123456", "productName": "Soap", "imageUrl": "ignored"}"#,
        )
        .unwrap();
        let fields =
            ProductFields::from_input(input, Some("https://cdn.example.com/a.png".to_string()));
        assert_eq!(
            fields.image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(fields.product_name, "Soap");
    }
}
