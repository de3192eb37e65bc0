//! Repository for the `products` table.
//!
//! Lookup by GTIN is exact equality on the unique business key, so at
//! most one row can come back. Insert relies on `uq_products_gtin` for
//! atomic uniqueness -- callers that checked existence first must still
//! treat that check as advisory.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::product::{Product, ProductFields};

/// Column list for `products` queries.
const PRODUCT_COLUMNS: &str = "\
    id, gtin, product_name, brand, category, description, \
    weight, origin, image_url, extra_tables, created_at";

/// Provides CRUD operations for product records.
pub struct ProductRepo;

impl ProductRepo {
    /// Find a product by its opaque id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by GTIN. Pure read; safe to call repeatedly.
    pub async fn find_by_gtin(pool: &PgPool, gtin: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE gtin = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(gtin)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new record with a fresh opaque id and server timestamp.
    ///
    /// A concurrent insert for the same GTIN fails here with a 23505 on
    /// `uq_products_gtin`, which the API layer classifies as a conflict.
    pub async fn insert(pool: &PgPool, fields: &ProductFields) -> Result<Product, sqlx::Error> {
        let id = format!("prod_{}", Uuid::new_v4());
        let query = format!(
            "INSERT INTO products (\
                id, gtin, product_name, brand, category, description, \
                weight, origin, image_url, extra_tables\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&id)
            .bind(&fields.gtin)
            .bind(&fields.product_name)
            .bind(fields.brand.as_deref())
            .bind(fields.category.as_deref())
            .bind(fields.description.as_deref())
            .bind(fields.weight.as_deref())
            .bind(fields.origin.as_deref())
            .bind(fields.image_url.as_deref())
            .bind(fields.extra_tables.as_ref())
            .fetch_one(pool)
            .await
    }

    /// Replace every mutable field of an existing record in full.
    ///
    /// `id`, `gtin`, and `created_at` are never touched. Returns `None`
    /// when the id no longer exists.
    pub async fn replace(
        pool: &PgPool,
        id: &str,
        fields: &ProductFields,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                product_name = $2, brand = $3, category = $4, description = $5, \
                weight = $6, origin = $7, image_url = $8, extra_tables = $9 \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&fields.product_name)
            .bind(fields.brand.as_deref())
            .bind(fields.category.as_deref())
            .bind(fields.description.as_deref())
            .bind(fields.weight.as_deref())
            .bind(fields.origin.as_deref())
            .bind(fields.image_url.as_deref())
            .bind(fields.extra_tables.as_ref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a record by id. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all records, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }
}
