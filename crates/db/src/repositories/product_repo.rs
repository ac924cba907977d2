//! Repository for the `products` table.
//!
//! Reads attach each product's [`Category`]; writes never touch it.

use std::collections::HashMap;

use sqlx::PgPool;
use warehouse_core::paging::PageRequest;
use warehouse_core::types::DbId;

use crate::models::category::Category;
use crate::models::product::Product;
use crate::repositories::CategoryRepo;
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category_id, brand, volume, price, \
                       production_date, expiration_date, quantity";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row without its category.
    ///
    /// A `category_id` with no matching category fails with the store's
    /// foreign-key violation.
    pub async fn create(pool: &PgPool, input: &Product) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, category_id, brand, volume, price, production_date, expiration_date, quantity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.brand)
            .bind(input.volume)
            .bind(input.price)
            .bind(input.production_date)
            .bind(input.expiration_date)
            .bind(input.quantity)
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID with its category attached.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match product {
            Some(mut product) => {
                product.category = CategoryRepo::find_by_id(pool, product.category_id).await?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// List one page of products in id order, optionally filtered by a
    /// substring of `name` or `brand`, with categories attached.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = super::list_query(
            "products",
            COLUMNS,
            Product::SEARCH_COLUMNS,
            search.is_some(),
        );
        let mut q = sqlx::query_as::<_, Product>(&query)
            .bind(page.limit())
            .bind(page.offset());
        if let Some(term) = search {
            q = q.bind(term);
        }
        let mut products = q.fetch_all(pool).await?;

        let mut ids: Vec<DbId> = products.iter().map(|p| p.category_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let categories: HashMap<DbId, Category> = CategoryRepo::find_many(pool, &ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        for product in &mut products {
            product.category = categories.get(&product.category_id).cloned();
        }
        Ok(products)
    }

    /// Replace every column of the row `input.id`.
    ///
    /// Returns `false` if no row with that id exists.
    pub async fn update(pool: &PgPool, input: &Product) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET
                name = $2,
                category_id = $3,
                brand = $4,
                volume = $5,
                price = $6,
                production_date = $7,
                expiration_date = $8,
                quantity = $9
             WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(input.category_id)
        .bind(&input.brand)
        .bind(input.volume)
        .bind(input.price)
        .bind(input.production_date)
        .bind(input.expiration_date)
        .bind(input.quantity)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a product with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
