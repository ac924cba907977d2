//! Repository for the `categories` table.

use sqlx::PgPool;
use warehouse_core::paging::PageRequest;
use warehouse_core::types::DbId;

use crate::models::category::Category;
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_date, is_active, additional_info";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row. `input.id` is ignored.
    pub async fn create(pool: &PgPool, input: &Category) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, created_date, is_active, additional_info)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.created_date)
            .bind(input.is_active)
            .bind(&input.additional_info)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every category whose id is in `ids`. Order is unspecified.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1)");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List one page of categories in id order, optionally filtered by a
    /// substring of `name`.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = super::list_query(
            "categories",
            COLUMNS,
            Category::SEARCH_COLUMNS,
            search.is_some(),
        );
        let mut q = sqlx::query_as::<_, Category>(&query)
            .bind(page.limit())
            .bind(page.offset());
        if let Some(term) = search {
            q = q.bind(term);
        }
        q.fetch_all(pool).await
    }

    /// Replace every column of the row `input.id`.
    ///
    /// Returns `false` if no row with that id exists.
    pub async fn update(pool: &PgPool, input: &Category) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE categories SET
                name = $2,
                description = $3,
                created_date = $4,
                is_active = $5,
                additional_info = $6
             WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.created_date)
        .bind(input.is_active)
        .bind(&input.additional_info)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a category by ID. Its products go with it
    /// (`ON DELETE CASCADE`). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a category with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
