//! Repository for the `orders` table.

use sqlx::PgPool;
use warehouse_core::paging::PageRequest;
use warehouse_core::types::DbId;

use crate::models::order::Order;
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_number, order_date, total_amount, customer_name, status";

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    pub async fn create(pool: &PgPool, input: &Order) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (order_number, order_date, total_amount, customer_name, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.order_number)
            .bind(input.order_date)
            .bind(input.total_amount)
            .bind(&input.customer_name)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of orders in id order, optionally filtered by a substring
    /// of `order_number` or `customer_name`.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
        search: Option<&str>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = super::list_query("orders", COLUMNS, Order::SEARCH_COLUMNS, search.is_some());
        let mut q = sqlx::query_as::<_, Order>(&query)
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
    pub async fn update(pool: &PgPool, input: &Order) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET
                order_number = $2,
                order_date = $3,
                total_amount = $4,
                customer_name = $5,
                status = $6
             WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.order_number)
        .bind(input.order_date)
        .bind(input.total_amount)
        .bind(&input.customer_name)
        .bind(&input.status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether an order with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
