//! The store gateway: the only surface the HTTP layer uses to reach
//! persistence.
//!
//! [`ResourceStore`] is implemented once per entity type by [`PgStore`] (and
//! by in-memory doubles in tests). Each call is a single statement against the
//! pool, so nothing here holds locks or state between calls.

use async_trait::async_trait;
use warehouse_core::paging::PageRequest;
use warehouse_core::types::DbId;

use crate::models::category::Category;
use crate::models::order::Order;
use crate::models::product::Product;
use crate::repositories::{CategoryRepo, OrderRepo, ProductRepo};
use crate::resource::Resource;
use crate::DbPool;

/// PostgreSQL SQLSTATEs that mean "the submitted values violate a declared
/// column or table constraint".
const CONSTRAINT_SQLSTATES: &[&str] = &[
    "22001", // string_data_right_truncation
    "22003", // numeric_value_out_of_range
    "22021", // character_not_in_repertoire (NUL in text)
    "23502", // not_null_violation
    "23503", // foreign_key_violation
    "23514", // check_violation
];

/// Failures reported by a [`ResourceStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A value violated a column or table constraint at write time.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// An update was rejected but the row still exists. Not recovered.
    #[error("Concurrent update of {entity} {id} was rejected while the row still exists")]
    ConcurrencyConflict { entity: &'static str, id: DbId },

    /// The store could not be reached (pool exhausted or closed, I/O).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other database failure.
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err
                    .code()
                    .is_some_and(|code| CONSTRAINT_SQLSTATES.iter().any(|state| code == *state)) =>
            {
                StoreError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(io_err) => StoreError::Unavailable(io_err.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// Result of a full-row replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row was replaced.
    Applied,
    /// The store matched no row to replace. The caller decides whether that
    /// means the row is gone.
    Conflict,
}

/// Store gateway for one entity type.
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    /// The row with this id, relations attached.
    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError>;

    /// One page of rows in insertion order, filtered by `search` first when
    /// present.
    async fn list(&self, page: PageRequest, search: Option<&str>) -> Result<Vec<R>, StoreError>;

    /// Insert a new row; `record.id` is ignored and the stored row returned.
    async fn insert(&self, record: &R) -> Result<R, StoreError>;

    /// Replace the row `record.id()` in full.
    async fn update(&self, record: &R) -> Result<WriteOutcome, StoreError>;

    /// Remove the row permanently. `false` when there was no such row.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn exists(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Liveness probe for the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// [`ResourceStore`] for every catalog entity, backed by a Postgres pool.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(StoreError::from)
    }
}

/// Implement [`ResourceStore`] for [`PgStore`] by delegating to a repository.
macro_rules! pg_resource_store {
    ($entity:ty => $repo:ty) => {
        #[async_trait]
        impl ResourceStore<$entity> for PgStore {
            async fn find_by_id(&self, id: DbId) -> Result<Option<$entity>, StoreError> {
                Ok(<$repo>::find_by_id(&self.pool, id).await?)
            }

            async fn list(
                &self,
                page: PageRequest,
                search: Option<&str>,
            ) -> Result<Vec<$entity>, StoreError> {
                // Postgres refuses NUL in text parameters, and no stored row
                // can contain one.
                if search.is_some_and(|term| term.contains('\0')) {
                    return Ok(Vec::new());
                }
                Ok(<$repo>::list(&self.pool, &page, search).await?)
            }

            async fn insert(&self, record: &$entity) -> Result<$entity, StoreError> {
                Ok(<$repo>::create(&self.pool, record).await?)
            }

            async fn update(&self, record: &$entity) -> Result<WriteOutcome, StoreError> {
                if <$repo>::update(&self.pool, record).await? {
                    Ok(WriteOutcome::Applied)
                } else {
                    tracing::debug!(entity = <$entity>::NAME, id = record.id, "Update matched no row");
                    Ok(WriteOutcome::Conflict)
                }
            }

            async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
                Ok(<$repo>::delete(&self.pool, id).await?)
            }

            async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
                Ok(<$repo>::exists(&self.pool, id).await?)
            }
        }
    };
}

pg_resource_store!(Category => CategoryRepo);
pg_resource_store!(Product => ProductRepo);
pg_resource_store!(Order => OrderRepo);
