//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use warehouse_core::types::{DbId, Timestamp};
use warehouse_core::validation::validate_text;

use crate::resource::Resource;

/// A row from the `categories` table.
///
/// The same shape is accepted on create (where `id` is ignored) and on update
/// (where `id` must match the path).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: DbId,
    #[validate(length(min = 1, max = 100), custom(function = "validate_text"))]
    pub name: String,
    #[validate(length(max = 250), custom(function = "validate_text"))]
    pub description: Option<String>,
    /// Defaults to the time the request body was read.
    #[serde(default = "chrono::Utc::now")]
    pub created_date: Timestamp,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[validate(length(max = 250), custom(function = "validate_text"))]
    pub additional_info: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Resource for Category {
    const NAME: &'static str = "Category";
    const COLLECTION: &'static str = "categories";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
