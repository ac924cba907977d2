//! Order entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use warehouse_core::types::{DbId, Timestamp};
use warehouse_core::validation::{validate_money, validate_text};

use crate::resource::Resource;

/// A row from the `orders` table. `totalAmount` is stored as given; nothing
/// derives it from line items.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: DbId,
    #[validate(length(min = 1, max = 50), custom(function = "validate_text"))]
    pub order_number: String,
    #[serde(default = "chrono::Utc::now")]
    pub order_date: Timestamp,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_money"))]
    pub total_amount: Decimal,
    #[validate(length(min = 1, max = 100), custom(function = "validate_text"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 50), custom(function = "validate_text"))]
    pub status: String,
}

impl Resource for Order {
    const NAME: &'static str = "Order";
    const COLLECTION: &'static str = "orders";
    const SEARCH_COLUMNS: &'static [&'static str] = &["order_number", "customer_name"];

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.order_number.as_str(), self.customer_name.as_str()]
    }
}
