//! Product entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use warehouse_core::types::{Date, DbId};
use warehouse_core::validation::{validate_money, validate_text};

use crate::models::category::Category;
use crate::resource::Resource;

/// A row from the `products` table.
///
/// `category` is never read from request bodies. Repositories attach it on
/// get and list; it is omitted from the JSON when not loaded.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: DbId,
    #[validate(length(min = 1, max = 100), custom(function = "validate_text"))]
    pub name: String,
    pub category_id: DbId,
    #[validate(length(min = 1, max = 100), custom(function = "validate_text"))]
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_money"))]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_money"))]
    pub price: Decimal,
    pub production_date: Date,
    pub expiration_date: Date,
    pub quantity: i32,
    #[sqlx(skip)]
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Resource for Product {
    const NAME: &'static str = "Product";
    const COLLECTION: &'static str = "products";
    const SEARCH_COLUMNS: &'static [&'static str] = &["name", "brand"];

    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.brand.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn cola() -> serde_json::Value {
        json!({
            "name": "Cola",
            "categoryId": 1,
            "brand": "X",
            "volume": 0.5,
            "price": 1.2,
            "productionDate": "2024-01-10",
            "expirationDate": "2025-01-10",
            "quantity": 10
        })
    }

    #[test]
    fn decimals_round_trip_as_numbers() {
        let product: Product = serde_json::from_value(cola()).unwrap();
        assert_eq!(product.price, Decimal::from_str("1.2").unwrap());

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], 1.2);
        assert_eq!(value["volume"], 0.5);
        assert_eq!(value["productionDate"], "2024-01-10");
    }

    #[test]
    fn category_in_body_is_ignored() {
        let mut body = cola();
        body["category"] = json!({"id": 9, "name": "Injected"});
        let product: Product = serde_json::from_value(body).unwrap();
        assert!(product.category.is_none());
        assert!(serde_json::to_value(&product).unwrap().get("category").is_none());
    }

    #[test]
    fn three_fractional_digits_fail_validation() {
        let mut body = cola();
        body["price"] = json!(1.234);
        let product: Product = serde_json::from_value(body).unwrap();
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn blank_brand_fails_validation() {
        let mut body = cola();
        body["brand"] = json!("");
        let product: Product = serde_json::from_value(body).unwrap();
        assert!(product.validate().is_err());
    }

    #[test]
    fn search_matches_name_or_brand() {
        let mut body = cola();
        body["brand"] = json!("Fizzco");
        let product: Product = serde_json::from_value(body).unwrap();
        assert!(product.matches("Col"));
        assert!(product.matches("zzc"));
        assert!(!product.matches("Water"));
    }
}
