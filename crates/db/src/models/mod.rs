//! Entity models.
//!
//! Each submodule holds one `FromRow + Serialize + Deserialize + Validate`
//! struct that is both the stored row and the full-replacement request body,
//! plus its [`Resource`](crate::resource::Resource) implementation.

pub mod category;
pub mod order;
pub mod product;
