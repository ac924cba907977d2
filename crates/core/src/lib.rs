//! Domain primitives shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod paging;
pub mod types;
pub mod validation;
