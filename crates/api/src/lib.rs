//! HTTP surface of the warehouse catalog: Basic-authenticated CRUD over
//! categories, products and orders.
//!
//! The server admits one identity, configured as `AUTH_USERNAME` plus an
//! Argon2id PHC string in `AUTH_PASSWORD_HASH`. Generate the hash with the
//! bundled binary:
//!
//! ```text
//! echo -n 's3cret' | cargo run -p warehouse-api --bin hash-password
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
