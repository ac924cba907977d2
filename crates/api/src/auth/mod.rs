pub mod basic;
pub mod credentials;
