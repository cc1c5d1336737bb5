//! SQLite persistence adapter.
//!
//! One [`SqliteStore`] implements every store port using Diesel ORM over a
//! pooled connection.

pub mod database;
mod store;

pub use store::SqliteStore;
