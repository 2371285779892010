//! # Tasklog Shared Library
//!
//! Record types, the storage contract, and both storage backends used by the
//! Tasklog API server.
//!
//! ## Module Organization
//!
//! - `models`: `User` and `TaskLog` records with their Postgres queries
//! - `store`: `TaskStore` trait, `MemoryStore`, `PgStore`, sample data
//! - `db`: Connection pool and migrations
//! - `error`: Storage error type

pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
