//! # authhub-database
//!
//! PostgreSQL connection management plus concrete implementations of the
//! AuthHub store ports: sqlx repositories for production and
//! mutex-guarded in-memory stores for single-node development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
