//! # authhub-core
//!
//! Core crate for AuthHub. Contains configuration schemas, collaborator
//! traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AuthHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
