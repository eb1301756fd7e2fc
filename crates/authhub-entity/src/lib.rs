//! # authhub-entity
//!
//! Domain entity models and store ports for AuthHub. Every entity struct
//! represents a database table row and derives `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and `sqlx::FromRow`. The store ports are
//! the narrow persistence interfaces the auth core consumes; concrete
//! implementations live in `authhub-database`.

pub mod session;
pub mod user;

pub use session::{NewSession, Session, SessionStore};
pub use user::{CredentialStore, NewUser, User};
