//! User domain entities and the credential store port.

pub mod model;
pub mod store;

pub use model::{NewUser, User};
pub use store::CredentialStore;
