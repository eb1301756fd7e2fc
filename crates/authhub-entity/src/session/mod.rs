//! Session domain entities and the session store port.

pub mod model;
pub mod store;

pub use model::{NewSession, Session};
pub use store::SessionStore;
