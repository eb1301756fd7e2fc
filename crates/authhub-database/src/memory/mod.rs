//! In-memory store implementations.
//!
//! Mutex-guarded twins of the PostgreSQL repositories, used for
//! single-node development and hermetic tests. Each method takes the
//! lock for its full duration, so the same atomicity the SQL statements
//! provide holds here too.

pub mod credentials;
pub mod sessions;

pub use credentials::MemoryCredentialStore;
pub use sessions::MemorySessionStore;
