//! Session issuance, validation, and revocation.

pub mod authority;

pub use authority::{IssuedSession, RevokeOutcome, SessionAuthority, TokenStatus};
