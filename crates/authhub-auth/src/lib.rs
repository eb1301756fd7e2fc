//! # authhub-auth
//!
//! The credential and session core of AuthHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and policy enforcement
//! - `lockout`: brute-force lockout policy
//! - `token`: signed session token creation and validation
//! - `session`: session issuance, validation, and revocation
//! - `reset`: single-use password-reset tokens
//! - `service`: the `AuthService` facade tying the flows together

pub mod lockout;
pub mod password;
pub mod reset;
pub mod service;
pub mod session;
pub mod token;

pub use lockout::LockoutPolicy;
pub use password::{PasswordHasher, PasswordValidator};
pub use reset::{IssuedReset, RedeemOutcome, ResetTokenAuthority};
pub use service::{AuthService, LoginResult, Registration};
pub use session::{IssuedSession, RevokeOutcome, SessionAuthority, TokenStatus};
pub use token::{Claims, TokenDecodeError, TokenDecoder, TokenEncoder};
