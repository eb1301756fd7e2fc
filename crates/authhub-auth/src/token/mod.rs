//! Signed session token creation and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{TokenDecodeError, TokenDecoder};
pub use encoder::TokenEncoder;
