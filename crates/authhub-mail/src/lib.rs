//! # authhub-mail
//!
//! Outbound mail transports implementing the [`Mailer`] port from
//! `authhub-core`: an async SMTP transport built on `lettre`, and a
//! log-only fallback for deployments without a configured relay.
//!
//! [`Mailer`]: authhub_core::traits::Mailer

pub mod log;
pub mod smtp;

pub use log::LogMailer;
pub use smtp::SmtpMailer;
