//! Transactional email rendering and queue processing
//!
//! This crate provides:
//! - Pure template rendering: typed payload → [`tourbase_core::email::EmailMessage`]
//! - Locale-aware currency formatting for amounts appearing in emails
//! - The queue processor that drains pending jobs through the delivery trait

mod currency;
mod log_mailer;
mod processor;
pub mod templates;

pub use currency::format_currency;
pub use log_mailer::LogMailer;
pub use processor::EmailProcessor;
