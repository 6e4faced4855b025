//! Error types for Tourbase Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Multi-tenancy errors
    #[error("Invalid tenant: {0}")]
    InvalidTenant(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Email errors
    #[error("Template error: {0}")]
    Template(String),

    #[error("Mailer error: {0}")]
    Mailer(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
