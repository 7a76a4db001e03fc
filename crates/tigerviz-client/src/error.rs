//! Error types for the tigerviz-client crate.

use thiserror::Error;

/// Failures from query execution or normalization.
///
/// None of these are recovered locally: every error propagates to the
/// caller as-is, with no retry or partial-result fallback.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed with HTTP status {status}")]
    Transport { status: u16 },

    #[error("Query error from server: {message}")]
    Application { message: String },

    #[error("Normalization produced no {missing}")]
    EmptyResult { missing: &'static str },

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
