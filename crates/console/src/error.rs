//! Error types for the console.
//!
//! None of these ever reach the host page from a submit path: the console
//! turns them into notices and a [`SubmitOutcome`](crate::SubmitOutcome).

use thiserror::Error;

/// Failure to get a well-formed JSON answer from the product API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("page has no CSRF token")]
    MissingCsrfToken,
    #[error("dialog target is not a valid product: {0}")]
    InvalidTarget(String),
    #[error("client setup failed: {0}")]
    Client(String),
}

/// Failure to assemble a console at startup.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Invalid environment configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
