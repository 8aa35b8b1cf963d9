// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes the failure taxonomy of the backend boundary: credential
/// flows, document writes, and live-subscription delivery.
#[derive(Debug)]
pub enum AppError {
    /// Credential creation or sign-in failure, including a federated
    /// consent flow closed by the user. Propagated unchanged; no retry.
    Auth(String),

    /// Profile/document write failure. Propagated unchanged; no retry and
    /// no compensating rollback of an already-created account.
    StoreWrite(String),

    /// Feed subscription failure after initial establishment. Logged by
    /// the projector; the last published list stays visible.
    StoreSubscription(String),

    /// Invalid caller input (e.g. validation failure on a request DTO).
    BadRequest(String),

    /// Anything else: corrupt settings file, token signing failure, etc.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Settings persistence goes through the filesystem; surface IO problems
/// as internal errors rather than panicking.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
