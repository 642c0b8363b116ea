//! Failure taxonomy shared by the remote and cache paths
//!
//! Ports report a [`ClientError`] (the fault category). The loaders classify it
//! exactly once into a [`FailureKind`], which is what callers see.

use thiserror::Error;

/// Closed set of failure kinds delivered by every load operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureKind {
    /// The remote or store could not be reached
    #[error("connectivity error")]
    Connectivity,

    /// The payload could not be understood
    #[error("invalid data")]
    InvalidData,

    /// The request was rejected as malformed
    #[error("bad request")]
    BadRequest,

    /// The requested resource does not exist
    #[error("not found")]
    NotFound,

    /// The server failed while handling the request
    #[error("internal server error")]
    InternalServerError,

    /// Any fault that does not fit the categories above
    #[error("unexpected error")]
    Unexpected,
}

/// Fault category reported by a port before translation into [`FailureKind`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    /// Body or stored content could not be decoded
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// HTTP 400
    #[error("bad request")]
    BadRequest,

    /// HTTP 404
    #[error("resource not found")]
    NotFound,

    /// HTTP 500
    #[error("internal server error")]
    InternalServerError,

    /// Non-success status with no dedicated category
    #[error("unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// Anything else, including local I/O faults
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<&ClientError> for FailureKind {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Connectivity(_) => FailureKind::Connectivity,
            ClientError::InvalidData(_) => FailureKind::InvalidData,
            ClientError::BadRequest => FailureKind::BadRequest,
            ClientError::NotFound => FailureKind::NotFound,
            ClientError::InternalServerError => FailureKind::InternalServerError,
            ClientError::UnexpectedStatus(_) | ClientError::Unexpected(_) => {
                FailureKind::Unexpected
            }
        }
    }
}

impl From<ClientError> for FailureKind {
    fn from(error: ClientError) -> Self {
        FailureKind::from(&error)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::Unexpected(error.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::InvalidData(error.to_string())
    }
}
