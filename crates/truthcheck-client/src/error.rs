//! Client error types.

use thiserror::Error;

/// Errors from the quiz service's HTTP surface.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The same logical operation is already in flight.
    #[error("operation already in progress")]
    Busy,

    /// The server answered with a non-success status.
    #[error("{operation} failed (status {status})")]
    Status { operation: &'static str, status: u16 },

    /// The questions upload was rejected.
    #[error("upload rejected (status {status})")]
    UploadRejected { status: u16 },

    /// A connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// A fetched document did not have the expected structure.
    #[error("failed to parse page: {0}")]
    Parse(String),
}
