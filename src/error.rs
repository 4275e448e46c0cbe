//! Error types for the autograding bridge client.

use thiserror::Error;

/// Main error type for bridge-service operations.
///
/// A well-formed `success: false` response from the bridge is *not* an error:
/// repository absence and creation rejection are ordinary return values
/// (`Option<RepositoryInfo>`, `CreateRepositoryOutcome`). Only transport
/// failures, malformed responses, bad configuration, and host-storage
/// failures surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// The bridge service could not be reached (connection, DNS, timeout),
    /// or it answered with a server error.
    #[error("bridge service unavailable: {0}")]
    Unavailable(String),

    /// The bridge service answered, but not in the agreed shape: non-JSON
    /// body, missing required field, or an unexpected status code.
    #[error("bridge service protocol error: {0}")]
    Protocol(String),

    /// Invalid client configuration or grading settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Host platform file-storage failure.
    #[error("file storage error: {0}")]
    Storage(String),
}

impl Error {
    /// True for transport-level failures (the bridge never answered usefully).
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// True when the bridge answered with something this client cannot decode.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}
