//! Autograders resource client.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::RunningAutograders;

/// Client for autograder discovery.
pub struct AutogradersClient {
    transport: Arc<HttpTransport>,
}

impl AutogradersClient {
    /// Create a new autograders client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// List the autograder backends currently running on the bridge.
    ///
    /// Read-only and idempotent: repeated calls against an unchanged bridge
    /// return the same set.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] if the bridge cannot be reached,
    /// [`Error::Protocol`] if the response lacks the `autograders` field or
    /// is not JSON.
    pub async fn running(&self) -> Result<BTreeSet<String>, Error> {
        let response: RunningAutograders =
            self.transport.get("/autograder/running", &[]).await?;
        Ok(response.into_set())
    }
}
