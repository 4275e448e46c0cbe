//! Code-reference resource client.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{AssignmentContext, CodeReferenceFile, SaveReferenceRequest};

/// Client for forwarding reference files to the bridge.
pub struct ReferencesClient {
    transport: Arc<HttpTransport>,
}

impl ReferencesClient {
    /// Create a new references client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Upload one reference file for an assignment.
    ///
    /// The response body is unused by the caller: an empty body is accepted,
    /// a non-empty one only has to be well-formed JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] / [`Error::Protocol`] on transport or decode
    /// failure. Callers must not delete the local file when this fails.
    pub async fn save(
        &self,
        context: &AssignmentContext,
        file: &CodeReferenceFile,
    ) -> Result<(), Error> {
        let path = "/moodle/saveReference";
        let request =
            SaveReferenceRequest::new(context.course_id, context.assignment_id, file);

        let body = self.transport.post_text(path, &request).await?;
        if !body.trim().is_empty() {
            let _: Value = serde_json::from_str(&body)
                .map_err(|e| Error::Protocol(format!("{path}: {e}")))?;
        }

        tracing::debug!(
            assignment_id = context.assignment_id,
            filename = %file.filename,
            "reference uploaded"
        );
        Ok(())
    }
}
