//! Repository resource client.

use std::sync::Arc;

use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{
    AssignmentContext, CreateRepositoryOutcome, CreateRepositoryRequest, GradingConfig,
    RepositoryDetail, RepositoryInfo,
};

/// Client for repository queries and provisioning.
pub struct RepositoryClient {
    transport: Arc<HttpTransport>,
}

impl RepositoryClient {
    /// Create a new repository client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Look up the repository provisioned for an assignment, if any.
    ///
    /// `success: false` and an empty body are both valid "no repository"
    /// answers and yield `Ok(None)`; absence is a normal state for an
    /// assignment whose settings were never saved.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] on transport failure; [`Error::Protocol`] when
    /// the body is not JSON or claims success without a `repository` field.
    pub async fn detail(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<RepositoryInfo>, Error> {
        let path = "/repository/detail";
        let query = [
            ("courseId", course_id.to_string()),
            ("assignmentId", assignment_id.to_string()),
        ];

        let body = self.transport.get_text(path, &query).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let detail: RepositoryDetail = serde_json::from_str(&body)
            .map_err(|e| Error::Protocol(format!("{path}: {e}")))?;
        if !detail.success {
            return Ok(None);
        }

        let repository = detail.repository.ok_or_else(|| {
            Error::Protocol(format!("{path}: success without `repository` field"))
        })?;
        Ok(Some(repository))
    }

    /// Ask the bridge to provision a repository for an assignment.
    ///
    /// Not idempotent and never retried; avoiding duplicate calls for the
    /// same assignment is the caller's responsibility. A `success: false`
    /// outcome is a business rejection, not an error.
    ///
    /// # Errors
    ///
    /// [`Error::Unavailable`] / [`Error::Protocol`] on transport or decode
    /// failure.
    pub async fn create(
        &self,
        context: &AssignmentContext,
        config: &GradingConfig,
    ) -> Result<CreateRepositoryOutcome, Error> {
        let request = CreateRepositoryRequest {
            course_id: context.course_id,
            assignment_id: context.assignment_id,
            name: context.repository_name(),
            grading_method: config.grading_method,
            grading_priority: config.grading_priority,
            time_limit: config.time_limit_secs,
            due_date: context.due_date,
            autograders: &config.autograders,
        };

        let outcome: CreateRepositoryOutcome = self
            .transport
            .post("/gitlab/createRepository", &request)
            .await?;

        if outcome.success {
            tracing::info!(
                course_id = context.course_id,
                assignment_id = context.assignment_id,
                "bridge created repository"
            );
        } else {
            tracing::warn!(
                course_id = context.course_id,
                assignment_id = context.assignment_id,
                "bridge rejected repository creation"
            );
        }

        Ok(outcome)
    }
}
