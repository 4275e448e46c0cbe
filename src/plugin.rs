//! Submission-plugin lifecycle orchestration.
//!
//! Translates the host platform's plugin hooks (settings population, settings
//! save, status display, emptiness check) into bridge calls. The plugin keeps
//! no state of its own: the assignment's repository state is re-derived from
//! the bridge on every query.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::client::BridgeApi;
use crate::error::Error;
use crate::storage::FileStore;
use crate::types::{AssignmentContext, CodeReferenceFile, GradingConfig, RepositoryInfo};

/// Data needed to populate the assignment settings form: the autograders
/// available for selection, and the repository already provisioned for this
/// assignment, if any.
#[derive(Debug)]
pub struct SettingsOptions {
    pub autograders: BTreeSet<String>,
    pub repository: Option<RepositoryInfo>,
}

/// One reference file that was not fully processed: either its upload failed
/// (local copy kept, bridge never received it) or the upload succeeded but
/// the local delete did not (local copy still present).
#[derive(Debug)]
pub struct UploadFailure {
    /// Original filename as stored by the host.
    pub filename: String,
    pub error: Error,
}

/// Result of a settings save.
#[derive(Debug)]
pub struct SaveOutcome {
    /// Whether the bridge accepted repository creation. When `false`, no
    /// file was uploaded and none was deleted.
    pub repository_created: bool,
    /// Original filenames uploaded and then removed from host storage.
    pub uploaded: Vec<String>,
    /// Files whose upload failed; each remains in host storage.
    pub failed: Vec<UploadFailure>,
}

impl SaveOutcome {
    fn rejected() -> Self {
        Self {
            repository_created: false,
            uploaded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// True when the repository exists and every reference file went through.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.repository_created && self.failed.is_empty()
    }
}

/// The autograding submission plugin.
///
/// Holds the bridge client and the host file-storage adapter; each method
/// corresponds to one plugin lifecycle hook.
pub struct AutogradingPlugin {
    bridge: Arc<dyn BridgeApi>,
    files: Arc<dyn FileStore>,
}

impl AutogradingPlugin {
    /// Create a plugin instance.
    pub fn new(bridge: Arc<dyn BridgeApi>, files: Arc<dyn FileStore>) -> Self {
        Self { bridge, files }
    }

    /// Settings-population hook: fetch what the form needs from the bridge.
    ///
    /// # Errors
    ///
    /// Propagates bridge transport/protocol errors; the host surfaces them
    /// as a generic form-rendering failure.
    pub async fn settings_options(
        &self,
        context: &AssignmentContext,
    ) -> Result<SettingsOptions, Error> {
        let autograders = self.bridge.running_autograders().await?;
        let repository = self
            .bridge
            .repository_detail(context.course_id, context.assignment_id)
            .await?;
        Ok(SettingsOptions {
            autograders,
            repository,
        })
    }

    /// Settings-save hook.
    ///
    /// Creates the repository, then uploads every reference file attached to
    /// `item_id` (except the `"."` directory placeholder) and deletes each
    /// local copy only after its upload succeeded. A rejected creation skips
    /// the upload phase entirely; a failed upload keeps that file and moves
    /// on to the next one. The grading configuration is consumed here and
    /// forwarded upstream — nothing is retained locally.
    ///
    /// # Errors
    ///
    /// Fails hard only on bridge errors during creation or host-storage
    /// errors while listing files. Per-file upload and delete failures are
    /// reported in the returned [`SaveOutcome`] instead; they never stop the
    /// remaining files.
    pub async fn save_settings(
        &self,
        context: &AssignmentContext,
        config: GradingConfig,
        item_id: i64,
    ) -> Result<SaveOutcome, Error> {
        let files = self.files.list(item_id).await?;

        let outcome = self.bridge.create_repository(context, &config).await?;
        if !outcome.success {
            return Ok(SaveOutcome::rejected());
        }

        let mut uploaded = Vec::new();
        let mut failed = Vec::new();

        for stored in &files {
            let Some(reference) = CodeReferenceFile::from_stored(stored) else {
                continue;
            };

            // Each upload+delete pair is an independent unit of work; one
            // failure must not block the remaining files.
            match self.bridge.save_reference(context, &reference).await {
                Ok(()) => match self.files.delete(item_id, &stored.content_hash).await {
                    Ok(()) => {
                        tracing::debug!(
                            assignment_id = context.assignment_id,
                            filename = %stored.filename,
                            "reference forwarded, local copy deleted"
                        );
                        uploaded.push(stored.filename.clone());
                    }
                    Err(error) => {
                        tracing::warn!(
                            assignment_id = context.assignment_id,
                            filename = %stored.filename,
                            %error,
                            "reference forwarded but local delete failed"
                        );
                        failed.push(UploadFailure {
                            filename: stored.filename.clone(),
                            error,
                        });
                    }
                },
                Err(error) => {
                    // The bridge never received this file; keep the local
                    // copy so nothing is lost.
                    tracing::warn!(
                        assignment_id = context.assignment_id,
                        filename = %stored.filename,
                        %error,
                        "reference upload failed, local copy kept"
                    );
                    failed.push(UploadFailure {
                        filename: stored.filename.clone(),
                        error,
                    });
                }
            }
        }

        Ok(SaveOutcome {
            repository_created: true,
            uploaded,
            failed,
        })
    }

    /// Status-display hook: the assignment's repository URL, if one exists.
    ///
    /// # Errors
    ///
    /// Propagates bridge transport/protocol errors.
    pub async fn view_summary(
        &self,
        context: &AssignmentContext,
    ) -> Result<Option<String>, Error> {
        let repository = self
            .bridge
            .repository_detail(context.course_id, context.assignment_id)
            .await?;
        Ok(repository.map(|r| r.gitlab_url))
    }

    /// Emptiness hook: true when the bridge reports no repository for this
    /// assignment.
    ///
    /// # Errors
    ///
    /// Propagates bridge transport/protocol errors.
    pub async fn is_empty(&self, context: &AssignmentContext) -> Result<bool, Error> {
        let repository = self
            .bridge
            .repository_detail(context.course_id, context.assignment_id)
            .await?;
        Ok(repository.is_none())
    }
}
