//! Bridge-service main client.
//!
//! Aggregates the resource clients over a shared transport, and defines the
//! [`BridgeApi`] trait the plugin orchestration consumes so that tests can
//! substitute a mock bridge.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::{AutogradersClient, ReferencesClient, RepositoryClient};
use crate::config::BridgeConfig;
use crate::error::Error;
use crate::transport::HttpTransport;
use crate::types::{
    AssignmentContext, CodeReferenceFile, CreateRepositoryOutcome, GradingConfig, RepositoryInfo,
};

/// The four bridge operations the submission plugin depends on.
///
/// Implemented by [`BridgeClient`] over HTTP and by
/// [`crate::testing::MockBridge`] in tests.
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// Autograder backends currently running on the bridge.
    async fn running_autograders(&self) -> Result<BTreeSet<String>, Error>;

    /// The repository provisioned for an assignment, if any.
    async fn repository_detail(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<RepositoryInfo>, Error>;

    /// Provision a repository; `success: false` is a business rejection.
    async fn create_repository(
        &self,
        context: &AssignmentContext,
        config: &GradingConfig,
    ) -> Result<CreateRepositoryOutcome, Error>;

    /// Forward one reference file to the bridge.
    async fn save_reference(
        &self,
        context: &AssignmentContext,
        file: &CodeReferenceFile,
    ) -> Result<(), Error>;
}

/// HTTP client for the autograding bridge service.
///
/// # Example
///
/// ```rust,no_run
/// use autograding_bridge::{BridgeClient, BridgeConfig};
///
/// # async fn demo() -> Result<(), autograding_bridge::Error> {
/// let client = BridgeClient::new(BridgeConfig::new("http://bridge.local:8080"))?;
/// let running = client.autograders().running().await?;
/// println!("{} autograders running", running.len());
/// # Ok(())
/// # }
/// ```
pub struct BridgeClient {
    transport: Arc<HttpTransport>,
    autograders: AutogradersClient,
    repository: RepositoryClient,
    references: ReferencesClient,
}

impl BridgeClient {
    /// Create a new client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP transport cannot be
    /// created.
    pub fn new(config: BridgeConfig) -> Result<Self, Error> {
        let transport = Arc::new(HttpTransport::new(&config)?);

        Ok(Self {
            autograders: AutogradersClient::new(Arc::clone(&transport)),
            repository: RepositoryClient::new(Arc::clone(&transport)),
            references: ReferencesClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from environment variables (see
    /// [`BridgeConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(BridgeConfig::from_env()?)
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Get the autograders client.
    #[must_use]
    pub fn autograders(&self) -> &AutogradersClient {
        &self.autograders
    }

    /// Get the repository client.
    #[must_use]
    pub fn repository(&self) -> &RepositoryClient {
        &self.repository
    }

    /// Get the references client.
    #[must_use]
    pub fn references(&self) -> &ReferencesClient {
        &self.references
    }
}

#[async_trait]
impl BridgeApi for BridgeClient {
    async fn running_autograders(&self) -> Result<BTreeSet<String>, Error> {
        self.autograders.running().await
    }

    async fn repository_detail(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<RepositoryInfo>, Error> {
        self.repository.detail(course_id, assignment_id).await
    }

    async fn create_repository(
        &self,
        context: &AssignmentContext,
        config: &GradingConfig,
    ) -> Result<CreateRepositoryOutcome, Error> {
        self.repository.create(context, config).await
    }

    async fn save_reference(
        &self,
        context: &AssignmentContext,
        file: &CodeReferenceFile,
    ) -> Result<(), Error> {
        self.references.save(context, file).await
    }
}
