//! Autograding bridge client.
//!
//! Client and submission-plugin orchestration for an external bridge service
//! that provisions source-control repositories and triggers autograding for
//! LMS assignments. The bridge owns all grading logic; this crate renders its
//! HTTP contract as typed calls and sequences the plugin lifecycle around it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use autograding_bridge::{BridgeClient, BridgeConfig};
//!
//! # async fn demo() -> Result<(), autograding_bridge::Error> {
//! let client = BridgeClient::new(BridgeConfig::new("http://bridge.local:8080"))?;
//!
//! // Settings form: which autograders can be selected?
//! let running = client.autograders().running().await?;
//! println!("{} autograders running", running.len());
//!
//! // Status display: is there a repository for this assignment?
//! if let Some(repo) = client.repository().detail(7, 42).await? {
//!     println!("repository: {}", repo.gitlab_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod plugin;
pub mod storage;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports
pub use client::{BridgeApi, BridgeClient};
pub use clients::{AutogradersClient, ReferencesClient, RepositoryClient};
pub use config::{BridgeConfig, DEFAULT_TIMEOUT_SECS};
pub use error::Error;
pub use plugin::{AutogradingPlugin, SaveOutcome, SettingsOptions, UploadFailure};
pub use storage::{FileStore, StoredFile};
pub use transport::HttpTransport;
pub use types::{
    AssignmentContext, CodeReferenceFile, CreateRepositoryOutcome, GradingConfig, GradingMethod,
    GradingPriority, RepositoryInfo,
};
