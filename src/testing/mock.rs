//! Mock bridge and in-memory file store for testing.
//!
//! `MockBridge` implements [`BridgeApi`] with configurable responses and
//! records every call, so orchestration can be exercised without a running
//! bridge service. `MemoryFileStore` implements [`FileStore`] over a
//! `HashMap` and remembers what was deleted.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::client::BridgeApi;
use crate::error::Error;
use crate::storage::{FileStore, StoredFile};
use crate::types::{
    AssignmentContext, CodeReferenceFile, CreateRepositoryOutcome, GradingConfig, RepositoryInfo,
};

/// Record of a bridge method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g. `"repository.create"`, `"references.save"`).
    pub method: String,
    /// Stringified arguments passed to the method.
    pub args: Vec<String>,
    /// Timestamp of the call.
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// A failure a mock operation should return. Built into an [`Error`] at call
/// time, since `Error` itself is not `Clone`.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Unavailable(String),
    Protocol(String),
}

impl MockFailure {
    fn into_error(self) -> Error {
        match self {
            Self::Unavailable(detail) => Error::Unavailable(detail),
            Self::Protocol(detail) => Error::Protocol(detail),
        }
    }
}

/// Configuration for one mocked operation.
#[derive(Debug, Clone)]
pub struct MockResponse<T: Clone> {
    data: Option<T>,
    failure: Option<MockFailure>,
}

impl<T: Clone> Default for MockResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            failure: None,
        }
    }
}

impl<T: Clone> MockResponse<T> {
    /// Respond with `data`.
    #[must_use]
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            failure: None,
        }
    }

    /// Respond with a failure.
    #[must_use]
    pub fn with_failure(failure: MockFailure) -> Self {
        Self {
            data: None,
            failure: Some(failure),
        }
    }

    fn get_result(&self, default: T) -> Result<T, Error> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone().into_error());
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Mock bridge implementing [`BridgeApi`] without network access.
///
/// Defaults: no autograders running, no repository provisioned, repository
/// creation accepted, every upload succeeding.
pub struct MockBridge {
    calls: Mutex<Vec<MockCall>>,
    running_response: Mutex<MockResponse<BTreeSet<String>>>,
    detail_response: Mutex<MockResponse<Option<RepositoryInfo>>>,
    create_response: Mutex<MockResponse<CreateRepositoryOutcome>>,
    /// Per-filename upload failures, keyed by the reference's base name.
    save_failures: Mutex<HashMap<String, MockFailure>>,
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBridge {
    /// Create a mock bridge with default responses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            running_response: Mutex::new(MockResponse::default()),
            detail_response: Mutex::new(MockResponse::default()),
            create_response: Mutex::new(MockResponse::default()),
            save_failures: Mutex::new(HashMap::new()),
        }
    }

    /// Convenience constructor wrapped in `Arc` for handing to the plugin.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Configure the response for `running_autograders`.
    pub fn configure_running(&self, response: MockResponse<BTreeSet<String>>) {
        *self.running_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `repository_detail`.
    pub fn configure_detail(&self, response: MockResponse<Option<RepositoryInfo>>) {
        *self.detail_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `create_repository`.
    pub fn configure_create(&self, response: MockResponse<CreateRepositoryOutcome>) {
        *self.create_response.lock().unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Make `save_reference` fail for the reference with this base name.
    pub fn fail_save_for(&self, filename: &str, failure: MockFailure) {
        self.save_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(filename.to_string(), failure);
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MockCall::new(method, args));
    }

    /// Check whether a method was called at least once.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|call| call.method == method)
    }

    /// Number of times a method was called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Recorded calls, optionally filtered by method.
    #[must_use]
    pub fn get_calls(&self, method: Option<&str>) -> Vec<MockCall> {
        let calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        match method {
            Some(m) => calls.iter().filter(|c| c.method == m).cloned().collect(),
            None => calls.clone(),
        }
    }
}

#[async_trait]
impl BridgeApi for MockBridge {
    async fn running_autograders(&self) -> Result<BTreeSet<String>, Error> {
        self.record_call("autograders.running", vec![]);
        self.running_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(BTreeSet::new())
    }

    async fn repository_detail(
        &self,
        course_id: i64,
        assignment_id: i64,
    ) -> Result<Option<RepositoryInfo>, Error> {
        self.record_call(
            "repository.detail",
            vec![course_id.to_string(), assignment_id.to_string()],
        );
        self.detail_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(None)
    }

    async fn create_repository(
        &self,
        context: &AssignmentContext,
        config: &GradingConfig,
    ) -> Result<CreateRepositoryOutcome, Error> {
        self.record_call(
            "repository.create",
            vec![
                context.course_id.to_string(),
                context.assignment_id.to_string(),
                context.repository_name(),
                format!("{:?}", config.grading_method),
            ],
        );
        self.create_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(CreateRepositoryOutcome { success: true })
    }

    async fn save_reference(
        &self,
        context: &AssignmentContext,
        file: &CodeReferenceFile,
    ) -> Result<(), Error> {
        self.record_call(
            "references.save",
            vec![
                context.assignment_id.to_string(),
                file.filename.clone(),
                file.extension.clone(),
            ],
        );
        if let Some(failure) = self
            .save_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&file.filename)
        {
            return Err(failure.clone().into_error());
        }
        Ok(())
    }
}

/// In-memory [`FileStore`] for orchestration tests.
#[derive(Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<i64, Vec<StoredFile>>>,
    deleted: Mutex<Vec<String>>,
    /// Content hashes whose deletion should fail.
    undeletable: Mutex<BTreeSet<String>>,
}

impl MemoryFileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor wrapped in `Arc` for handing to the plugin.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Attach a file to a file-manager item.
    pub fn insert(&self, item_id: i64, file: StoredFile) {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(item_id)
            .or_default()
            .push(file);
    }

    /// Make `delete` fail for the file with this content hash.
    pub fn fail_delete_for(&self, content_hash: &str) {
        self.undeletable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(content_hash.to_string());
    }

    /// Whether a file with this content hash is still stored under the item.
    #[must_use]
    pub fn contains(&self, item_id: i64, content_hash: &str) -> bool {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&item_id)
            .is_some_and(|files| files.iter().any(|f| f.content_hash == content_hash))
    }

    /// Content hashes deleted so far, in deletion order.
    #[must_use]
    pub fn deleted_hashes(&self) -> Vec<String> {
        self.deleted.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn list(&self, item_id: i64) -> Result<Vec<StoredFile>, Error> {
        Ok(self
            .files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&item_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(&self, item_id: i64, content_hash: &str) -> Result<(), Error> {
        if self
            .undeletable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(content_hash)
        {
            return Err(Error::Storage(format!(
                "cannot delete file with hash {content_hash}"
            )));
        }

        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let entries = files
            .get_mut(&item_id)
            .ok_or_else(|| Error::Storage(format!("unknown item {item_id}")))?;

        let before = entries.len();
        entries.retain(|f| f.content_hash != content_hash);
        if entries.len() == before {
            return Err(Error::Storage(format!(
                "no file with hash {content_hash} under item {item_id}"
            )));
        }

        self.deleted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(content_hash.to_string());
        Ok(())
    }
}
