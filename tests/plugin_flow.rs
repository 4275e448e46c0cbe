//! Orchestration tests for the submission-plugin lifecycle, driven by the
//! mock bridge and the in-memory file store.

use std::collections::BTreeSet;
use std::sync::Arc;

use autograding_bridge::testing::{MemoryFileStore, MockBridge, MockFailure, MockResponse};
use autograding_bridge::{
    AssignmentContext, AutogradingPlugin, CreateRepositoryOutcome, Error, GradingConfig,
    RepositoryInfo, StoredFile,
};
use chrono::{TimeZone, Utc};

const ITEM_ID: i64 = 77;

fn context() -> AssignmentContext {
    AssignmentContext {
        course_id: 7,
        assignment_id: 42,
        name: "Homework One".to_string(),
        due_date: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn stored(filename: &str, hash: &str) -> StoredFile {
    StoredFile {
        filename: filename.to_string(),
        content_hash: hash.to_string(),
        content: format!("content of {filename}").into_bytes(),
    }
}

/// A store seeded the way the host keeps a file-manager item: a directory
/// placeholder plus the uploaded files.
fn seeded_store() -> Arc<MemoryFileStore> {
    let store = MemoryFileStore::shared();
    store.insert(ITEM_ID, stored(".", "hash-dir"));
    store.insert(ITEM_ID, stored("main.py", "hash-main"));
    store.insert(ITEM_ID, stored("Makefile", "hash-make"));
    store
}

mod save_settings {
    use super::*;

    #[tokio::test]
    async fn test_rejected_creation_skips_uploads_and_deletes() {
        let bridge = MockBridge::shared();
        bridge.configure_create(MockResponse::with_data(CreateRepositoryOutcome {
            success: false,
        }));
        let store = seeded_store();
        let plugin = AutogradingPlugin::new(bridge.clone(), store.clone());

        let outcome = plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .expect("save should not error on business rejection");

        assert!(!outcome.repository_created);
        assert!(outcome.uploaded.is_empty());
        assert!(outcome.failed.is_empty());
        assert!(!outcome.is_complete());

        assert!(!bridge.was_called("references.save"));
        assert!(store.contains(ITEM_ID, "hash-main"));
        assert!(store.contains(ITEM_ID, "hash-make"));
        assert!(store.deleted_hashes().is_empty());
    }

    #[tokio::test]
    async fn test_successful_save_uploads_then_deletes_each_file() {
        let bridge = MockBridge::shared();
        let store = seeded_store();
        let plugin = AutogradingPlugin::new(bridge.clone(), store.clone());

        let outcome = plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .expect("save should succeed");

        assert!(outcome.repository_created);
        assert!(outcome.is_complete());
        assert_eq!(outcome.uploaded, vec!["main.py", "Makefile"]);

        // The "." placeholder was never uploaded.
        assert_eq!(bridge.call_count("references.save"), 2);
        let calls = bridge.get_calls(Some("references.save"));
        assert_eq!(calls[0].args[1], "main");
        assert_eq!(calls[0].args[2], "py");
        assert_eq!(calls[1].args[1], "Makefile");
        assert_eq!(calls[1].args[2], "");

        // Local copies removed after their uploads, placeholder untouched.
        assert_eq!(store.deleted_hashes(), vec!["hash-main", "hash-make"]);
        assert!(store.contains(ITEM_ID, "hash-dir"));
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_local_file_and_continues() {
        let bridge = MockBridge::shared();
        bridge.fail_save_for(
            "main",
            MockFailure::Unavailable("connection reset".to_string()),
        );
        let store = seeded_store();
        let plugin = AutogradingPlugin::new(bridge.clone(), store.clone());

        let outcome = plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .expect("per-file failures must not fail the whole save");

        assert!(outcome.repository_created);
        assert!(!outcome.is_complete());

        // main.py stayed local, Makefile still went through.
        assert!(store.contains(ITEM_ID, "hash-main"));
        assert!(!store.contains(ITEM_ID, "hash-make"));
        assert_eq!(outcome.uploaded, vec!["Makefile"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].filename, "main.py");
        assert!(outcome.failed[0].error.is_unavailable());
        assert_eq!(store.deleted_hashes(), vec!["hash-make"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_file_and_continues() {
        let bridge = MockBridge::shared();
        let store = seeded_store();
        store.fail_delete_for("hash-main");
        let plugin = AutogradingPlugin::new(bridge.clone(), store.clone());

        let outcome = plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .expect("a local delete failure must not fail the whole save");

        // Both files were still forwarded to the bridge.
        assert_eq!(bridge.call_count("references.save"), 2);

        // main.py was uploaded but its local copy could not be removed; that
        // is reported per file, and Makefile still completed normally.
        assert!(store.contains(ITEM_ID, "hash-main"));
        assert!(!store.contains(ITEM_ID, "hash-make"));
        assert_eq!(outcome.uploaded, vec!["Makefile"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].filename, "main.py");
        assert!(matches!(outcome.failed[0].error, Error::Storage(_)));
        assert!(!outcome.is_complete());
    }

    #[tokio::test]
    async fn test_creation_transport_error_propagates() {
        let bridge = MockBridge::shared();
        bridge.configure_create(MockResponse::with_failure(MockFailure::Unavailable(
            "dns failure".to_string(),
        )));
        let store = seeded_store();
        let plugin = AutogradingPlugin::new(bridge.clone(), store.clone());

        let err = plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .unwrap_err();

        assert!(err.is_unavailable());
        assert!(store.deleted_hashes().is_empty());
    }

    #[tokio::test]
    async fn test_forwards_sanitized_repository_name() {
        let bridge = MockBridge::shared();
        let plugin = AutogradingPlugin::new(bridge.clone(), MemoryFileStore::shared());

        plugin
            .save_settings(&context(), GradingConfig::default(), ITEM_ID)
            .await
            .expect("save should succeed");

        let calls = bridge.get_calls(Some("repository.create"));
        assert_eq!(calls[0].args[2], "Homework-One");
    }
}

mod settings_population {
    use super::*;

    #[tokio::test]
    async fn test_returns_running_autograders_and_existing_repository() {
        let bridge = MockBridge::shared();
        let running: BTreeSet<String> =
            ["java-11", "python-3"].iter().map(|s| s.to_string()).collect();
        bridge.configure_running(MockResponse::with_data(running.clone()));
        bridge.configure_detail(MockResponse::with_data(Some(RepositoryInfo {
            gitlab_url: "https://gitlab.example/course-7/hw-1".to_string(),
        })));

        let plugin = AutogradingPlugin::new(bridge, MemoryFileStore::shared());
        let options = plugin
            .settings_options(&context())
            .await
            .expect("settings population should succeed");

        assert_eq!(options.autograders, running);
        assert_eq!(
            options.repository.unwrap().gitlab_url,
            "https://gitlab.example/course-7/hw-1"
        );
    }

    #[tokio::test]
    async fn test_repeated_queries_return_the_same_set() {
        use autograding_bridge::BridgeApi;

        let bridge = MockBridge::shared();
        let running: BTreeSet<String> = ["java-11"].iter().map(|s| s.to_string()).collect();
        bridge.configure_running(MockResponse::with_data(running));

        let first = bridge.running_autograders().await.unwrap();
        let second = bridge.running_autograders().await.unwrap();
        assert_eq!(first, second);
    }
}

mod status_display {
    use super::*;

    #[tokio::test]
    async fn test_summary_and_emptiness_without_repository() {
        let bridge = MockBridge::shared();
        let plugin = AutogradingPlugin::new(bridge, MemoryFileStore::shared());

        // No repository is a normal state, not an error.
        assert!(plugin.view_summary(&context()).await.unwrap().is_none());
        assert!(plugin.is_empty(&context()).await.unwrap());
    }

    #[tokio::test]
    async fn test_summary_and_emptiness_with_repository() {
        let bridge = MockBridge::shared();
        bridge.configure_detail(MockResponse::with_data(Some(RepositoryInfo {
            gitlab_url: "https://gitlab.example/course-7/hw-1".to_string(),
        })));
        let plugin = AutogradingPlugin::new(bridge, MemoryFileStore::shared());

        assert_eq!(
            plugin.view_summary(&context()).await.unwrap().as_deref(),
            Some("https://gitlab.example/course-7/hw-1")
        );
        assert!(!plugin.is_empty(&context()).await.unwrap());
    }
}
