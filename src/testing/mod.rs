//! Test doubles for the bridge client and the host file store.

pub mod mock;

pub use mock::{MemoryFileStore, MockBridge, MockCall, MockFailure, MockResponse};
