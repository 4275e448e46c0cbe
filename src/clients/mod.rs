//! Resource clients for the bridge service.

pub mod autograders;
pub mod references;
pub mod repository;

// Re-exports
pub use autograders::AutogradersClient;
pub use references::ReferencesClient;
pub use repository::RepositoryClient;
