//! Data model types for the autograding bridge.

pub mod assignment;
pub mod autograders;
pub mod reference;
pub mod repository;

// Re-exports
pub use assignment::{AssignmentContext, GradingConfig, GradingMethod, GradingPriority};
pub use autograders::RunningAutograders;
pub use reference::{split_filename, CodeReferenceFile, SaveReferenceRequest};
pub use repository::{
    CreateRepositoryOutcome, CreateRepositoryRequest, RepositoryDetail, RepositoryInfo,
};
