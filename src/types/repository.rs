//! Repository data models and wire shapes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::assignment::{GradingMethod, GradingPriority};

/// A provisioned source-control repository for an assignment.
///
/// Absence of a repository is modeled as `Option<RepositoryInfo>` by the
/// callers; it is a normal state, not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    /// Browsable URL of the provisioned GitLab repository.
    pub gitlab_url: String,
}

/// Wire shape of `GET /repository/detail`.
///
/// `success: false` (or an entirely empty body) means "no repository for this
/// assignment". A successful response without the `repository` field is a
/// protocol violation, handled by the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub repository: Option<RepositoryInfo>,
}

/// Wire shape of the `POST /gitlab/createRepository` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryRequest<'a> {
    pub course_id: i64,
    pub assignment_id: i64,
    /// Sanitized assignment name (spaces replaced with hyphens).
    pub name: String,
    pub grading_method: GradingMethod,
    pub grading_priority: GradingPriority,
    pub time_limit: u32,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub due_date: DateTime<Utc>,
    pub autograders: &'a BTreeSet<String>,
}

/// Outcome of a repository-creation request.
///
/// `success: false` is a business rejection, not an error: the caller must
/// skip the reference-upload phase but nothing failed at the transport level.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryOutcome {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GradingMethod, GradingPriority};
    use chrono::TimeZone;

    #[test]
    fn test_detail_deserialize_present() {
        let json = r#"{
            "success": true,
            "repository": { "gitlabUrl": "https://gitlab.example/course-7/hw-1" }
        }"#;

        let detail: RepositoryDetail = serde_json::from_str(json).expect("should deserialize");
        assert!(detail.success);
        assert_eq!(
            detail.repository.unwrap().gitlab_url,
            "https://gitlab.example/course-7/hw-1"
        );
    }

    #[test]
    fn test_detail_deserialize_not_found() {
        let detail: RepositoryDetail =
            serde_json::from_str(r#"{"success": false}"#).expect("should deserialize");
        assert!(!detail.success);
        assert!(detail.repository.is_none());

        // Fields defaulted when the bridge answers with a bare object.
        let detail: RepositoryDetail = serde_json::from_str("{}").expect("should deserialize");
        assert!(!detail.success);
    }

    #[test]
    fn test_create_request_wire_format() {
        let autograders: BTreeSet<String> =
            ["python-3"].iter().map(|s| s.to_string()).collect();
        let request = CreateRepositoryRequest {
            course_id: 7,
            assignment_id: 42,
            name: "Homework-One".to_string(),
            grading_method: GradingMethod::Maximum,
            grading_priority: GradingPriority::First,
            time_limit: 3000,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            autograders: &autograders,
        };

        let value = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(value["courseId"], 7);
        assert_eq!(value["assignmentId"], 42);
        assert_eq!(value["name"], "Homework-One");
        assert_eq!(value["gradingMethod"], "MAXIMUM");
        assert_eq!(value["gradingPriority"], "FIRST");
        assert_eq!(value["timeLimit"], 3000);
        assert_eq!(value["dueDate"], 1_717_200_000);
        assert_eq!(value["autograders"][0], "python-3");
    }

    #[test]
    fn test_outcome_deserialize() {
        let outcome: CreateRepositoryOutcome =
            serde_json::from_str(r#"{"success": true, "extra": 1}"#).expect("should deserialize");
        assert!(outcome.success);
    }
}
