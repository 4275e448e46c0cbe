//! Assignment and grading-configuration data models.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifies which assignment a repository and grading configuration belong
/// to. Supplied by the host platform per operation; never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentContext {
    /// Host platform course id.
    pub course_id: i64,
    /// Host platform assignment id.
    pub assignment_id: i64,
    /// Assignment display name, as entered by the teacher.
    pub name: String,
    /// Submission deadline, forwarded to the bridge as epoch seconds.
    pub due_date: DateTime<Utc>,
}

impl AssignmentContext {
    /// Repository name derived from the assignment name: every space becomes
    /// a hyphen (only spaces are replaced).
    #[must_use]
    pub fn repository_name(&self) -> String {
        self.name.replace(' ', "-")
    }
}

/// Aggregation policy for combining multiple autograder results. Computed
/// entirely inside the bridge service; this crate only forwards the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradingMethod {
    Maximum,
    Minimum,
    Average,
}

/// Tie-break order when several grading runs exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradingPriority {
    First,
    Last,
}

/// Grading configuration submitted with the assignment settings form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingConfig {
    pub grading_method: GradingMethod,
    pub grading_priority: GradingPriority,
    /// Per-run time limit in seconds.
    pub time_limit_secs: u32,
    /// Selected autograder backends, by opaque id.
    pub autograders: BTreeSet<String>,
}

impl Default for GradingConfig {
    /// The settings form defaults: Maximum / First / 3000 seconds, no
    /// autograders selected yet.
    fn default() -> Self {
        Self {
            grading_method: GradingMethod::Maximum,
            grading_priority: GradingPriority::First,
            time_limit_secs: 3000,
            autograders: BTreeSet::new(),
        }
    }
}

impl GradingConfig {
    /// Check this configuration against the autograders currently running on
    /// the bridge: the selection must be non-empty and a subset of `running`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first offending id, or the
    /// empty selection.
    pub fn validate_against(&self, running: &BTreeSet<String>) -> Result<(), Error> {
        if self.autograders.is_empty() {
            return Err(Error::Configuration(
                "at least one autograder must be selected".to_string(),
            ));
        }
        if let Some(unknown) = self.autograders.difference(running).next() {
            return Err(Error::Configuration(format!(
                "autograder `{unknown}` is not running on the bridge"
            )));
        }
        Ok(())
    }
}
