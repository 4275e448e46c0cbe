//! Autograder listing wire shape.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Wire shape of `GET /autograder/running`.
///
/// A response without the `autograders` field fails to decode and surfaces
/// as a protocol error.
#[derive(Debug, Deserialize)]
pub struct RunningAutograders {
    pub autograders: Vec<String>,
}

impl RunningAutograders {
    /// The running autograders as a set; duplicate ids collapse.
    #[must_use]
    pub fn into_set(self) -> BTreeSet<String> {
        self.autograders.into_iter().collect()
    }
}
