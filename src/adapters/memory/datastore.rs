//! `RunningDatastore` over a flat snapshot of path/value leaves.

use serde::{Deserialize, Serialize};

use crate::bridge::selector;
use crate::error::PortError;
use crate::ports::RunningDatastore;
use crate::translation::PathValueItem;

/// Committed configuration captured as a list of leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDatastore {
    leaves: Vec<PathValueItem>,
}

impl SnapshotDatastore {
    /// Creates a datastore serving the given leaves.
    #[must_use]
    pub fn new(leaves: Vec<PathValueItem>) -> Self {
        Self { leaves }
    }
}

impl RunningDatastore for SnapshotDatastore {
    fn leaf_values(&self, selector: &str) -> Result<Vec<String>, PortError> {
        Ok(self
            .leaves
            .iter()
            .filter(|leaf| selector::matches(selector, &leaf.path))
            .map(|leaf| leaf.value.clone())
            .collect())
    }
}
