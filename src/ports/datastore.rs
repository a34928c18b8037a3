//! Running-datastore port used to read configuration as it was before an edit.

use crate::error::PortError;

/// Read-only view of the committed (pre-edit) configuration datastore.
pub trait RunningDatastore: Send + Sync {
    /// Returns the values of every leaf whose path matches `selector`.
    ///
    /// Selector segments without a key predicate match any list entry, as in
    /// `/m:c/list/leaf`; segments with a predicate must match exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the datastore cannot be queried.
    fn leaf_values(&self, selector: &str) -> Result<Vec<String>, PortError>;
}
