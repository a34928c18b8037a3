//! `apply-changes` command.

use std::path::Path;

use serde::Deserialize;

use crate::adapter::AdapterHandle;
use crate::adapters::memory::SnapshotDatastore;
use crate::bridge::{handle_service_profile_changes, handle_vlan_changes, ChangeBatch};
use crate::call::CallContext;
use crate::translation::paths::{SERVICE_PROFILES_PATH, VLANS_PATH};

/// A change batch plus the datastore content it was computed against.
#[derive(Debug, Deserialize)]
pub struct ChangeFile {
    /// The observed changes.
    pub changes: ChangeBatch,
    /// Leaves of the running datastore before the edit.
    #[serde(default)]
    pub running: SnapshotDatastore,
}

impl ChangeFile {
    /// Parses a change file.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read change file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse change file {}: {e}", path.display()))
    }
}

/// Execute the `apply-changes` command.
///
/// Service profile changes are applied first, then VLAN translation changes
/// are checked, in the order the subscriptions fire.
///
/// # Errors
///
/// Returns an error string if the adapter is not ready or the bridge rejects
/// the batch.
pub async fn run(handle: &AdapterHandle, ctx: &CallContext, file: &Path) -> Result<(), String> {
    let ChangeFile { changes, running } = ChangeFile::load(file)?;
    let adapter = handle.acquire().map_err(|e| e.to_string())?;

    if changes.under(SERVICE_PROFILES_PATH).next().is_some() {
        handle_service_profile_changes(&adapter, &changes, &running, ctx)
            .await
            .map_err(|e| e.to_string())?;
    }
    if changes.under(VLANS_PATH).next().is_some() {
        handle_vlan_changes(&changes).map_err(|e| e.to_string())?;
    }

    println!("applied {} change(s)", changes.len());
    Ok(())
}
