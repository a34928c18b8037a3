//! Replaying adapters that serve recorded interactions from cassettes.

pub mod controller;
pub mod inventory;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;

pub use controller::ReplayingController;
pub use inventory::ReplayingInventory;

/// Take the output of the next recorded `port::method` interaction.
///
/// An adapter built without a cassette fails every call.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, PortError> {
    let replayer =
        replayer.ok_or_else(|| format!("no cassette loaded for port {port} (called {method})"))?;
    let mut guard = replayer.lock().map_err(|e| format!("replayer lock poisoned: {e}"))?;
    Ok(guard.next_interaction(port, method)?.output.clone())
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Result<serde_json::Value, PortError>,
) -> Result<T, PortError> {
    let mut output = output?;
    if let Some(ok) = output.get_mut("Ok") {
        return serde_json::from_value(ok.take())
            .map_err(|e| format!("cannot decode recorded Ok value: {e}").into());
    }
    match output.get("Err").and_then(serde_json::Value::as_str) {
        Some(msg) => Err(msg.into()),
        None => Err(format!("recorded output is neither Ok nor Err: {output}").into()),
    }
}
