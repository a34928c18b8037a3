//! `status` and `wait-ready` commands.

use crate::adapter::AdapterHandle;
use crate::adapters::live::onos::{wait_until_reachable, ONOS_BACKOFF_INTERVAL};
use crate::call::CallContext;

/// Print the controller OLT application status.
///
/// # Errors
///
/// Returns an error string if the adapter is not ready or the status call fails.
pub async fn run(handle: &AdapterHandle, ctx: &CallContext) -> Result<(), String> {
    let adapter = handle.acquire().map_err(|e| e.to_string())?;
    let status = adapter.controller_status(ctx).await.map_err(|e| e.to_string())?;
    println!("{status}");
    Ok(())
}

/// Block until the controller answers, retrying every backoff interval.
///
/// # Errors
///
/// Returns an error string if the command deadline passes first.
pub async fn wait_ready(handle: &AdapterHandle, ctx: &CallContext) -> Result<(), String> {
    let adapter = handle.acquire().map_err(|e| e.to_string())?;
    wait_until_reachable(adapter.controller(), ctx, ONOS_BACKOFF_INTERVAL)
        .await
        .map_err(|e| e.to_string())?;
    println!("controller reachable");
    Ok(())
}
