//! `provision` and `remove` commands.

use tracing::warn;

use crate::adapter::AdapterHandle;
use crate::alias::ServiceKey;
use crate::call::CallContext;

/// Provision a service on the controller.
///
/// # Errors
///
/// Returns an error string if the adapter is not ready or the controller
/// rejects the service.
pub async fn provision(
    handle: &AdapterHandle,
    ctx: &CallContext,
    key: &ServiceKey,
) -> Result<(), String> {
    let adapter = handle.acquire().map_err(|e| e.to_string())?;
    adapter.provision_service(ctx, key).await.map_err(|e| e.to_string())?;
    println!("provisioned {key}");
    Ok(())
}

/// Remove a service from the controller and forget its alias.
///
/// # Errors
///
/// Returns an error string if the adapter is not ready or the controller
/// rejects the removal.
pub async fn remove(
    handle: &AdapterHandle,
    ctx: &CallContext,
    key: &ServiceKey,
) -> Result<(), String> {
    let adapter = handle.acquire().map_err(|e| e.to_string())?;
    adapter.remove_service(ctx, key).await.map_err(|e| e.to_string())?;

    if let Err(err) = adapter.aliases().delete_alias(ctx, key).await {
        warn!(key = %key, error = %err, "cannot delete service alias");
    }

    println!("removed {key}");
    Ok(())
}
