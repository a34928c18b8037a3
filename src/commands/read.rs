//! `devices`, `services`, `vlans` and `bandwidth-profiles` commands.

use crate::adapter::AdapterHandle;
use crate::call::CallContext;
use crate::cli::ReadArgs;
use crate::translation::PathValueItem;

/// Subtree served by a read command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    /// Devices and ONU interfaces.
    Devices,
    /// Service profiles.
    Services,
    /// VLAN translation profiles.
    Vlans,
    /// Bandwidth profiles.
    BandwidthProfiles,
}

/// Execute a read command and print its items.
///
/// # Errors
///
/// Returns an error string if the adapter is not ready or the read fails.
pub async fn run(
    handle: &AdapterHandle,
    ctx: &CallContext,
    tree: Tree,
    args: ReadArgs,
) -> Result<(), String> {
    let adapter = handle.acquire().map_err(|e| e.to_string())?;

    let items = match tree {
        Tree::Devices => adapter.get_devices(ctx).await,
        Tree::Services => adapter.get_services(ctx).await,
        Tree::Vlans => adapter.get_vlans(ctx).await,
        Tree::BandwidthProfiles => adapter.get_bandwidth_profiles(ctx).await,
    }
    .map_err(|e| e.to_string())?;

    print!("{}", render(&items, args.json)?);
    Ok(())
}

/// Renders items as `path = value` lines or as a JSON array.
///
/// # Errors
///
/// Returns an error string if JSON encoding fails.
pub fn render(items: &[PathValueItem], json: bool) -> Result<String, String> {
    if json {
        let mut out = serde_json::to_string_pretty(items).map_err(|e| e.to_string())?;
        out.push('\n');
        return Ok(out);
    }

    Ok(items.iter().map(|item| format!("{item}\n")).collect())
}
