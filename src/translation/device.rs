//! Device and ONU port translation.

use super::paths::{device_hardware_path, device_interfaces_path, device_path};
use super::PathValueItem;
use crate::error::AdapterError;
use crate::ports::{AdminState, Device, DevicePort, OperStatus, PortType};

/// Device type literal for access nodes.
pub const DEVICE_TYPE_OLT: &str = "bbf-device-types:olt";
/// Device type literal for subscriber terminals.
pub const DEVICE_TYPE_ONU: &str = "bbf-device-types:onu";

/// Interface type literal of ONU UNIs.
pub const ONU_UNI_INTERFACE_TYPE: &str = "bbf-xpon-if-type:onu-v-vrefpoint";

const ADMIN_STATE_UNKNOWN: &str = "unknown";
const ADMIN_STATE_LOCKED: &str = "locked";
const ADMIN_STATE_UNLOCKED: &str = "unlocked";

const OPER_STATE_UNKNOWN: &str = "unknown";
const OPER_STATE_DISABLED: &str = "disabled";
const OPER_STATE_ENABLED: &str = "enabled";
const OPER_STATE_TESTING: &str = "testing";
const OPER_STATE_UP: &str = "up";
const OPER_STATE_DOWN: &str = "down";

/// Maps an inventory admin state to the ietf-hardware admin-state vocabulary.
///
/// `Preprovisioned` and `DownloadingImage` have no counterpart and map to
/// `"unknown"`.
#[must_use]
pub fn hardware_admin_state(state: AdminState) -> &'static str {
    match state {
        AdminState::Enabled => ADMIN_STATE_UNLOCKED,
        AdminState::Disabled => ADMIN_STATE_LOCKED,
        AdminState::Unknown | AdminState::Preprovisioned | AdminState::DownloadingImage => {
            ADMIN_STATE_UNKNOWN
        }
    }
}

/// Maps an inventory oper status to the ietf-hardware oper-state vocabulary.
#[must_use]
pub fn hardware_oper_state(status: OperStatus) -> &'static str {
    match status {
        OperStatus::Active => OPER_STATE_ENABLED,
        OperStatus::Testing => OPER_STATE_TESTING,
        OperStatus::Discovered
        | OperStatus::Activating
        | OperStatus::Failed
        | OperStatus::Reconciling
        | OperStatus::ReconcilingFailed => OPER_STATE_DISABLED,
        OperStatus::Unknown => OPER_STATE_UNKNOWN,
    }
}

/// Maps an inventory oper status to the ietf-interfaces oper-status vocabulary.
#[must_use]
pub fn interface_oper_state(status: OperStatus) -> &'static str {
    match status {
        OperStatus::Active => OPER_STATE_UP,
        OperStatus::Testing => OPER_STATE_TESTING,
        OperStatus::Discovered
        | OperStatus::Activating
        | OperStatus::Failed
        | OperStatus::Reconciling
        | OperStatus::ReconcilingFailed => OPER_STATE_DOWN,
        OperStatus::Unknown => OPER_STATE_UNKNOWN,
    }
}

/// Translates a device into its type, hardware and state leaves.
#[must_use]
pub fn translate_device(device: &Device) -> Vec<PathValueItem> {
    let device_path = device_path(&device.id);
    let hw = device_hardware_path(&device.id);

    let mut items = Vec::with_capacity(10);

    if device.root {
        items.push(PathValueItem::new(format!("{device_path}/type"), DEVICE_TYPE_OLT));
    } else {
        items.push(PathValueItem::new(format!("{device_path}/type"), DEVICE_TYPE_ONU));
        items.push(PathValueItem::new(format!("{hw}/parent"), device.parent_id.as_str()));
        items.push(PathValueItem::new(
            format!("{hw}/parent-rel-pos"),
            device.parent_port_no.to_string(),
        ));
    }

    items.extend([
        PathValueItem::new(format!("{hw}/mfg-name"), device.vendor.as_str()),
        PathValueItem::new(format!("{hw}/model-name"), device.model.as_str()),
        PathValueItem::new(format!("{hw}/hardware-rev"), device.hardware_version.as_str()),
        PathValueItem::new(format!("{hw}/firmware-rev"), device.firmware_version.as_str()),
        PathValueItem::new(format!("{hw}/serial-num"), device.serial_number.as_str()),
        PathValueItem::new(
            format!("{hw}/state/admin-state"),
            hardware_admin_state(device.admin_state),
        ),
        PathValueItem::new(
            format!("{hw}/state/oper-state"),
            hardware_oper_state(device.oper_status),
        ),
    ]);

    items
}

/// Translates the UNI ports of an ONU into interface leaves.
///
/// Non-UNI ports are skipped. A UNI without an OpenFlow descriptor fails the
/// whole call, since its interface name cannot be known.
///
/// # Errors
///
/// Returns [`AdapterError::MissingUniDescriptor`] for the first such port.
pub fn translate_onu_ports(
    device_id: &str,
    ports: &[DevicePort],
) -> Result<Vec<PathValueItem>, AdapterError> {
    let interfaces = device_interfaces_path(device_id);
    let mut items = Vec::new();

    for port in ports.iter().filter(|p| p.port_type == PortType::EthernetUni) {
        let ofp = port.ofp_port.as_ref().ok_or_else(|| AdapterError::MissingUniDescriptor {
            device_id: device_id.to_string(),
            port_no: port.port_no,
        })?;

        let interface = format!("{interfaces}/interface[name='{}']", ofp.name);
        items.push(PathValueItem::new(format!("{interface}/type"), ONU_UNI_INTERFACE_TYPE));
        items.push(PathValueItem::new(
            format!("{interface}/oper-status"),
            interface_oper_state(port.oper_status),
        ));
    }

    Ok(items)
}
