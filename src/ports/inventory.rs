//! Device inventory port for the access-network controller's device registry.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Administrative state of a device as reported by the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminState {
    /// State not known.
    #[default]
    Unknown,
    /// Device is pre-provisioned but not yet enabled.
    Preprovisioned,
    /// Device is enabled.
    Enabled,
    /// Device is disabled.
    Disabled,
    /// Device is downloading a software image.
    DownloadingImage,
}

/// Operational status of a device or port as reported by the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperStatus {
    /// Status not known.
    #[default]
    Unknown,
    /// Discovered but not yet activated.
    Discovered,
    /// Activation in progress.
    Activating,
    /// Under test.
    Testing,
    /// Fully operational.
    Active,
    /// Activation failed.
    Failed,
    /// State reconciliation in progress.
    Reconciling,
    /// State reconciliation failed.
    ReconcilingFailed,
}

/// Kind of a device port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortType {
    /// Port kind not known.
    #[default]
    Unknown,
    /// Network-facing Ethernet port.
    EthernetNni,
    /// Subscriber-facing Ethernet port.
    EthernetUni,
    /// PON port on an OLT.
    PonOlt,
    /// PON port on an ONU.
    PonOnu,
    /// Virtual Ethernet port on an OLT.
    VenetOlt,
    /// Virtual Ethernet port on an ONU.
    VenetOnu,
}

/// A device known to the inventory (OLT when `root`, ONU otherwise).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Unique device identifier.
    pub id: String,
    /// `true` for access nodes (OLTs), `false` for subscriber terminals (ONUs).
    pub root: bool,
    /// Vendor name.
    pub vendor: String,
    /// Model name.
    pub model: String,
    /// Hardware revision.
    pub hardware_version: String,
    /// Firmware revision.
    pub firmware_version: String,
    /// Serial number.
    pub serial_number: String,
    /// Administrative state.
    pub admin_state: AdminState,
    /// Operational status.
    pub oper_status: OperStatus,
    /// Identifier of the parent device (ONUs only).
    pub parent_id: String,
    /// Port number on the parent device (ONUs only).
    pub parent_port_no: u32,
}

/// The legacy OpenFlow port descriptor embedded in a device port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfpPort {
    /// Externally visible interface name.
    pub name: String,
    /// OpenFlow port number.
    pub port_no: u32,
}

/// A port of a device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePort {
    /// Port number on the device.
    pub port_no: u32,
    /// Port kind.
    #[serde(rename = "type")]
    pub port_type: PortType,
    /// Operational status.
    pub oper_status: OperStatus,
    /// Embedded OpenFlow descriptor; required on UNI ports.
    pub ofp_port: Option<OfpPort>,
}

/// Read access to the device inventory service.
pub trait DeviceInventory: Send + Sync {
    /// Lists every device known to the inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory service cannot be reached.
    fn list_devices(&self) -> PortFuture<'_, Vec<Device>>;

    /// Lists the ports of one device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is unknown or the service cannot be reached.
    fn list_device_ports<'a>(&'a self, device_id: &'a str) -> PortFuture<'a, Vec<DevicePort>>;
}
