//! Schema module roots and path builders for the exposed data tree.

/// Module owning the device aggregation subtree.
pub const DEVICE_AGGREGATION_MODULE: &str = "bbf-device-aggregation";
/// Root of the device aggregation subtree.
pub const DEVICES_PATH: &str = "/bbf-device-aggregation:devices";

/// Module owning the service profile subtree.
pub const SERVICE_PROFILE_MODULE: &str = "bbf-nt-service-profile";
/// Root of the service profile subtree.
pub const SERVICE_PROFILES_PATH: &str = "/bbf-nt-service-profile:service-profiles";

/// Module owning the VLAN translation profile subtree.
pub const VLANS_MODULE: &str = "bbf-l2-access-attributes";
/// Root of the VLAN translation profile subtree.
pub const VLANS_PATH: &str = "/bbf-l2-access-attributes:vlan-translation-profiles";

/// Module owning the bandwidth profile subtree.
pub const BANDWIDTH_PROFILE_MODULE: &str = "bbf-nt-line-profile";
/// Root of the bandwidth profile subtree.
pub const BANDWIDTH_PROFILES_PATH: &str = "/bbf-nt-line-profile:line-bandwidth-profiles";

/// Root of the ONU state change notification.
pub const ONU_STATE_CHANGE_PATH: &str = "/bbf-xpon-onu-states:onu-state-change";
/// Root of the standalone interfaces tree.
pub const INTERFACES_PATH: &str = "/ietf-interfaces:interfaces";

/// Prefix of the VOLTHA-specific augmentations of a service port.
pub(crate) const SERVICE_VOLTHA_PREFIX: &str = "bbf-nt-service-profile-voltha";
/// Prefix of the VOLTHA-specific augmentations of a VLAN profile.
pub(crate) const VLANS_VOLTHA_PREFIX: &str = "bbf-voltha-vlan-translation";

/// Path of the device with the given identifier.
#[must_use]
pub fn device_path(id: &str) -> String {
    format!("{DEVICES_PATH}/device[name='{id}']")
}

/// Path of the hardware component of a device inside its data mountpoint.
#[must_use]
pub fn device_hardware_path(id: &str) -> String {
    format!("{}/data/ietf-hardware:hardware/component[name='{id}']", device_path(id))
}

/// Path of the interfaces container inside a device's data mountpoint.
#[must_use]
pub fn device_interfaces_path(id: &str) -> String {
    format!("{}/data/ietf-interfaces:interfaces", device_path(id))
}

/// Path of the service profile with the given name.
#[must_use]
pub fn service_profile_path(service_name: &str) -> String {
    format!("{SERVICE_PROFILES_PATH}/service-profile[name='{service_name}']")
}

/// Path of a port entry inside a service profile.
#[must_use]
pub fn service_port_path(service_name: &str, port_name: &str) -> String {
    format!("{}/ports/port[name='{port_name}']", service_profile_path(service_name))
}

/// Path of the VLAN translation profile with the given name.
#[must_use]
pub fn vlans_path(vlans_name: &str) -> String {
    format!("{VLANS_PATH}/vlan-translation-profile[name='{vlans_name}']")
}
