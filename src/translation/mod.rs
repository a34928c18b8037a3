//! Translation between upstream domain objects and path/value items of the
//! exposed data tree.
//!
//! Every function here is pure: the same input always yields the same items
//! in the same order. List-entry creation items come before the leaves that
//! hang off the entry, so the sequence can be applied to a tree in order.

pub mod device;
pub mod event;
pub mod paths;
pub mod service;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use device::{
    hardware_admin_state, hardware_oper_state, interface_oper_state, translate_device,
    translate_onu_ports,
};
pub use event::{translate_onu_activated_event, DeviceEvent, EventHeader, OnuActivatedItems};
pub use service::{translate_bandwidth_profiles, translate_service, translate_vlans};

/// Tree value standing for "any VLAN".
pub const YANG_VLAN_ID_ANY: &str = "any";
/// Controller value standing for "any VLAN".
pub const VOLTHA_VLAN_ID_ANY: i32 = 4096;

/// One node of the data tree: a leaf with its value, or a list entry
/// creation marker with an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathValueItem {
    /// Schema path of the node.
    pub path: String,
    /// Leaf value; empty for list entry creation markers.
    pub value: String,
}

impl PathValueItem {
    /// Creates an item from a path and a value.
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self { path: path.into(), value: value.into() }
    }
}

impl fmt::Display for PathValueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.value)
    }
}

/// Renders a controller VLAN id, mapping the "any" sentinel to its tree literal.
#[must_use]
pub fn vlan_id_to_yang(vlan: i32) -> String {
    if vlan == VOLTHA_VLAN_ID_ANY {
        YANG_VLAN_ID_ANY.to_string()
    } else {
        vlan.to_string()
    }
}

/// Maps a tree VLAN value back to the controller representation.
#[must_use]
pub fn vlan_id_from_yang(value: &str) -> String {
    if value == YANG_VLAN_ID_ANY {
        VOLTHA_VLAN_ID_ANY.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
pub(crate) fn value_at<'a>(items: &'a [PathValueItem], path: &str) -> Option<&'a str> {
    items.iter().find(|i| i.path == path).map(|i| i.value.as_str())
}
