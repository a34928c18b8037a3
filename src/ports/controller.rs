//! SDN controller port (ONOS OLT application, core and SADIS REST APIs).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Annotation carrying the externally visible name of a network port.
pub const PORT_NAME_ANNOTATION: &str = "portName";

/// A subscriber service programmed on the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgrammedSubscriber {
    /// Physical location of the service as `<switch-id>/<port-number>`.
    pub location: String,
    /// Tagging and feature information of the service.
    #[serde(rename = "tagInfo")]
    pub tag_info: UniTagInfo,
}

/// Per-UNI tag information of a programmed service.
///
/// Fields the controller omits on the wire stay `None` rather than
/// collapsing to zero, so "absent" and "0" remain distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UniTagInfo {
    /// VLAN matched on the UNI side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uni_tag_match: Option<i32>,
    /// Inner tag pushed on the PON side.
    #[serde(rename = "ponCTag")]
    pub pon_c_tag: i32,
    /// Outer tag pushed on the PON side.
    #[serde(rename = "ponSTag")]
    pub pon_s_tag: i32,
    /// Technology profile identifier.
    #[serde(rename = "technologyProfileId")]
    pub technology_profile_id: i32,
    /// Upstream service bandwidth profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_bandwidth_profile: Option<String>,
    /// Upstream OLT bandwidth profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_olt_bandwidth_profile: Option<String>,
    /// Downstream service bandwidth profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_bandwidth_profile: Option<String>,
    /// Downstream OLT bandwidth profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_olt_bandwidth_profile: Option<String>,
    /// DHCP handling required.
    pub is_dhcp_required: bool,
    /// IGMP handling required.
    pub is_igmp_required: bool,
    /// PPPoE handling required.
    #[serde(rename = "isPppoeRequired")]
    pub is_pppoe_required: bool,
    /// Statically configured MAC address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_mac_address: Option<String>,
    /// MAC learning enabled.
    pub enable_mac_learning: bool,
    /// Upstream priority bits of the inner tag.
    #[serde(rename = "usPonCTagPriority", skip_serializing_if = "Option::is_none")]
    pub us_pon_c_tag_priority: Option<i32>,
    /// Upstream priority bits of the outer tag.
    #[serde(rename = "usPonSTagPriority", skip_serializing_if = "Option::is_none")]
    pub us_pon_s_tag_priority: Option<i32>,
    /// Downstream priority bits of the inner tag.
    #[serde(rename = "dsPonCTagPriority", skip_serializing_if = "Option::is_none")]
    pub ds_pon_c_tag_priority: Option<i32>,
    /// Downstream priority bits of the outer tag.
    #[serde(rename = "dsPonSTagPriority", skip_serializing_if = "Option::is_none")]
    pub ds_pon_s_tag_priority: Option<i32>,
    /// Service name component assigned by the operator.
    pub service_name: String,
}

/// A port known to the controller core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkPort {
    /// Switch (device) identifier.
    pub element: String,
    /// Port number on the switch.
    pub port: String,
    /// Whether the port is enabled.
    pub is_enabled: bool,
    /// Port kind.
    #[serde(rename = "type")]
    pub port_type: String,
    /// Port speed.
    pub port_speed: u64,
    /// Free-form annotations, including [`PORT_NAME_ANNOTATION`].
    pub annotations: HashMap<String, String>,
}

impl NetworkPort {
    /// The `<switch-id>/<port-number>` location this port occupies.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}/{}", self.element, self.port)
    }
}

/// A SADIS bandwidth profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthProfile {
    /// Profile name.
    pub id: String,
    /// Committed information rate.
    pub cir: Option<i64>,
    /// Committed burst size.
    pub cbs: Option<String>,
    /// Assured information rate.
    pub air: Option<i64>,
    /// Guaranteed information rate.
    pub gir: Option<i64>,
    /// Excess information rate.
    pub eir: Option<i64>,
    /// Excess burst size.
    pub ebs: Option<String>,
    /// Peak information rate.
    pub pir: Option<i64>,
    /// Peak burst size.
    pub pbs: Option<String>,
}

/// Access to the SDN controller's service-management surface.
pub trait SdnController: Send + Sync {
    /// Returns the raw status body of the OLT application.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller is unreachable or answers non-200.
    fn get_status(&self) -> PortFuture<'_, String>;

    /// Lists every service currently programmed on the controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn get_programmed_subscribers(&self) -> PortFuture<'_, Vec<ProgrammedSubscriber>>;

    /// Lists every port known to the controller core.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn get_ports(&self) -> PortFuture<'_, Vec<NetworkPort>>;

    /// Fetches one bandwidth profile by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the profile is not found exactly once.
    fn get_bandwidth_profile<'a>(&'a self, id: &'a str) -> PortFuture<'a, BandwidthProfile>;

    /// Provisions a service on a subscriber port.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller rejects the request.
    fn provision_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()>;

    /// Removes a service from a subscriber port.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller rejects the request.
    fn remove_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()>;
}
