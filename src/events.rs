//! Dispatch of events received from the device event bus.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::AdapterError;
use crate::translation::{
    translate_onu_activated_event, DeviceEvent, EventHeader, OnuActivatedItems,
};

/// Header type of events raised by devices.
pub const DEVICE_EVENT_TYPE: &str = "DEVICE_EVENT";
/// Device event raised when an ONU completes activation.
pub const ONU_ACTIVATED_EVENT_NAME: &str = "ONU_ACTIVATED_RAISE_EVENT";

/// Type-specific body of a bus event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    /// Raised by a device adapter.
    DeviceEvent(DeviceEvent),
    /// Configuration change event.
    ConfigEvent(serde_json::Value),
    /// Metrics event.
    KpiEvent(serde_json::Value),
    /// RPC outcome event.
    RpcEvent(serde_json::Value),
}

/// A complete bus event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Common header.
    pub header: EventHeader,
    /// Type-specific body.
    #[serde(flatten)]
    pub payload: EventPayload,
}

/// Translates the events that map to ONU state notifications.
///
/// Returns `Ok(None)` for events with no notification counterpart. A header
/// claiming a device event over a different payload is logged and ignored.
///
/// # Errors
///
/// Returns an error if an ONU activation event lacks required context.
pub fn handle_event(event: &Event) -> Result<Option<OnuActivatedItems>, AdapterError> {
    if event.header.event_type != DEVICE_EVENT_TYPE {
        return Ok(None);
    }

    let EventPayload::DeviceEvent(device_event) = &event.payload else {
        error!(
            header_type = %event.header.event_type,
            payload = ?event.payload,
            "unexpected event payload"
        );
        return Ok(None);
    };

    // Only activation maps to an ONU state change so far.
    if device_event.device_event_name != ONU_ACTIVATED_EVENT_NAME {
        return Ok(None);
    }

    debug!(
        event_id = %event.header.id,
        device_id = %device_event.resource_id,
        "onu activated event received"
    );
    translate_onu_activated_event(&event.header, device_event).map(Some)
}
