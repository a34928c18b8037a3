//! Translation of device activation events into ONU state notifications.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::paths::{INTERFACES_PATH, ONU_STATE_CHANGE_PATH};
use super::PathValueItem;
use crate::error::AdapterError;

const CONTEXT_KEY_PON_ID: &str = "pon-id";
const CONTEXT_KEY_ONU_SN: &str = "serial-number";
const CONTEXT_KEY_OLT_SN: &str = "olt-serial-number";

const ONU_STATE_PRESENT: &str = "bbf-xpon-onu-types:onu-present";
const CHANNEL_TERMINATION_TYPE: &str = "bbf-if-type:vlan-sub-interface";

/// Header common to every event published on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Event identifier.
    pub id: String,
    /// When the event was raised.
    pub raised_ts: DateTime<Utc>,
    /// Event category (e.g. `EQUIPMENT`).
    #[serde(default)]
    pub category: String,
    /// Event type (e.g. `DEVICE_EVENT`).
    #[serde(rename = "type", default)]
    pub event_type: String,
}

/// Payload of a device event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceEvent {
    /// Identifier of the device that raised the event.
    pub resource_id: String,
    /// Event name (e.g. `ONU_ACTIVATED_RAISE_EVENT`).
    pub device_event_name: String,
    /// Human-readable description.
    pub description: String,
    /// Free-form context attached by the raising adapter.
    pub context: HashMap<String, String>,
}

/// Items produced from an ONU activation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnuActivatedItems {
    /// Content of the ONU state change notification.
    pub notification: Vec<PathValueItem>,
    /// Channel termination node the notification references.
    pub channel_termination: Vec<PathValueItem>,
}

fn context_value<'a>(event: &'a DeviceEvent, key: &'static str) -> Result<&'a str, AdapterError> {
    event
        .context
        .get(key)
        .map(String::as_str)
        .ok_or(AdapterError::MissingEventContext { key })
}

/// Translates an ONU activation event into notification items.
///
/// The channel termination items only exist so the notification's reference
/// leaf resolves to a node in the tree.
///
/// # Errors
///
/// Returns [`AdapterError::MissingEventContext`] if the event context lacks the
/// PON id, the ONU serial number or the OLT serial number.
pub fn translate_onu_activated_event(
    header: &EventHeader,
    event: &DeviceEvent,
) -> Result<OnuActivatedItems, AdapterError> {
    let pon_id = context_value(event, CONTEXT_KEY_PON_ID)?;
    let olt_sn = context_value(event, CONTEXT_KEY_OLT_SN)?;
    let onu_sn = context_value(event, CONTEXT_KEY_ONU_SN)?;

    let pon_name = format!("{olt_sn}-pon-{pon_id}");

    let notification = vec![
        PathValueItem::new(format!("{ONU_STATE_CHANGE_PATH}/detected-serial-number"), onu_sn),
        PathValueItem::new(
            format!("{ONU_STATE_CHANGE_PATH}/channel-termination-ref"),
            pon_name.as_str(),
        ),
        PathValueItem::new(
            format!("{ONU_STATE_CHANGE_PATH}/onu-state-last-change"),
            header.raised_ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        PathValueItem::new(format!("{ONU_STATE_CHANGE_PATH}/onu-state"), ONU_STATE_PRESENT),
        PathValueItem::new(
            format!("{ONU_STATE_CHANGE_PATH}/detected-registration-id"),
            event.resource_id.as_str(),
        ),
    ];

    // TODO: replace with a dedicated ONU discovery notification once the
    // schema defines one; the dummy channel termination goes away with it.
    let channel_termination = vec![PathValueItem::new(
        format!("{INTERFACES_PATH}/interface[name='{pon_name}']/type"),
        CHANNEL_TERMINATION_TYPE,
    )];

    Ok(OnuActivatedItems { notification, channel_termination })
}
