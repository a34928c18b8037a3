//! Replaying adapter for the `DeviceInventory` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::INVENTORY_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{Device, DeviceInventory, DevicePort, PortFuture};

/// Serves recorded inventory listings from a cassette.
pub struct ReplayingInventory {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingInventory {
    /// Create a replaying inventory backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying inventory with no cassette. Every call fails.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl DeviceInventory for ReplayingInventory {
    fn list_devices(&self) -> PortFuture<'_, Vec<Device>> {
        let output = next_output(self.replayer.as_ref(), INVENTORY_PORT, "list_devices");
        Box::pin(async move { replay_result(output) })
    }

    fn list_device_ports<'a>(&'a self, _device_id: &'a str) -> PortFuture<'a, Vec<DevicePort>> {
        let output = next_output(self.replayer.as_ref(), INVENTORY_PORT, "list_device_ports");
        Box::pin(async move { replay_result(output) })
    }
}
