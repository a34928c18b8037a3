//! Stand-in for the device inventory when no gRPC transport is linked in.

use crate::error::PortError;
use crate::ports::{Device, DeviceInventory, DevicePort, PortFuture};

/// Inventory that fails every call, naming the endpoint it would have used.
///
/// Device reads need a recorded cassette (`--replay`) in this build.
#[derive(Debug, Clone)]
pub struct UnconfiguredInventory {
    endpoint: String,
}

impl UnconfiguredInventory {
    /// Creates the stand-in for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    fn unavailable(&self) -> PortError {
        format!("device inventory transport not configured for {}", self.endpoint).into()
    }
}

impl DeviceInventory for UnconfiguredInventory {
    fn list_devices(&self) -> PortFuture<'_, Vec<Device>> {
        let err = self.unavailable();
        Box::pin(async move { Err(err) })
    }

    fn list_device_ports<'a>(&'a self, _device_id: &'a str) -> PortFuture<'a, Vec<DevicePort>> {
        let err = self.unavailable();
        Box::pin(async move { Err(err) })
    }
}
