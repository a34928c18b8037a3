//! Recording adapter for the `DeviceInventory` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::format::INVENTORY_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Device, DeviceInventory, DevicePort, PortFuture};

/// Records inventory interactions while delegating to an inner implementation.
pub struct RecordingInventory {
    inner: Arc<dyn DeviceInventory>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingInventory {
    /// Creates a recording inventory wrapping the given implementation.
    pub fn new(inner: Arc<dyn DeviceInventory>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct DevicePortsInput<'a> {
    device_id: &'a str,
}

impl DeviceInventory for RecordingInventory {
    fn list_devices(&self) -> PortFuture<'_, Vec<Device>> {
        Box::pin(async move {
            let result = self.inner.list_devices().await;
            record_result(&self.recorder, INVENTORY_PORT, "list_devices", &(), &result);
            result
        })
    }

    fn list_device_ports<'a>(&'a self, device_id: &'a str) -> PortFuture<'a, Vec<DevicePort>> {
        Box::pin(async move {
            let result = self.inner.list_device_ports(device_id).await;
            record_result(
                &self.recorder,
                INVENTORY_PORT,
                "list_device_ports",
                &DevicePortsInput { device_id },
                &result,
            );
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::inventory::UnconfiguredInventory;

    #[tokio::test]
    async fn records_failed_listing() {
        let dir = std::env::temp_dir().join("bbf_adapter_rec_inventory_test");
        std::fs::create_dir_all(&dir).unwrap();
        let cassette_path = dir.join("inventory.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let inventory = RecordingInventory::new(
                Arc::new(UnconfiguredInventory::new("voltha-api:55555")),
                Arc::clone(&recorder),
            );
            let _ = inventory.list_device_ports("onu-1").await;
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        assert!(content.contains("list_device_ports"));
        assert!(content.contains("onu-1"));
        assert!(content.contains("Err"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
