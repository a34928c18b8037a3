//! In-test fakes for the upstream ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use bbf_adapter::error::PortError;
use bbf_adapter::ports::{
    BandwidthProfile, Device, DeviceInventory, DevicePort, KvStore, NetworkPort, PortFuture,
    ProgrammedSubscriber, SdnController, PORT_NAME_ANNOTATION,
};

/// Inventory serving fixed devices and ports.
#[derive(Default)]
pub struct FakeInventory {
    pub devices: Vec<Device>,
    pub ports: HashMap<String, Vec<DevicePort>>,
    /// Device whose port listing fails.
    pub failing_ports: Option<String>,
}

impl DeviceInventory for FakeInventory {
    fn list_devices(&self) -> PortFuture<'_, Vec<Device>> {
        Box::pin(async move { Ok(self.devices.clone()) })
    }

    fn list_device_ports<'a>(&'a self, device_id: &'a str) -> PortFuture<'a, Vec<DevicePort>> {
        Box::pin(async move {
            if self.failing_ports.as_deref() == Some(device_id) {
                return Err(PortError::from(format!("ports of {device_id} unavailable")));
            }
            Ok(self.ports.get(device_id).cloned().unwrap_or_default())
        })
    }
}

/// Controller serving fixed services and logging every call.
#[derive(Default)]
pub struct FakeController {
    pub subscribers: Vec<ProgrammedSubscriber>,
    pub ports: Vec<NetworkPort>,
    pub profiles: HashMap<String, BandwidthProfile>,
    /// Reject provision and remove calls.
    pub reject_writes: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeController {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn write<'a>(&'a self, op: &str, args: [&'a str; 4]) -> PortFuture<'a, ()> {
        self.log(format!("{op} {}", args.join("/")));
        let reject = self.reject_writes;
        Box::pin(async move {
            if reject {
                return Err(PortError::from("status code not ok: POST http://onos/ 500"));
            }
            Ok(())
        })
    }
}

impl SdnController for FakeController {
    fn get_status(&self) -> PortFuture<'_, String> {
        Box::pin(async { Ok("running".to_string()) })
    }

    fn get_programmed_subscribers(&self) -> PortFuture<'_, Vec<ProgrammedSubscriber>> {
        self.log("get_programmed_subscribers".into());
        Box::pin(async move { Ok(self.subscribers.clone()) })
    }

    fn get_ports(&self) -> PortFuture<'_, Vec<NetworkPort>> {
        self.log("get_ports".into());
        Box::pin(async move { Ok(self.ports.clone()) })
    }

    fn get_bandwidth_profile<'a>(&'a self, id: &'a str) -> PortFuture<'a, BandwidthProfile> {
        self.log(format!("get_bandwidth_profile {id}"));
        Box::pin(async move {
            self.profiles
                .get(id)
                .cloned()
                .ok_or_else(|| PortError::from(format!("profile {id} not found")))
        })
    }

    fn provision_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        self.write("provision", [port_name, s_tag, c_tag, tp_id])
    }

    fn remove_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        self.write("remove", [port_name, s_tag, c_tag, tp_id])
    }
}

/// KV store whose writes and deletes always fail; reads find nothing.
#[derive(Default)]
pub struct FailingKv;

impl KvStore for FailingKv {
    fn get<'a>(&'a self, _path: &'a str) -> PortFuture<'a, Option<Vec<u8>>> {
        Box::pin(async { Ok(None) })
    }

    fn put<'a>(&'a self, path: &'a str, _value: Vec<u8>) -> PortFuture<'a, ()> {
        Box::pin(async move { Err(PortError::from(format!("cannot write {path}: disk full"))) })
    }

    fn delete<'a>(&'a self, path: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move { Err(PortError::from(format!("cannot delete {path}: disk full"))) })
    }
}

/// A controller port carrying a `portName` annotation.
pub fn named_port(element: &str, port: &str, name: &str) -> NetworkPort {
    NetworkPort {
        element: element.into(),
        port: port.into(),
        is_enabled: true,
        port_type: "fiber".into(),
        annotations: HashMap::from([(PORT_NAME_ANNOTATION.to_string(), name.to_string())]),
        ..NetworkPort::default()
    }
}
