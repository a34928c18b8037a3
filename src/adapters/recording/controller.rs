//! Recording adapter for the `SdnController` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::format::CONTROLLER_PORT;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{
    BandwidthProfile, NetworkPort, PortFuture, ProgrammedSubscriber, SdnController,
};

/// Records controller interactions while delegating to an inner implementation.
pub struct RecordingController {
    inner: Arc<dyn SdnController>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingController {
    /// Creates a recording controller wrapping the given implementation.
    pub fn new(inner: Arc<dyn SdnController>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ProfileInput<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct ServiceInput<'a> {
    port_name: &'a str,
    s_tag: &'a str,
    c_tag: &'a str,
    tp_id: &'a str,
}

impl SdnController for RecordingController {
    fn get_status(&self) -> PortFuture<'_, String> {
        Box::pin(async move {
            let result = self.inner.get_status().await;
            record_result(&self.recorder, CONTROLLER_PORT, "get_status", &(), &result);
            result
        })
    }

    fn get_programmed_subscribers(&self) -> PortFuture<'_, Vec<ProgrammedSubscriber>> {
        Box::pin(async move {
            let result = self.inner.get_programmed_subscribers().await;
            record_result(
                &self.recorder,
                CONTROLLER_PORT,
                "get_programmed_subscribers",
                &(),
                &result,
            );
            result
        })
    }

    fn get_ports(&self) -> PortFuture<'_, Vec<NetworkPort>> {
        Box::pin(async move {
            let result = self.inner.get_ports().await;
            record_result(&self.recorder, CONTROLLER_PORT, "get_ports", &(), &result);
            result
        })
    }

    fn get_bandwidth_profile<'a>(&'a self, id: &'a str) -> PortFuture<'a, BandwidthProfile> {
        Box::pin(async move {
            let result = self.inner.get_bandwidth_profile(id).await;
            record_result(
                &self.recorder,
                CONTROLLER_PORT,
                "get_bandwidth_profile",
                &ProfileInput { id },
                &result,
            );
            result
        })
    }

    fn provision_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.provision_service(port_name, s_tag, c_tag, tp_id).await;
            let input = ServiceInput { port_name, s_tag, c_tag, tp_id };
            record_result(&self.recorder, CONTROLLER_PORT, "provision_service", &input, &result);
            result
        })
    }

    fn remove_service<'a>(
        &'a self,
        port_name: &'a str,
        s_tag: &'a str,
        c_tag: &'a str,
        tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.remove_service(port_name, s_tag, c_tag, tp_id).await;
            let input = ServiceInput { port_name, s_tag, c_tag, tp_id };
            record_result(&self.recorder, CONTROLLER_PORT, "remove_service", &input, &result);
            result
        })
    }
}
