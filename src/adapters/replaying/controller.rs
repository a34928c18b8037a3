//! Replaying adapter for the `SdnController` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::CONTROLLER_PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{
    BandwidthProfile, NetworkPort, PortFuture, ProgrammedSubscriber, SdnController,
};

/// Serves recorded controller responses from a cassette.
pub struct ReplayingController {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingController {
    /// Create a replaying controller backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying controller with no cassette. Every call fails.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }

    fn replay<T: serde::de::DeserializeOwned + Send + 'static>(
        &self,
        method: &str,
    ) -> PortFuture<'static, T> {
        let output = next_output(self.replayer.as_ref(), CONTROLLER_PORT, method);
        Box::pin(async move { replay_result(output) })
    }
}

impl SdnController for ReplayingController {
    fn get_status(&self) -> PortFuture<'_, String> {
        self.replay("get_status")
    }

    fn get_programmed_subscribers(&self) -> PortFuture<'_, Vec<ProgrammedSubscriber>> {
        self.replay("get_programmed_subscribers")
    }

    fn get_ports(&self) -> PortFuture<'_, Vec<NetworkPort>> {
        self.replay("get_ports")
    }

    fn get_bandwidth_profile<'a>(&'a self, _id: &'a str) -> PortFuture<'a, BandwidthProfile> {
        self.replay("get_bandwidth_profile")
    }

    fn provision_service<'a>(
        &'a self,
        _port_name: &'a str,
        _s_tag: &'a str,
        _c_tag: &'a str,
        _tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        self.replay("provision_service")
    }

    fn remove_service<'a>(
        &'a self,
        _port_name: &'a str,
        _s_tag: &'a str,
        _c_tag: &'a str,
        _tp_id: &'a str,
    ) -> PortFuture<'a, ()> {
        self.replay("remove_service")
    }
}
