//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::{AdapterHandle, YangAdapter};
use crate::adapters::live::inventory::UnconfiguredInventory;
use crate::adapters::live::kv::FileKvStore;
use crate::adapters::live::onos::OnosClient;
use crate::adapters::recording::{RecordingController, RecordingInventory};
use crate::adapters::replaying::{ReplayingController, ReplayingInventory};
use crate::alias::AliasStore;
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::AdapterConfig;
use crate::ports::{DeviceInventory, KvStore, SdnController};

/// Bundles the port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Device inventory of the access network.
    pub inventory: Arc<dyn DeviceInventory>,
    /// SDN controller holding the programmed services.
    pub controller: Arc<dyn SdnController>,
    /// Durable store for service aliases.
    pub kv: Arc<dyn KvStore>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured upstream services.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &AdapterConfig) -> Result<Self, String> {
        let onos = OnosClient::new(
            config.onos_rest_endpoint.as_str(),
            config.onos_user.as_str(),
            config.onos_pass.as_str(),
            config.request_timeout(),
        )
        .map_err(|e| format!("cannot create onos client: {e}"))?;

        Ok(Self {
            inventory: Arc::new(UnconfiguredInventory::new(config.voltha_nbi_endpoint.as_str())),
            controller: Arc::new(onos),
            kv: Arc::new(FileKvStore::new(&config.kv_store_dir)),
        })
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer over the same cassette so that
    /// per-port cursors are independent. Aliases still use `kv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path, kv: Arc<dyn KvStore>) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let replayer = || Arc::new(std::sync::Mutex::new(CassetteReplayer::new(&cassette)));

        Ok(Self {
            inventory: Arc::new(ReplayingInventory::new(replayer())),
            controller: Arc::new(ReplayingController::new(replayer())),
            kv,
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file fail every call with a
    /// message naming the port.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig, kv: Arc<dyn KvStore>) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            inventory: Arc::new(
                replayers
                    .inventory
                    .map_or_else(ReplayingInventory::unconfigured, ReplayingInventory::new),
            ),
            controller: Arc::new(
                replayers
                    .controller
                    .map_or_else(ReplayingController::unconfigured, ReplayingController::new),
            ),
            kv,
        })
    }

    /// Creates the context selected by `config`: replaying when a cassette is
    /// configured, live otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be loaded or the live client
    /// cannot be built.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, String> {
        match &config.replay {
            Some(path) => Self::replaying(path, Arc::new(FileKvStore::new(&config.kv_store_dir))),
            None => Self::live(config),
        }
    }

    /// Wraps the upstream ports of `self` so that every interaction is recorded
    /// into a new session under `dir`.
    ///
    /// The alias store is not recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be created.
    pub fn recording_at(self, dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&dir)?;

        let ctx = Self {
            inventory: Arc::new(RecordingInventory::new(
                self.inventory,
                Arc::clone(&session.inventory),
            )),
            controller: Arc::new(RecordingController::new(
                self.controller,
                Arc::clone(&session.controller),
            )),
            kv: self.kv,
        };

        Ok((ctx, session))
    }

    /// Builds the adapter over this context's ports.
    #[must_use]
    pub fn adapter(&self) -> YangAdapter {
        YangAdapter::new(
            Arc::clone(&self.inventory),
            Arc::clone(&self.controller),
            AliasStore::new(Arc::clone(&self.kv)),
        )
    }

    /// Builds a ready handle over this context's adapter.
    #[must_use]
    pub fn handle(&self) -> AdapterHandle {
        AdapterHandle::new(self.adapter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryKvStore;
    use crate::call::CallContext;
    use crate::cassette::format::Interaction;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let mut cassette = Cassette::new("test", "abc");
        cassette.interactions = interactions;
        cassette.save(path).unwrap();
    }

    fn status_interaction(seq: u64) -> Interaction {
        Interaction {
            seq,
            port: "controller".into(),
            method: "get_status".into(),
            input: json!(null),
            output: json!({"Ok": "{\"status\":\"running\"}"}),
        }
    }

    #[tokio::test]
    async fn replaying_context_from_monolithic_cassette() {
        let dir = std::env::temp_dir().join("bbf_adapter_ctx_test_mono");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                status_interaction(0),
                Interaction {
                    seq: 1,
                    port: "inventory".into(),
                    method: "list_devices".into(),
                    input: json!(null),
                    output: json!({"Ok": []}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path, Arc::new(MemoryKvStore::new())).unwrap();
        let adapter = ctx.adapter();
        let call = CallContext::background();
        assert!(adapter.controller_status(&call).await.unwrap().contains("running"));
        assert!(adapter.get_devices(&call).await.unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn unconfigured_port_fails_with_clear_message() {
        let dir = std::env::temp_dir().join("bbf_adapter_ctx_test_ports");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("controller.cassette.yaml");
        write_cassette(&path, vec![status_interaction(0)]);

        let config = CassetteConfig { controller: Some(path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config, Arc::new(MemoryKvStore::new())).unwrap();

        let err = ctx.inventory.list_devices().await.unwrap_err();
        assert!(err.to_string().contains("no cassette loaded for port inventory"));
        assert!(ctx.controller.get_status().await.is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn recording_context_writes_controller_cassette() {
        let dir = std::env::temp_dir().join("bbf_adapter_ctx_test_record");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let source = dir.join("source.cassette.yaml");
        write_cassette(&source, vec![status_interaction(0)]);

        let replay = ServiceContext::replaying(&source, Arc::new(MemoryKvStore::new())).unwrap();
        let (ctx, session) = replay.recording_at(dir.join("recorded")).unwrap();
        ctx.controller.get_status().await.unwrap();
        drop(ctx);

        let out = session.finish().unwrap();
        let recorded = std::fs::read_to_string(out.join("controller.cassette.yaml")).unwrap();
        assert!(recorded.contains("get_status"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
