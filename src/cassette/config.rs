//! Cassette configuration for per-port replay.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. A port without a cassette path fails every
/// call during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the device inventory cassette file.
    pub inventory: Option<PathBuf>,
    /// Path to the SDN controller cassette file.
    pub controller: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the device inventory port.
    pub inventory: Option<Arc<Mutex<CassetteReplayer>>>,
    /// Replayer for the SDN controller port.
    pub controller: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl CassetteConfig {
    /// Returns the per-port cassette paths inside a recording directory.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            inventory: Some(dir.join("inventory.cassette.yaml")),
            controller: Some(dir.join("controller.cassette.yaml")),
        }
    }

    /// Load a single cassette file and create a shared replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<Arc<Mutex<CassetteReplayer>>, String> {
        let cassette = Cassette::load(path)?;
        Ok(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            inventory: self.inventory.as_deref().map(Self::load_port_cassette).transpose()?,
            controller: self.controller.as_deref().map(Self::load_port_cassette).transpose()?,
        })
    }
}
