//! On-disk cassette format.
//!
//! A cassette is a YAML document holding the upstream calls of one session
//! in call order. Outputs of fallible calls use the `{"Ok": value}` /
//! `{"Err": message}` convention.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port name of the device inventory.
pub const INVENTORY_PORT: &str = "inventory";
/// Port name of the SDN controller.
pub const CONTROLLER_PORT: &str = "controller";

/// A single recorded call on an upstream port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position of the call in the session (assigned by the recorder).
    pub seq: u64,
    /// Port name, [`INVENTORY_PORT`] or [`CONTROLLER_PORT`].
    pub port: String,
    /// Trait method invoked on the port.
    pub method: String,
    /// Arguments of the call; `null` for calls without arguments.
    pub input: serde_json::Value,
    /// Outcome of the call.
    pub output: serde_json::Value,
}

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Commit of the adapter that recorded the cassette.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// An empty cassette stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Reads a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Writes the cassette to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, yaml)
    }

    /// Interactions recorded on `port`, in call order.
    pub fn interactions_on<'a>(
        &'a self,
        port: &'a str,
    ) -> impl Iterator<Item = &'a Interaction> + 'a {
        self.interactions.iter().filter(move |i| i.port == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cassette() -> Cassette {
        let mut cassette = Cassette::new("test-cassette", "abc123");
        cassette.interactions = vec![
            Interaction {
                seq: 0,
                port: CONTROLLER_PORT.into(),
                method: "get_bandwidth_profile".into(),
                input: json!({"id": "Default"}),
                output: json!({"Ok": {"id": "Default", "cir": 1_000_000, "cbs": "1001"}}),
            },
            Interaction {
                seq: 1,
                port: INVENTORY_PORT.into(),
                method: "list_device_ports".into(),
                input: json!({"device_id": "onu-1"}),
                output: json!({"Err": "device inventory transport not configured"}),
            },
        ];
        cassette
    }

    #[test]
    fn saved_cassette_loads_back() {
        let dir = std::env::temp_dir().join("bbf_adapter_format_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("session.cassette.yaml");

        let cassette = sample_cassette();
        cassette.save(&path).unwrap();
        assert_eq!(Cassette::load(&path).unwrap(), cassette);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn interactions_are_filtered_by_port() {
        let cassette = sample_cassette();
        let methods: Vec<&str> =
            cassette.interactions_on(INVENTORY_PORT).map(|i| i.method.as_str()).collect();
        assert_eq!(methods, vec!["list_device_ports"]);
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join("bbf_adapter_format_garbage");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.cassette.yaml");
        std::fs::write(&path, "interactions: [unterminated").unwrap();

        let err = Cassette::load(&path).unwrap_err();
        assert!(err.contains("Failed to parse cassette file"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
