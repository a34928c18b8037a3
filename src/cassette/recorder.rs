//! Accumulates upstream interactions and writes them as a cassette.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, trace};

use super::format::{Cassette, Interaction};

/// Records interactions in call order and writes the cassette on
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), cassette: Cassette::new(name, commit) }
    }

    /// Record an interaction. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        let interaction =
            Interaction { seq, port: port.into(), method: method.into(), input, output };
        trace!(seq, port = %interaction.port, method = %interaction.method, "recorded interaction");
        self.cassette.interactions.push(interaction);
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// Stamp the cassette and write it to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(mut self) -> Result<PathBuf, std::io::Error> {
        self.cassette.recorded_at = Utc::now();
        self.cassette.save(&self.path)?;
        debug!(path = %self.path.display(), interactions = self.len(), "cassette written");
        Ok(self.path)
    }
}
