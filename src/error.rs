//! Error types shared by the translation core.

use std::time::Duration;

use thiserror::Error;

/// Opaque error returned by port implementations (transport clients, KV backends).
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the translation, alias and orchestration layers.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// An upstream call failed; always fatal to the enclosing operation.
    #[error("{operation} failed: {source}")]
    Upstream {
        /// Name of the upstream call.
        operation: &'static str,
        /// Error reported by the port.
        #[source]
        source: PortError,
    },

    /// The caller cancelled the request while an upstream call was in flight.
    #[error("{operation} cancelled by caller")]
    Cancelled {
        /// Name of the interrupted upstream call.
        operation: &'static str,
    },

    /// The request deadline elapsed while an upstream call was in flight.
    #[error("{operation} exceeded its deadline of {timeout:?}")]
    DeadlineExceeded {
        /// Name of the interrupted upstream call.
        operation: &'static str,
        /// Timeout the request was created with.
        timeout: Duration,
    },

    /// A UNI port has no embedded OpenFlow port descriptor.
    #[error("no ofp port in uni: device {device_id} port {port_no}")]
    MissingUniDescriptor {
        /// Device owning the port.
        device_id: String,
        /// Port number on the device.
        port_no: u32,
    },

    /// A device event lacks a required context key.
    #[error("missing key from event context: {key}")]
    MissingEventContext {
        /// The absent key.
        key: &'static str,
    },

    /// A programmed service references a location with no known port name.
    #[error("no port name for location: {0}")]
    UnknownLocation(String),

    /// No alias is stored for the given KV path.
    #[error("service alias not found in kv store: {0}")]
    AliasNotFound(String),

    /// An alias could not be serialized.
    #[error("cannot encode service alias for {path}: {source}")]
    AliasEncode {
        /// KV path of the alias.
        path: String,
        /// Serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A stored alias could not be deserialized.
    #[error("cannot decode service alias at {path}: {source}")]
    AliasDecode {
        /// KV path of the alias.
        path: String,
        /// Deserializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A synthesized fallback alias could not be persisted.
    #[error("cannot store fallback service alias {path}: {source}")]
    FallbackAliasStore {
        /// KV path of the alias.
        path: String,
        /// Underlying store failure.
        #[source]
        source: Box<AdapterError>,
    },

    /// A change batch or datastore lookup did not yield exactly one value.
    #[error("expected exactly one value for {selector}, found {found}")]
    ChangeCardinality {
        /// Selector that was evaluated.
        selector: String,
        /// Number of values found.
        found: usize,
    },

    /// A datastore lookup failed.
    #[error("cannot read datastore values for {selector}: {source}")]
    Datastore {
        /// Selector that was evaluated.
        selector: String,
        /// Error reported by the datastore.
        #[source]
        source: PortError,
    },

    /// The adapter has been shut down and no longer serves requests.
    #[error("adapter is not ready")]
    NotReady,
}

impl AdapterError {
    /// Wraps a port error with the name of the failed upstream call.
    pub(crate) fn upstream(operation: &'static str) -> impl FnOnce(PortError) -> Self {
        move |source| Self::Upstream { operation, source }
    }

    /// Returns `true` when the caller's cancellation or deadline stopped the
    /// call, so nothing is known about the upstream state.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}
