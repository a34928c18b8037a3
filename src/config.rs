//! Adapter configuration and logging setup.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Connection and runtime options, each also readable from the environment.
#[derive(Debug, Clone, Args)]
pub struct AdapterConfig {
    /// Log verbosity (error, warn, info, debug, trace).
    #[arg(long, env = "BBF_LOG_LEVEL", default_value = "error", global = true)]
    pub log_level: String,

    /// ONOS REST API endpoint (`host:port`).
    #[arg(
        long,
        env = "BBF_ONOS_REST_ENDPOINT",
        default_value = "voltha-infra-onos-classic-hs.infra.svc:8181",
        global = true
    )]
    pub onos_rest_endpoint: String,

    /// User for the ONOS REST API.
    #[arg(long, env = "BBF_ONOS_USER", default_value = "onos", global = true)]
    pub onos_user: String,

    /// Password for the ONOS REST API.
    #[arg(
        long,
        env = "BBF_ONOS_PASS",
        default_value = "rocks",
        hide_env_values = true,
        global = true
    )]
    pub onos_pass: String,

    /// VOLTHA northbound gRPC endpoint.
    #[arg(
        long,
        env = "BBF_VOLTHA_NBI_ENDPOINT",
        default_value = "voltha-voltha-api.voltha.svc:55555",
        global = true
    )]
    pub voltha_nbi_endpoint: String,

    /// Directory holding the service alias store.
    #[arg(long, env = "BBF_KV_STORE_DIR", default_value = ".bbf-adapter/kv", global = true)]
    pub kv_store_dir: PathBuf,

    /// Deadline for a whole command, in seconds.
    #[arg(long, env = "BBF_REQUEST_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub request_timeout_secs: u64,

    /// Serve upstream calls from a recorded cassette instead of the network.
    #[arg(long, env = "BBF_REPLAY", global = true)]
    pub replay: Option<PathBuf>,
}

impl AdapterConfig {
    /// The configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds the log filter for a configured level name.
///
/// # Errors
///
/// Returns an error if `level` is not a valid filter directive.
pub fn log_filter(level: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(level.to_ascii_lowercase())
        .map_err(|e| format!("invalid log level {level:?}: {e}"))
}

/// Installs the stderr log subscriber.
///
/// A subscriber that is already installed is kept.
///
/// # Errors
///
/// Returns an error if `level` is not a valid filter directive.
pub fn init_logging(level: &str) -> Result<(), String> {
    let filter = log_filter(level)?;
    // Fails only when a global subscriber already exists.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    Ok(())
}
