//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::alias::ServiceKey;
use crate::config::AdapterConfig;
use crate::translation::vlan_id_from_yang;

/// Top-level CLI parser for `bbf-adapter`.
#[derive(Debug, Parser)]
#[command(
    name = "bbf-adapter",
    version,
    about = "Expose VOLTHA and ONOS state as BBF YANG data tree items"
)]
pub struct Cli {
    /// Connection and runtime options.
    #[command(flatten)]
    pub config: AdapterConfig,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Output selection shared by the read commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct ReadArgs {
    /// Print the items as a JSON array instead of `path = value` lines.
    #[arg(long)]
    pub json: bool,
}

/// Identity of a service on the controller.
#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    /// Name of the UNI port the service runs on.
    #[arg(long)]
    pub port: String,
    /// Outer VLAN tag, or `any`.
    #[arg(long)]
    pub s_tag: String,
    /// Inner VLAN tag, or `any`.
    #[arg(long)]
    pub c_tag: String,
    /// Technology profile id.
    #[arg(long)]
    pub tp_id: String,
}

impl ServiceArgs {
    /// The service key named by these arguments, with `any` tags in the
    /// controller's numeric form.
    #[must_use]
    pub fn key(&self) -> ServiceKey {
        ServiceKey::new(
            self.port.as_str(),
            vlan_id_from_yang(&self.s_tag),
            vlan_id_from_yang(&self.c_tag),
            self.tp_id.as_str(),
        )
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the device aggregation items.
    Devices(ReadArgs),
    /// Print the service profile items.
    Services(ReadArgs),
    /// Print the VLAN translation profile items.
    Vlans(ReadArgs),
    /// Print the bandwidth profile items.
    BandwidthProfiles(ReadArgs),
    /// Provision a service on the controller.
    Provision(ServiceArgs),
    /// Remove a service from the controller.
    Remove(ServiceArgs),
    /// Print the controller OLT application status.
    Status,
    /// Wait until the controller answers status requests.
    WaitReady,
    /// Apply a YAML change batch against a running snapshot.
    ApplyChanges {
        /// File holding `changes` and `running` lists.
        file: PathBuf,
    },
    /// Translate a JSON bus event into notification items.
    TranslateEvent {
        /// File holding the event.
        file: PathBuf,
    },
}
