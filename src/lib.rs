//! Northbound adapter exposing VOLTHA and ONOS state as BBF YANG data.
//!
//! The library translates upstream device and service records into
//! path/value items of the BBF data models, keeps service aliases in a
//! key-value store, and turns data tree change batches into controller
//! writes. The `bbf-adapter` binary drives it from the command line.

pub mod adapter;
pub mod adapters;
pub mod alias;
pub mod bridge;
pub mod call;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod ports;
pub mod translation;

use clap::Parser;

pub use adapter::{AdapterHandle, YangAdapter};
pub use error::AdapterError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
