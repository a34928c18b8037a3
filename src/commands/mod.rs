//! Command dispatch and handlers.

pub mod apply;
pub mod event;
pub mod read;
pub mod service;
pub mod status;

use std::env;
use std::path::PathBuf;

use crate::adapter::AdapterHandle;
use crate::call::CallContext;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::{init_logging, AdapterConfig};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `BBF_RECORD` is set to a directory path, all upstream interactions are
/// recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    init_logging(&cli.config.log_level)?;

    // Event translation touches no upstream service.
    if let Command::TranslateEvent { file } = &cli.command {
        return event::run(file);
    }

    let ctx = ServiceContext::from_config(&cli.config)?;
    let (ctx, session) = if let Ok(path) = env::var("BBF_RECORD") {
        let (ctx, session) = ctx.recording_at(PathBuf::from(path))?;
        (ctx, Some(session))
    } else {
        (ctx, None)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;

    let handle = ctx.handle();
    let result = runtime.block_on(dispatch_with_handle(&cli.command, &cli.config, &handle));
    handle.shutdown();

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop the adapter first to release Arc references
        drop(handle);
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command against the given adapter handle.
async fn dispatch_with_handle(
    command: &Command,
    config: &AdapterConfig,
    handle: &AdapterHandle,
) -> Result<(), String> {
    let call = CallContext::with_timeout(config.request_timeout());

    match command {
        Command::Devices(args) => read::run(handle, &call, read::Tree::Devices, *args).await,
        Command::Services(args) => read::run(handle, &call, read::Tree::Services, *args).await,
        Command::Vlans(args) => read::run(handle, &call, read::Tree::Vlans, *args).await,
        Command::BandwidthProfiles(args) => {
            read::run(handle, &call, read::Tree::BandwidthProfiles, *args).await
        }
        Command::Provision(args) => service::provision(handle, &call, &args.key()).await,
        Command::Remove(args) => service::remove(handle, &call, &args.key()).await,
        Command::Status => status::run(handle, &call).await,
        Command::WaitReady => status::wait_ready(handle, &call).await,
        Command::ApplyChanges { file } => apply::run(handle, &call, file).await,
        Command::TranslateEvent { file } => event::run(file),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
