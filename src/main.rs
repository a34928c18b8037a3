//! Binary entrypoint for the `bbf-adapter` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Options may come from a local .env file.
    dotenvy::dotenv().ok();

    // Recording is handled in commands::dispatch via BBF_RECORD=<dir>.
    match bbf_adapter::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
