//! `translate-event` command.

use std::path::Path;

use crate::events::{handle_event, Event};

use super::read::render;

/// Loads a JSON bus event.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn load_event(path: &Path) -> Result<Event, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read event file {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse event file {}: {e}", path.display()))
}

/// Execute the `translate-event` command.
///
/// Prints the notification items followed by the channel termination items,
/// or a note when the event has no notification counterpart.
///
/// # Errors
///
/// Returns an error string if the event cannot be loaded or translated.
pub fn run(file: &Path) -> Result<(), String> {
    let event = load_event(file)?;

    match handle_event(&event).map_err(|e| e.to_string())? {
        Some(items) => {
            println!("# notification");
            print!("{}", render(&items.notification, false)?);
            println!("# channel-termination");
            print!("{}", render(&items.channel_termination, false)?);
        }
        None => println!("event {} ignored", event.header.id),
    }
    Ok(())
}
