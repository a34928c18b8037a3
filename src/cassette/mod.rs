//! Cassette format for recording and replaying upstream interactions.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
