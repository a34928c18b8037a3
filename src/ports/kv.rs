//! Key-value store port for durable adapter bookkeeping.

use super::PortFuture;

/// A durable key-value store addressed by `/`-separated paths.
///
/// Implementations must be safe for concurrent use; the core adds no locking.
pub trait KvStore: Send + Sync {
    /// Reads the value stored at `path`, or `None` when nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get<'a>(&'a self, path: &'a str) -> PortFuture<'a, Option<Vec<u8>>>;

    /// Writes `value` at `path`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put<'a>(&'a self, path: &'a str, value: Vec<u8>) -> PortFuture<'a, ()>;

    /// Deletes the value at `path`. Deleting a missing path is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete<'a>(&'a self, path: &'a str) -> PortFuture<'a, ()>;
}
