//! In-process adapters backed by plain collections.

pub mod datastore;
pub mod kv;

pub use datastore::SnapshotDatastore;
pub use kv::MemoryKvStore;
