//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the translation core and an
//! external system (device inventory, SDN controller, KV store, running
//! datastore). Implementations live in `src/adapters/`.

pub mod controller;
pub mod datastore;
pub mod inventory;
pub mod kv;

use std::future::Future;
use std::pin::Pin;

use crate::error::PortError;

pub use controller::{
    BandwidthProfile, NetworkPort, ProgrammedSubscriber, SdnController, UniTagInfo,
    PORT_NAME_ANNOTATION,
};
pub use datastore::RunningDatastore;
pub use inventory::{AdminState, Device, DeviceInventory, DevicePort, OfpPort, OperStatus, PortType};
pub use kv::KvStore;

/// Boxed future returned by async port methods, keeping the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
