//! Live adapters for real external interactions.

pub mod inventory;
pub mod kv;
pub mod onos;
