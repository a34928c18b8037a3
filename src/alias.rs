//! Service alias persistence and fallback resolution.
//!
//! A service can be provisioned through the adapter (which records the
//! operator-chosen names) or directly on the controller (which knows only the
//! port, tags and technology profile). Aliases bridge the two: they map the
//! controller's natural key to the names used as list keys in the data tree.
//!
//! KV layout:
//!
//! ```text
//! services/<port>/<sTag>/<cTag>/<tpId>  ->  JSON ServiceAlias
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::call::CallContext;
use crate::error::AdapterError;
use crate::ports::KvStore;

/// KV prefix under which service aliases are stored.
pub const KV_STORE_SERVICES: &str = "services";

/// Natural identity of a provisioned service as known to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceKey {
    /// Subscriber port name.
    pub port: String,
    /// Outer VLAN tag.
    #[serde(rename = "sTag")]
    pub s_tag: String,
    /// Inner VLAN tag.
    #[serde(rename = "cTag")]
    pub c_tag: String,
    /// Technology profile identifier.
    #[serde(rename = "tpId")]
    pub tp_id: String,
}

impl ServiceKey {
    /// Builds a key from its four components.
    pub fn new(
        port: impl Into<String>,
        s_tag: impl Into<String>,
        c_tag: impl Into<String>,
        tp_id: impl Into<String>,
    ) -> Self {
        Self { port: port.into(), s_tag: s_tag.into(), c_tag: c_tag.into(), tp_id: tp_id.into() }
    }

    /// KV path of the alias stored for this key.
    #[must_use]
    pub fn kv_path(&self) -> String {
        format!("{KV_STORE_SERVICES}/{self}")
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.port, self.s_tag, self.c_tag, self.tp_id)
    }
}

/// Operator-facing names of a service, keyed by its [`ServiceKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAlias {
    /// Natural key of the service.
    pub key: ServiceKey,
    /// Name of the service profile list entry.
    #[serde(rename = "serviceName")]
    pub service_name: String,
    /// Name of the VLAN translation profile list entry.
    #[serde(rename = "vlansName")]
    pub vlans_name: String,
}

impl ServiceAlias {
    /// Synthesizes the alias of a service provisioned outside the adapter.
    #[must_use]
    pub fn fallback(key: ServiceKey, uni_tag_service_name: &str) -> Self {
        let service_name = format!("{}-{uni_tag_service_name}", key.port);
        let vlans_name = format!("{service_name}-vlans");
        Self { key, service_name, vlans_name }
    }
}

/// Reads and writes service aliases in the KV store.
#[derive(Clone)]
pub struct AliasStore {
    kv: Arc<dyn KvStore>,
}

impl AliasStore {
    /// Creates an alias store over the given KV backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Persists an alias under the path derived from its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias cannot be encoded or written.
    pub async fn store_alias(
        &self,
        ctx: &CallContext,
        alias: &ServiceAlias,
    ) -> Result<(), AdapterError> {
        let path = alias.key.kv_path();
        let value = serde_json::to_vec(alias)
            .map_err(|source| AdapterError::AliasEncode { path: path.clone(), source })?;
        ctx.run("kv-put", self.kv.put(&path, value)).await
    }

    /// Loads the alias stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::AliasNotFound`] when nothing is stored, and a
    /// decode or upstream error for unreadable entries.
    pub async fn load_alias(
        &self,
        ctx: &CallContext,
        key: &ServiceKey,
    ) -> Result<ServiceAlias, AdapterError> {
        let path = key.kv_path();
        let found = ctx.run("kv-get", self.kv.get(&path)).await?;
        let value = found.ok_or_else(|| AdapterError::AliasNotFound(path.clone()))?;
        serde_json::from_slice(&value).map_err(|source| AdapterError::AliasDecode { path, source })
    }

    /// Deletes the alias stored for `key`.
    ///
    /// Callers treat failures as best-effort: an orphaned alias is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the deletion.
    pub async fn delete_alias(
        &self,
        ctx: &CallContext,
        key: &ServiceKey,
    ) -> Result<(), AdapterError> {
        ctx.run("kv-delete", self.kv.delete(&key.kv_path())).await
    }

    /// Returns the stored alias for `key`, or synthesizes and persists a
    /// fallback when none can be loaded.
    ///
    /// A load interrupted by cancellation or the deadline says nothing about
    /// what is stored, so it is returned as is and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Cancelled`] or [`AdapterError::DeadlineExceeded`]
    /// when the load is interrupted, and [`AdapterError::FallbackAliasStore`]
    /// if the fallback cannot be persisted; later reads would otherwise see
    /// unstable names.
    pub async fn resolve_alias_or_fallback(
        &self,
        ctx: &CallContext,
        fallback_uni_tag_service_name: &str,
        key: ServiceKey,
    ) -> Result<ServiceAlias, AdapterError> {
        let err = match self.load_alias(ctx, &key).await {
            Ok(alias) => return Ok(alias),
            Err(err) if err.is_interrupted() => return Err(err),
            Err(err) => err,
        };

        let alias = ServiceAlias::fallback(key, fallback_uni_tag_service_name);
        warn!(
            error = %err,
            service = %alias.service_name,
            vlans = %alias.vlans_name,
            "cannot load service alias, using fallback"
        );

        self.store_alias(ctx, &alias).await.map_err(|source| AdapterError::FallbackAliasStore {
            path: alias.key.kv_path(),
            source: Box::new(source),
        })?;

        Ok(alias)
    }
}
