//! Change-tracking bridge from committed tree edits to service writes.
//!
//! The management front-end delivers the changes of one edit transaction
//! as a [`ChangeBatch`]. The handlers here accept or reject the batch; a
//! rejection makes the front-end abort the client's transaction.

pub mod selector;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::adapter::YangAdapter;
use crate::alias::{ServiceAlias, ServiceKey};
use crate::call::CallContext;
use crate::error::AdapterError;
use crate::ports::RunningDatastore;
use crate::translation::paths::{service_port_path, vlans_path, SERVICE_PROFILES_PATH, VLANS_PATH};
use crate::translation::vlan_id_from_yang;

/// Kind of difference recorded for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperation {
    /// Node was created.
    Created,
    /// Leaf value was modified.
    Modified,
    /// Node was deleted.
    Deleted,
    /// User-ordered entry was moved.
    Moved,
}

/// One observed change in an edit transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YangChange {
    /// Schema path of the changed node.
    pub path: String,
    /// New value (or old value for deletions).
    #[serde(default)]
    pub value: String,
    /// What happened to the node.
    pub operation: ChangeOperation,
}

impl YangChange {
    /// Creates a change record.
    pub fn new(
        path: impl Into<String>,
        value: impl Into<String>,
        operation: ChangeOperation,
    ) -> Self {
        Self { path: path.into(), value: value.into(), operation }
    }
}

/// The changes of one edit transaction, in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeBatch {
    changes: Vec<YangChange>,
}

impl ChangeBatch {
    /// Wraps a list of changes.
    #[must_use]
    pub fn new(changes: Vec<YangChange>) -> Self {
        Self { changes }
    }

    /// Number of changes in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the batch holds no change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// All changes in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, YangChange> {
        self.changes.iter()
    }

    /// Changes whose path is addressed by `selector`.
    pub fn select<'a>(&'a self, selector: &'a str) -> impl Iterator<Item = &'a YangChange> + 'a {
        self.changes.iter().filter(move |c| selector::matches(selector, &c.path))
    }

    /// Changes anywhere below `prefix`.
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a YangChange> + 'a {
        self.changes.iter().filter(move |c| selector::is_under(prefix, &c.path))
    }

    /// Value of the only change addressed by `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::ChangeCardinality`] unless exactly one change matches.
    pub fn single_value(&self, selector: &str) -> Result<String, AdapterError> {
        let found: Vec<&YangChange> = self.select(selector).collect();
        match found.as_slice() {
            [change] => Ok(change.value.clone()),
            other => Err(AdapterError::ChangeCardinality {
                selector: selector.to_string(),
                found: other.len(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a ChangeBatch {
    type Item = &'a YangChange;
    type IntoIter = std::slice::Iter<'a, YangChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Rejection reported back to the change subscription.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The batch contains an operation this subtree does not accept.
    #[error("unsupported {operation:?} change on {path}")]
    Unsupported {
        /// Path of the offending change.
        path: String,
        /// The rejected operation.
        operation: ChangeOperation,
    },

    /// Reading the batch or driving the controller failed.
    #[error("operation failed: {0}")]
    OperationFailed(#[from] AdapterError),
}

/// Where the values describing a service are read from.
trait ServiceSource: Sync {
    fn single_value(&self, selector: &str) -> Result<String, AdapterError>;
}

impl ServiceSource for ChangeBatch {
    fn single_value(&self, selector: &str) -> Result<String, AdapterError> {
        ChangeBatch::single_value(self, selector)
    }
}

/// Pre-edit values, used once the edited entry is gone from the diff.
struct Running<'a>(&'a dyn RunningDatastore);

impl ServiceSource for Running<'_> {
    fn single_value(&self, selector: &str) -> Result<String, AdapterError> {
        let values = self.0.leaf_values(selector).map_err(|source| AdapterError::Datastore {
            selector: selector.to_string(),
            source,
        })?;
        match <[String; 1]>::try_from(values) {
            Ok([value]) => Ok(value),
            Err(values) => Err(AdapterError::ChangeCardinality {
                selector: selector.to_string(),
                found: values.len(),
            }),
        }
    }
}

/// Reconstructs the alias of `service_name` from its port, profile and VLAN leaves.
fn read_service(
    source: &dyn ServiceSource,
    service_name: &str,
) -> Result<ServiceAlias, AdapterError> {
    let port = source.single_value(&format!(
        "{SERVICE_PROFILES_PATH}/service-profile[name='{service_name}']/ports/port/name"
    ))?;
    let port_path = service_port_path(service_name, &port);

    let tp_id = source
        .single_value(&format!("{port_path}/bbf-nt-service-profile-voltha:technology-profile-id"))?;
    let vlans_name = source.single_value(&format!("{port_path}/port-vlans/port-vlan/name"))?;

    let vlans = vlans_path(&vlans_name);
    let s_tag = source.single_value(&format!("{vlans}/ingress-rewrite/push-outer-tag/vlan-id"))?;
    let c_tag = source.single_value(&format!("{vlans}/ingress-rewrite/push-second-tag/vlan-id"))?;

    Ok(ServiceAlias {
        key: ServiceKey::new(port, vlan_id_from_yang(&s_tag), vlan_id_from_yang(&c_tag), tp_id),
        service_name: service_name.to_string(),
        vlans_name,
    })
}

/// Applies service profile creations and deletions to the controller.
///
/// Created profiles are read from the batch, deleted ones from the running
/// datastore. Alias bookkeeping after a successful controller write never
/// fails the batch.
///
/// # Errors
///
/// Returns [`BridgeError::Unsupported`] for modified or moved profile names,
/// and [`BridgeError::OperationFailed`] for any read or controller failure.
pub async fn handle_service_profile_changes(
    adapter: &YangAdapter,
    batch: &ChangeBatch,
    running: &dyn RunningDatastore,
    ctx: &CallContext,
) -> Result<(), BridgeError> {
    debug!("processing service profile changes");
    let names_selector = format!("{SERVICE_PROFILES_PATH}/service-profile/name");

    for change in batch.select(&names_selector) {
        match change.operation {
            ChangeOperation::Created => create_service(adapter, batch, ctx, &change.value).await?,
            ChangeOperation::Deleted => {
                delete_service(adapter, &Running(running), ctx, &change.value).await?;
            }
            operation @ (ChangeOperation::Modified | ChangeOperation::Moved) => {
                return Err(BridgeError::Unsupported { path: change.path.clone(), operation });
            }
        }
    }

    Ok(())
}

async fn create_service(
    adapter: &YangAdapter,
    batch: &ChangeBatch,
    ctx: &CallContext,
    service_name: &str,
) -> Result<(), BridgeError> {
    let alias = read_service(batch, service_name)?;
    info!(
        service = %service_name,
        key = %alias.key,
        vlans = %alias.vlans_name,
        "new service profile"
    );

    adapter.provision_service(ctx, &alias.key).await?;

    if let Err(err) = adapter.aliases().store_alias(ctx, &alias).await {
        error!(service = %service_name, error = %err, "cannot store service alias");
    }

    info!(service = %service_name, "service profile creation served");
    Ok(())
}

async fn delete_service(
    adapter: &YangAdapter,
    source: &dyn ServiceSource,
    ctx: &CallContext,
    service_name: &str,
) -> Result<(), BridgeError> {
    let alias = read_service(source, service_name)?;
    info!(service = %service_name, key = %alias.key, "service profile deletion");

    adapter.remove_service(ctx, &alias.key).await?;

    if let Err(err) = adapter.aliases().delete_alias(ctx, &alias.key).await {
        error!(service = %service_name, error = %err, "cannot delete service alias");
    }

    info!(service = %service_name, "service profile removal served");
    Ok(())
}

/// Approves VLAN translation profile changes.
///
/// Creations and deletions are carried out by the matching service profile
/// change. A deletion approves the rest of the batch as is; any other
/// operation rejects it.
///
/// # Errors
///
/// Returns [`BridgeError::Unsupported`] for modified or moved VLAN nodes.
pub fn handle_vlan_changes(batch: &ChangeBatch) -> Result<(), BridgeError> {
    debug!("processing vlan changes");

    for change in batch.under(VLANS_PATH) {
        match change.operation {
            ChangeOperation::Created => {}
            ChangeOperation::Deleted => return Ok(()),
            operation @ (ChangeOperation::Modified | ChangeOperation::Moved) => {
                return Err(BridgeError::Unsupported { path: change.path.clone(), operation });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::SnapshotDatastore;
    use crate::translation::PathValueItem;

    fn created(path: &str, value: &str) -> YangChange {
        YangChange::new(path, value, ChangeOperation::Created)
    }

    #[test]
    fn single_value_requires_exactly_one_match() {
        let batch = ChangeBatch::new(vec![
            created("/m:p/profile[name='a']/name", "a"),
            created("/m:p/profile[name='b']/name", "b"),
            created("/m:p/profile[name='c']/name", "c"),
        ]);
        assert_eq!(batch.single_value("/m:p/profile[name='b']/name").unwrap(), "b");
        assert!(matches!(
            batch.single_value("/m:p/profile/name"),
            Err(AdapterError::ChangeCardinality { found: 3, .. })
        ));
        assert!(matches!(
            batch.single_value("/m:p/profile[name='z']/name"),
            Err(AdapterError::ChangeCardinality { found: 0, .. })
        ));
    }

    #[test]
    fn reads_service_from_running_datastore() {
        let port = service_port_path("svcA", "PORT-1");
        let vlans = vlans_path("svcA-vlans");
        let ds = SnapshotDatastore::new(vec![
            PathValueItem::new(format!("{port}/name"), "PORT-1"),
            PathValueItem::new(
                format!("{port}/bbf-nt-service-profile-voltha:technology-profile-id"),
                "64",
            ),
            PathValueItem::new(
                format!("{port}/port-vlans/port-vlan[name='svcA-vlans']/name"),
                "svcA-vlans",
            ),
            PathValueItem::new(format!("{vlans}/ingress-rewrite/push-outer-tag/vlan-id"), "100"),
            PathValueItem::new(format!("{vlans}/ingress-rewrite/push-second-tag/vlan-id"), "any"),
        ]);

        let alias = read_service(&Running(&ds), "svcA").unwrap();
        assert_eq!(alias.key, ServiceKey::new("PORT-1", "100", "4096", "64"));
        assert_eq!(alias.vlans_name, "svcA-vlans");
    }

    #[test]
    fn vlan_creation_and_deletion_are_approved() {
        let path = format!("{VLANS_PATH}/vlan-translation-profile[name='v']/name");
        let batch = ChangeBatch::new(vec![created(&path, "v")]);
        assert!(handle_vlan_changes(&batch).is_ok());

        let batch = ChangeBatch::new(vec![
            YangChange::new(&path, "v", ChangeOperation::Deleted),
            YangChange::new(&path, "w", ChangeOperation::Modified),
        ]);
        assert!(handle_vlan_changes(&batch).is_ok());
    }

    #[test]
    fn vlan_modification_is_unsupported() {
        let path = format!(
            "{VLANS_PATH}/vlan-translation-profile[name='v']/ingress-rewrite/push-outer-tag/vlan-id"
        );
        let batch = ChangeBatch::new(vec![YangChange::new(path, "101", ChangeOperation::Modified)]);
        assert!(matches!(
            handle_vlan_changes(&batch),
            Err(BridgeError::Unsupported { operation: ChangeOperation::Modified, .. })
        ));
    }

    #[test]
    fn changes_outside_vlan_subtree_are_ignored() {
        let batch = ChangeBatch::new(vec![YangChange::new(
            format!("{SERVICE_PROFILES_PATH}/service-profile[name='a']/name"),
            "a",
            ChangeOperation::Moved,
        )]);
        assert!(handle_vlan_changes(&batch).is_ok());
    }
}
