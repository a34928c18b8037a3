//! Change bridge scenarios: service profile creation and deletion, VLAN
//! approval and rejection.

mod support;

use std::sync::Arc;

use bbf_adapter::adapters::memory::{MemoryKvStore, SnapshotDatastore};
use bbf_adapter::alias::{AliasStore, ServiceKey};
use bbf_adapter::bridge::{
    handle_service_profile_changes, handle_vlan_changes, BridgeError, ChangeBatch, ChangeOperation,
    YangChange,
};
use bbf_adapter::call::CallContext;
use bbf_adapter::translation::paths::{service_port_path, service_profile_path, vlans_path};
use bbf_adapter::translation::PathValueItem;
use bbf_adapter::{AdapterError, YangAdapter};

use support::{FailingKv, FakeController, FakeInventory};

const SERVICE: &str = "internet";
const PORT: &str = "BBSM000a0001-1";
const VLANS: &str = "internet-vlans";

/// Leaves describing the `internet` service, as `(path, value)`.
fn service_leaves(s_tag: &str, c_tag: &str) -> Vec<(String, String)> {
    let port = service_port_path(SERVICE, PORT);
    let vlans = vlans_path(VLANS);
    vec![
        (format!("{}/name", service_profile_path(SERVICE)), SERVICE.into()),
        (format!("{port}/name"), PORT.into()),
        (format!("{port}/bbf-nt-service-profile-voltha:technology-profile-id"), "64".into()),
        (format!("{port}/port-vlans/port-vlan[name='{VLANS}']/name"), VLANS.into()),
        (format!("{vlans}/name"), VLANS.into()),
        (format!("{vlans}/ingress-rewrite/push-outer-tag/vlan-id"), s_tag.into()),
        (format!("{vlans}/ingress-rewrite/push-second-tag/vlan-id"), c_tag.into()),
    ]
}

fn batch(leaves: &[(String, String)], operation: ChangeOperation) -> ChangeBatch {
    ChangeBatch::new(
        leaves
            .iter()
            .map(|(path, value)| YangChange::new(path.as_str(), value.as_str(), operation))
            .collect(),
    )
}

fn setup(controller: FakeController) -> (YangAdapter, Arc<FakeController>, Arc<MemoryKvStore>) {
    let controller = Arc::new(controller);
    let kv = Arc::new(MemoryKvStore::new());
    let adapter = YangAdapter::new(
        Arc::new(FakeInventory::default()),
        controller.clone(),
        AliasStore::new(kv.clone()),
    );
    (adapter, controller, kv)
}

#[tokio::test]
async fn created_profile_provisions_and_stores_alias() {
    let (adapter, controller, kv) = setup(FakeController::default());
    let ctx = CallContext::background();
    let changes = batch(&service_leaves("any", "200"), ChangeOperation::Created);

    handle_service_profile_changes(&adapter, &changes, &SnapshotDatastore::default(), &ctx)
        .await
        .unwrap();

    assert_eq!(controller.calls(), vec!["provision BBSM000a0001-1/4096/200/64"]);

    let key = ServiceKey::new(PORT, "4096", "200", "64");
    let alias = adapter.aliases().load_alias(&ctx, &key).await.unwrap();
    assert_eq!(alias.service_name, SERVICE);
    assert_eq!(alias.vlans_name, VLANS);
    assert_eq!(kv.paths(), vec!["services/BBSM000a0001-1/4096/200/64".to_string()]);
}

#[tokio::test]
async fn deleted_profile_is_read_from_running_datastore() {
    let (adapter, controller, kv) = setup(FakeController::default());
    let ctx = CallContext::background();
    let leaves = service_leaves("900", "any");

    // Seed the alias as a previous creation would have.
    let create = batch(&leaves, ChangeOperation::Created);
    handle_service_profile_changes(&adapter, &create, &SnapshotDatastore::default(), &ctx)
        .await
        .unwrap();

    // A deletion diff only carries the list entry name.
    let deletion = batch(&leaves[..1], ChangeOperation::Deleted);
    let running = SnapshotDatastore::new(
        leaves
            .iter()
            .map(|(path, value)| PathValueItem::new(path.as_str(), value.as_str()))
            .collect(),
    );
    handle_service_profile_changes(&adapter, &deletion, &running, &ctx).await.unwrap();

    assert_eq!(
        controller.calls(),
        vec!["provision BBSM000a0001-1/900/4096/64", "remove BBSM000a0001-1/900/4096/64"]
    );
    assert!(kv.paths().is_empty());
}

#[tokio::test]
async fn rejected_provisioning_fails_without_storing_alias() {
    let (adapter, _, kv) =
        setup(FakeController { reject_writes: true, ..FakeController::default() });
    let ctx = CallContext::background();
    let changes = batch(&service_leaves("any", "200"), ChangeOperation::Created);

    let err =
        handle_service_profile_changes(&adapter, &changes, &SnapshotDatastore::default(), &ctx)
            .await
            .unwrap_err();

    assert!(matches!(
        err,
        BridgeError::OperationFailed(AdapterError::Upstream { operation: "provision-service", .. })
    ));
    assert!(kv.paths().is_empty());
}

fn setup_failing_kv() -> (YangAdapter, Arc<FakeController>) {
    let controller = Arc::new(FakeController::default());
    let adapter = YangAdapter::new(
        Arc::new(FakeInventory::default()),
        controller.clone(),
        AliasStore::new(Arc::new(FailingKv)),
    );
    (adapter, controller)
}

#[tokio::test]
async fn creation_succeeds_when_alias_cannot_be_stored() {
    let (adapter, controller) = setup_failing_kv();
    let changes = batch(&service_leaves("any", "200"), ChangeOperation::Created);

    handle_service_profile_changes(
        &adapter,
        &changes,
        &SnapshotDatastore::default(),
        &CallContext::background(),
    )
    .await
    .unwrap();

    assert_eq!(controller.calls(), vec!["provision BBSM000a0001-1/4096/200/64"]);
}

#[tokio::test]
async fn deletion_succeeds_when_alias_cannot_be_deleted() {
    let (adapter, controller) = setup_failing_kv();
    let leaves = service_leaves("900", "any");
    let deletion = batch(&leaves[..1], ChangeOperation::Deleted);
    let running = SnapshotDatastore::new(
        leaves
            .iter()
            .map(|(path, value)| PathValueItem::new(path.as_str(), value.as_str()))
            .collect(),
    );

    handle_service_profile_changes(&adapter, &deletion, &running, &CallContext::background())
        .await
        .unwrap();

    assert_eq!(controller.calls(), vec!["remove BBSM000a0001-1/900/4096/64"]);
}

#[tokio::test]
async fn incomplete_creation_is_an_operation_failure() {
    let (adapter, controller, _) = setup(FakeController::default());
    let leaves = service_leaves("any", "200");
    // Drop the technology profile leaf.
    let changes = batch(&[leaves[0].clone(), leaves[1].clone()], ChangeOperation::Created);

    let err = handle_service_profile_changes(
        &adapter,
        &changes,
        &SnapshotDatastore::default(),
        &CallContext::background(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        BridgeError::OperationFailed(AdapterError::ChangeCardinality { found: 0, .. })
    ));
    assert!(controller.calls().is_empty());
}

#[tokio::test]
async fn modified_profile_name_is_unsupported() {
    let (adapter, controller, _) = setup(FakeController::default());
    let changes = batch(&service_leaves("any", "200")[..1], ChangeOperation::Modified);

    let err = handle_service_profile_changes(
        &adapter,
        &changes,
        &SnapshotDatastore::default(),
        &CallContext::background(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, BridgeError::Unsupported { operation: ChangeOperation::Modified, .. }));
    assert!(controller.calls().is_empty());
}

#[test]
fn vlan_creation_and_deletion_are_approved() {
    let leaves = service_leaves("any", "200");
    assert!(handle_vlan_changes(&batch(&leaves[4..], ChangeOperation::Created)).is_ok());
    assert!(handle_vlan_changes(&batch(&leaves[4..], ChangeOperation::Deleted)).is_ok());
}

#[test]
fn moved_vlan_profile_is_unsupported() {
    let leaves = service_leaves("any", "200");
    let err = handle_vlan_changes(&batch(&leaves[4..5], ChangeOperation::Moved)).unwrap_err();
    assert!(err.to_string().contains("vlan-translation-profile[name='internet-vlans']"));
}
