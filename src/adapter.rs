//! Orchestration of upstream reads and writes into data tree items.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::alias::{AliasStore, ServiceAlias, ServiceKey};
use crate::call::CallContext;
use crate::error::{AdapterError, PortError};
use crate::ports::{
    DeviceInventory, NetworkPort, ProgrammedSubscriber, SdnController, UniTagInfo,
    PORT_NAME_ANNOTATION,
};
use crate::translation::{
    translate_bandwidth_profiles, translate_device, translate_onu_ports, translate_service,
    translate_vlans, PathValueItem,
};

/// Maps `<switch-id>/<port-number>` locations to annotated port names.
///
/// Ports without a name annotation are left out.
#[must_use]
pub fn locations_to_port_names(ports: &[NetworkPort]) -> HashMap<String, String> {
    ports
        .iter()
        .filter_map(|port| {
            port.annotations.get(PORT_NAME_ANNOTATION).map(|name| (port.location(), name.clone()))
        })
        .collect()
}

/// Serves the four tree reads and two service writes from the upstream ports.
///
/// Holds no state of its own beyond its collaborators; concurrent calls
/// share nothing but the ports.
#[derive(Clone)]
pub struct YangAdapter {
    inventory: Arc<dyn DeviceInventory>,
    controller: Arc<dyn SdnController>,
    aliases: AliasStore,
}

impl YangAdapter {
    /// Creates an adapter over the given collaborators.
    #[must_use]
    pub fn new(
        inventory: Arc<dyn DeviceInventory>,
        controller: Arc<dyn SdnController>,
        aliases: AliasStore,
    ) -> Self {
        Self { inventory, controller, aliases }
    }

    /// Translates every device, plus the UNIs of every ONU.
    ///
    /// A port listing failure fails the call; an ONU whose ports cannot be
    /// translated only loses its port items.
    ///
    /// # Errors
    ///
    /// Returns an error if the device or port listing fails.
    pub async fn get_devices(&self, ctx: &CallContext) -> Result<Vec<PathValueItem>, AdapterError> {
        let devices = ctx.run("list-devices", self.inventory.list_devices()).await?;
        debug!(devices = devices.len(), "listed devices");

        let mut items = Vec::new();
        for device in &devices {
            items.extend(translate_device(device));

            if device.root {
                continue;
            }

            let ports = ctx
                .run("list-device-ports", self.inventory.list_device_ports(&device.id))
                .await?;
            debug!(device_id = %device.id, ports = ports.len(), "listed onu ports");

            match translate_onu_ports(&device.id, &ports) {
                Ok(port_items) => items.extend(port_items),
                Err(err) => warn!(device_id = %device.id, error = %err, "skipping onu ports"),
            }
        }

        Ok(items)
    }

    /// Translates every programmed service into its service profile leaves.
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream call fails, a service sits on a port
    /// with no known name, or a fallback alias cannot be persisted.
    pub async fn get_services(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<PathValueItem>, AdapterError> {
        self.translate_programmed(ctx, translate_service).await
    }

    /// Translates every programmed service into its VLAN translation profile.
    ///
    /// # Errors
    ///
    /// Same as [`get_services`](Self::get_services).
    pub async fn get_vlans(&self, ctx: &CallContext) -> Result<Vec<PathValueItem>, AdapterError> {
        self.translate_programmed(ctx, translate_vlans).await
    }

    async fn translate_programmed(
        &self,
        ctx: &CallContext,
        translate: fn(&UniTagInfo, &ServiceAlias) -> Vec<PathValueItem>,
    ) -> Result<Vec<PathValueItem>, AdapterError> {
        let services = self.programmed_subscribers(ctx).await?;
        if services.is_empty() {
            return Ok(Vec::new());
        }

        let ports = ctx.run("get-ports", self.controller.get_ports()).await?;
        debug!(ports = ports.len(), "listed controller ports");
        let port_names = locations_to_port_names(&ports);

        let mut items = Vec::new();
        for service in &services {
            let port_name = port_names
                .get(&service.location)
                .ok_or_else(|| AdapterError::UnknownLocation(service.location.clone()))?;

            let tag = &service.tag_info;
            let key = ServiceKey::new(
                port_name.as_str(),
                tag.pon_s_tag.to_string(),
                tag.pon_c_tag.to_string(),
                tag.technology_profile_id.to_string(),
            );
            let alias = self.aliases.resolve_alias_or_fallback(ctx, &tag.service_name, key).await?;

            items.extend(translate(tag, &alias));
        }

        Ok(items)
    }

    /// Fetches every bandwidth profile referenced by a programmed service,
    /// once per distinct name, and translates them.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the services or fetching any profile fails.
    pub async fn get_bandwidth_profiles(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<PathValueItem>, AdapterError> {
        let services = self.programmed_subscribers(ctx).await?;
        if services.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let mut profiles = Vec::new();
        for service in &services {
            let tag = &service.tag_info;
            let names = [&tag.downstream_bandwidth_profile, &tag.upstream_bandwidth_profile];
            for name in names.into_iter().flatten() {
                if !seen.insert(name.as_str()) {
                    continue;
                }
                let profile = ctx
                    .run("get-bandwidth-profile", async {
                        self.controller
                            .get_bandwidth_profile(name)
                            .await
                            .map_err(|e| PortError::from(format!("{name}: {e}")))
                    })
                    .await?;
                debug!(profile = %profile.id, "fetched bandwidth profile");
                profiles.push(profile);
            }
        }

        Ok(translate_bandwidth_profiles(&profiles))
    }

    /// Provisions a service on the controller.
    ///
    /// # Errors
    ///
    /// Returns the controller's error wrapped as [`AdapterError::Upstream`].
    pub async fn provision_service(
        &self,
        ctx: &CallContext,
        key: &ServiceKey,
    ) -> Result<(), AdapterError> {
        ctx.run(
            "provision-service",
            self.controller.provision_service(&key.port, &key.s_tag, &key.c_tag, &key.tp_id),
        )
        .await?;
        info!(service = %key, "service provisioned");
        Ok(())
    }

    /// Removes a service from the controller.
    ///
    /// # Errors
    ///
    /// Returns the controller's error wrapped as [`AdapterError::Upstream`].
    pub async fn remove_service(
        &self,
        ctx: &CallContext,
        key: &ServiceKey,
    ) -> Result<(), AdapterError> {
        ctx.run(
            "remove-service",
            self.controller.remove_service(&key.port, &key.s_tag, &key.c_tag, &key.tp_id),
        )
        .await?;
        info!(service = %key, "service removed");
        Ok(())
    }

    /// Returns the raw status body of the controller's OLT application.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller cannot be reached.
    pub async fn controller_status(&self, ctx: &CallContext) -> Result<String, AdapterError> {
        ctx.run("get-status", self.controller.get_status()).await
    }

    /// Alias persistence used alongside the service writes.
    #[must_use]
    pub fn aliases(&self) -> &AliasStore {
        &self.aliases
    }

    /// The controller port, for connection checks.
    #[must_use]
    pub fn controller(&self) -> &dyn SdnController {
        self.controller.as_ref()
    }

    async fn programmed_subscribers(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<ProgrammedSubscriber>, AdapterError> {
        let services = ctx
            .run("get-programmed-subscribers", self.controller.get_programmed_subscribers())
            .await?;
        debug!(services = services.len(), "listed programmed subscribers");
        Ok(services)
    }
}

/// Shared access to a [`YangAdapter`] that stops serving after shutdown.
///
/// Front-ends and the change bridge acquire the adapter per request; once
/// [`shutdown`](Self::shutdown) is called, every acquisition fails instead of
/// reaching a half torn-down adapter.
#[derive(Clone)]
pub struct AdapterHandle {
    adapter: Arc<YangAdapter>,
    ready: Arc<AtomicBool>,
}

impl AdapterHandle {
    /// Wraps an adapter in a ready handle.
    #[must_use]
    pub fn new(adapter: YangAdapter) -> Self {
        Self { adapter: Arc::new(adapter), ready: Arc::new(AtomicBool::new(true)) }
    }

    /// Returns the adapter if the handle is still ready.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NotReady`] after [`shutdown`](Self::shutdown).
    pub fn acquire(&self) -> Result<Arc<YangAdapter>, AdapterError> {
        if self.ready.load(Ordering::Acquire) {
            Ok(Arc::clone(&self.adapter))
        } else {
            Err(AdapterError::NotReady)
        }
    }

    /// Marks every clone of this handle as not ready.
    pub fn shutdown(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Whether the handle still serves requests.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}
