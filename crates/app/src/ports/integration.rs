//! Integration port: lifecycle and service-call handling for device integrations.
//!
//! An integration bridges a vendor API (ViCare, …) into the host. It
//! discovers devices/entities on setup and handles service calls directed at
//! entities it owns.

use std::future::Future;

use heathub_domain::device::Device;
use heathub_domain::entity::Entity;
use heathub_domain::error::HubError;
use heathub_domain::id::EntityId;

/// A pluggable device integration.
///
/// Implementations live in adapter crates (e.g. `adapter_vicare`).
/// The host calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): initialise, poll once, return discoveries
/// 2. (the host runs, forwarding service calls via [`handle_service_call`](Self::handle_service_call))
/// 3. [`teardown`](Self::teardown): clean up resources
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"vicare"`).
    fn name(&self) -> &'static str;

    /// Initialise the integration and return everything it discovered.
    ///
    /// Integrations that keep polling in the background start their loop
    /// here and report later refreshes through their own channel.
    fn setup(&mut self) -> impl Future<Output = Result<Vec<DiscoveredDevice>, HubError>> + Send;

    /// Handle a service call (e.g. `set_hvac_mode`, `set_temperature`) for an
    /// entity owned by this integration.
    ///
    /// Returns the new [`Entity`] state after handling the call.
    fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<Entity, HubError>> + Send;

    /// Called on graceful shutdown. Clean up any background tasks or connections.
    fn teardown(&mut self) -> impl Future<Output = Result<(), HubError>> + Send;
}

/// A device and its associated entities discovered during integration setup.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub device: Device,
    pub entities: Vec<Entity>,
}

impl DiscoveredDevice {
    /// Look up a discovered entity by its host-facing id.
    #[must_use]
    pub fn entity(&self, entity_id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.entity_id == entity_id)
    }
}
