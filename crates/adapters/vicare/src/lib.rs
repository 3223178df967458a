//! # heathub-adapter-vicare
//!
//! ViCare adapter: exposes the heating circuits of a Viessmann appliance as
//! climate entities.
//!
//! ## How it works
//!
//! The ViCare client (outside this crate) implements [`Circuit`] and
//! [`Appliance`]. Each circuit becomes one [`ViCareClimate`], which polls
//! the circuit into a snapshot and translates vendor modes and programs
//! into host hvac modes and presets. [`VicareIntegration`] owns the
//! climates, polls them on the blocking pool and routes service calls.
//!
//! ## Mode translation
//!
//! | ViCare mode | Shown as | Written for |
//! |-------------|----------|-------------|
//! | `forcedNormal` | `heat` | `heat` |
//! | `heating` | `heat` | |
//! | `dhwAndHeating` | `auto` | `auto` |
//! | `dhwAndHeatingCooling` | `auto` | |
//! | `forcedReduced` | `off` | `off` |
//! | `dhw`, `standby` | `off` | |
//!
//! Programs `comfort` and `eco` map to the presets of the same name.
//!
//! ## Services
//!
//! | Service | Payload |
//! |---------|---------|
//! | `set_hvac_mode` | `{"hvac_mode": "heat"}` |
//! | `set_preset_mode` | `{"preset_mode": "comfort"}` |
//! | `set_temperature` | `{"temperature": 21.5}` |
//! | `set_vicare_mode` | `{"vicare_mode": "dhwAndHeating"}` |
//! | `update` | ignored |
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `heathub-app` and `heathub-domain`.

mod climate;
mod config;
mod error;
#[cfg(test)]
mod fake;
mod poller;
mod service;
pub mod vendor;
pub mod vocabulary;

pub use climate::{
    ClimateSnapshot, VICARE_TEMP_HEATING_MAX, VICARE_TEMP_HEATING_MIN, ViCareClimate,
    appliance_device,
};
pub use config::{HeatingType, VicareConfig};
pub use error::{ClimateError, VicareError};
pub use service::Command;
pub use vendor::{Appliance, ApplianceConfig, Circuit, HeatingUnit};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use heathub_app::ports::integration::{DiscoveredDevice, Integration};
use heathub_domain::device::Device;
use heathub_domain::entity::Entity;
use heathub_domain::error::{HubError, NotFoundError};
use heathub_domain::id::EntityId;

use poller::ClimateSlot;

pub(crate) const INTEGRATION_NAME: &str = "vicare";

/// ViCare integration: one climate entity per heating circuit of one
/// appliance.
pub struct VicareIntegration<C, A> {
    config: VicareConfig,
    device: Device,
    climates: Vec<ClimateSlot<C, A>>,
    /// Optional channel receiving the refreshed device after every
    /// background poll.
    update_tx: Option<mpsc::Sender<DiscoveredDevice>>,
    poll_handle: Option<JoinHandle<()>>,
}

impl<C, A> VicareIntegration<C, A>
where
    C: Circuit + Send + 'static,
    A: Appliance + Send + Sync + 'static,
{
    /// Create the integration for `appliance` and its `circuits`.
    ///
    /// A configured heating type other than `auto` replaces the one in
    /// `appliance_config`. If `update_tx` is `Some`, a background poll loop
    /// is spawned on [`setup`](Integration::setup).
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if the appliance model is empty.
    pub fn new(
        config: VicareConfig,
        appliance: A,
        mut appliance_config: ApplianceConfig,
        circuits: Vec<C>,
        update_tx: Option<mpsc::Sender<DiscoveredDevice>>,
    ) -> Result<Self, HubError> {
        if config.heating_type != HeatingType::Auto {
            appliance_config.heating_type = config.heating_type;
        }
        let device = appliance_device(&appliance_config)?;
        let appliance = Arc::new(appliance);
        let numbered = circuits.len() > 1;

        let climates = circuits
            .into_iter()
            .map(|circuit| {
                let name = if numbered {
                    format!("{} Heating {}", config.name, circuit.id())
                } else {
                    format!("{} Heating", config.name)
                };
                ClimateSlot::new(ViCareClimate::new(
                    name,
                    Arc::clone(&appliance),
                    circuit,
                    appliance_config.clone(),
                ))
            })
            .collect();

        Ok(Self {
            config,
            device,
            climates,
            update_tx,
            poll_handle: None,
        })
    }

    /// Check whether this integration owns the given entity.
    #[must_use]
    pub fn owns_entity(&self, entity_id: EntityId) -> bool {
        self.climates.iter().any(|slot| slot.id == entity_id)
    }

    fn slot(&self, entity_id: EntityId) -> Result<&ClimateSlot<C, A>, NotFoundError> {
        self.climates
            .iter()
            .find(|slot| slot.id == entity_id)
            .ok_or_else(|| NotFoundError {
                entity: "Entity",
                id: entity_id.to_string(),
            })
    }
}

impl<C, A> Integration for VicareIntegration<C, A>
where
    C: Circuit + Send + 'static,
    A: Appliance + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        INTEGRATION_NAME
    }

    async fn setup(&mut self) -> Result<Vec<DiscoveredDevice>, HubError> {
        if self.climates.is_empty() {
            tracing::warn!(device = %self.device.name, "no heating circuits found");
        }

        let discovered = poller::refresh(&self.device, &self.climates).await?;
        tracing::info!(
            device = %self.device.name,
            climates = discovered.entities.len(),
            "ViCare discovery complete"
        );

        if let Some(tx) = self.update_tx.take() {
            let interval = Duration::from_secs(u64::from(self.config.scan_interval_secs.max(1)));
            let handle = tokio::spawn(poller::background_poll_loop(
                self.device.clone(),
                self.climates.clone(),
                interval,
                tx,
            ));
            self.poll_handle = Some(handle);

            tracing::info!(
                interval_secs = self.config.scan_interval_secs,
                "ViCare background poll loop started"
            );
        }

        Ok(vec![discovered])
    }

    async fn handle_service_call(
        &self,
        entity_id: EntityId,
        service: &str,
        data: serde_json::Value,
    ) -> Result<Entity, HubError> {
        let slot = self.slot(entity_id)?;
        let command = Command::parse(service, data)?;
        tracing::debug!(entity_id = %slot.entity_id, ?command, "handling service call");

        slot.run(command, &self.device).await
    }

    async fn teardown(&mut self) -> Result<(), HubError> {
        if let Some(handle) = self.poll_handle.take() {
            handle.abort();
            tracing::debug!("ViCare poll task aborted");
        }
        tracing::info!("ViCare integration stopped");
        Ok(())
    }
}
