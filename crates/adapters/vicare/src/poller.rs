//! Runs climates on the blocking pool and keeps them refreshed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use heathub_app::ports::Climate;
use heathub_app::ports::integration::DiscoveredDevice;
use heathub_domain::device::Device;
use heathub_domain::entity::Entity;
use heathub_domain::error::HubError;
use heathub_domain::id::{DeviceId, EntityId};

use crate::climate::ViCareClimate;
use crate::service::Command;
use crate::vendor::{Appliance, Circuit};

/// A climate owned by the integration, addressable by the host.
pub(crate) struct ClimateSlot<C, A> {
    pub id: EntityId,
    /// Host-facing id, e.g. `climate.vicare_heating`.
    pub entity_id: String,
    climate: Arc<Mutex<ViCareClimate<C, A>>>,
}

impl<C, A> Clone for ClimateSlot<C, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            entity_id: self.entity_id.clone(),
            climate: Arc::clone(&self.climate),
        }
    }
}

impl<C, A> ClimateSlot<C, A>
where
    C: Circuit + Send + 'static,
    A: Appliance + Send + Sync + 'static,
{
    pub fn new(climate: ViCareClimate<C, A>) -> Self {
        let entity_id = format!("climate.{}", slugify(climate.name()));
        Self {
            id: EntityId::new(),
            entity_id,
            climate: Arc::new(Mutex::new(climate)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, ViCareClimate<C, A>> {
        self.climate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Poll the circuit and return its refreshed entity.
    pub async fn poll(&self, device: &Device) -> Result<Entity, HubError> {
        self.run(Command::Update, device).await
    }

    /// Apply `command` and return the resulting entity.
    ///
    /// The climate lock is only ever taken on the blocking pool: a poll in
    /// progress holds it for a full vendor round-trip.
    pub async fn run(&self, command: Command, device: &Device) -> Result<Entity, HubError> {
        let slot = self.clone();
        let device_id = device.id;
        tokio::task::spawn_blocking(move || -> Result<Entity, HubError> {
            let mut climate = slot.lock();
            command.apply(&mut *climate)?;
            slot.entity(&climate, device_id)
        })
        .await
        .map_err(|err| HubError::Integration(Box::new(err)))?
    }

    fn entity(
        &self,
        climate: &ViCareClimate<C, A>,
        device_id: DeviceId,
    ) -> Result<Entity, HubError> {
        Entity::builder()
            .id(self.id)
            .device_id(device_id)
            .entity_id(&self.entity_id)
            .unique_id(climate.unique_id())
            .friendly_name(climate.name())
            .state(climate.state())
            .attributes(climate.state_attributes())
            .build()
    }
}

/// Poll every climate in turn and collect their entities.
pub(crate) async fn refresh<C, A>(
    device: &Device,
    slots: &[ClimateSlot<C, A>],
) -> Result<DiscoveredDevice, HubError>
where
    C: Circuit + Send + 'static,
    A: Appliance + Send + Sync + 'static,
{
    let mut entities = Vec::with_capacity(slots.len());
    for slot in slots {
        entities.push(slot.poll(device).await?);
    }
    Ok(DiscoveredDevice {
        device: device.clone(),
        entities,
    })
}

/// Re-poll every `interval` and send the refreshed device until the receiver
/// goes away.
pub(crate) async fn background_poll_loop<C, A>(
    device: Device,
    slots: Vec<ClimateSlot<C, A>>,
    interval: Duration,
    tx: mpsc::Sender<DiscoveredDevice>,
) where
    C: Circuit + Send + 'static,
    A: Appliance + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // setup already polled once
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match refresh(&device, &slots).await {
            Ok(discovered) => {
                tracing::debug!(
                    entities = discovered.entities.len(),
                    "ViCare poll round complete"
                );
                if tx.send(discovered).await.is_err() {
                    tracing::debug!("update receiver dropped, stopping ViCare poll loop");
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "ViCare poll round failed");
            }
        }
    }
}

/// Lowercase `name` and replace every run of non-alphanumerics with `_`.
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}
