//! Entity: the state-holding concept exposed to the host.
//!
//! An entity represents a single observable/controllable aspect of a device
//! (e.g., one heating circuit of a boiler exposed as a climate entity).

mod attribute_value;
mod state;

pub use attribute_value::AttributeValue;
pub use state::EntityState;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::id::{DeviceId, EntityId};

/// UTC timestamp used for `last_changed` and `last_updated`.
pub type Timestamp = DateTime<Utc>;

/// A state holder with identity, owned by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub device_id: Option<DeviceId>,
    /// Host-facing id, e.g. `climate.vicare_heating`.
    pub entity_id: String,
    /// Stable id assigned by the integration, unique across its devices.
    pub unique_id: Option<String>,
    pub friendly_name: String,
    pub state: EntityState,
    pub attributes: HashMap<String, AttributeValue>,
    pub last_changed: Timestamp,
    pub last_updated: Timestamp,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `entity_id` is empty or not of
    /// the `domain.object_id` form, or when `friendly_name` is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.entity_id.is_empty() {
            return Err(ValidationError::EmptyEntityId.into());
        }
        match self.entity_id.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => {}
            _ => return Err(ValidationError::InvalidEntityId(self.entity_id.clone()).into()),
        }
        if self.friendly_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Look up a single attribute by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<EntityId>,
    device_id: Option<DeviceId>,
    entity_id: Option<String>,
    unique_id: Option<String>,
    friendly_name: Option<String>,
    state: EntityState,
    attributes: HashMap<String, AttributeValue>,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: EntityState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: HashMap<String, AttributeValue>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Consume the builder, validate, and return an [`Entity`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if `entity_id` or `friendly_name`
    /// is missing or malformed.
    pub fn build(self) -> Result<Entity, HubError> {
        let now = Utc::now();
        let entity = Entity {
            id: self.id.unwrap_or_default(),
            device_id: self.device_id,
            entity_id: self.entity_id.unwrap_or_default(),
            unique_id: self.unique_id,
            friendly_name: self.friendly_name.unwrap_or_default(),
            state: self.state,
            attributes: self.attributes,
            last_changed: now,
            last_updated: now,
        };
        entity.validate()?;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entity {
        Entity::builder()
            .entity_id("climate.vicare_heating")
            .friendly_name("ViCare Heating")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_entity_with_unknown_state_by_default() {
        let entity = sample();
        assert_eq!(entity.state, EntityState::Unknown);
        assert!(entity.attributes.is_empty());
        assert!(entity.unique_id.is_none());
    }

    #[test]
    fn should_return_validation_error_when_entity_id_missing() {
        let result = Entity::builder().friendly_name("x").build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyEntityId))
        ));
    }

    #[test]
    fn should_return_validation_error_when_entity_id_has_no_domain() {
        let result = Entity::builder()
            .entity_id("vicare_heating")
            .friendly_name("x")
            .build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::InvalidEntityId(_)))
        ));
    }

    #[test]
    fn should_return_validation_error_when_friendly_name_missing() {
        let result = Entity::builder().entity_id("climate.x").build();
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_store_attributes_from_builder() {
        let entity = Entity::builder()
            .entity_id("climate.x")
            .friendly_name("x")
            .attribute("min_temp", AttributeValue::Float(3.0))
            .build()
            .unwrap();
        assert_eq!(
            entity.get_attribute("min_temp"),
            Some(&AttributeValue::Float(3.0))
        );
        assert_eq!(entity.get_attribute("max_temp"), None);
    }
}
