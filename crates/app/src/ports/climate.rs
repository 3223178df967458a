//! Climate port: the capability a climate integration exposes to the host.
//!
//! The host polls [`Climate::update`] on its own schedule, reads the
//! accessors to render state, and forwards user commands to the setters.
//! Accessors are pure projections of the last poll and never perform IO.

use std::collections::HashMap;

use heathub_domain::climate::{
    ClimateFeature, HvacAction, HvacMode, PRECISION_TENTHS, Preset, TemperatureUnit,
};
use heathub_domain::entity::{AttributeValue, EntityState};

/// A controllable climate entity.
pub trait Climate {
    /// Error raised by the setters.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Display name.
    fn name(&self) -> &str;

    /// Identifier that is stable across restarts and unique across every
    /// climate the host knows about.
    fn unique_id(&self) -> String;

    /// Refresh the cached state from the device.
    ///
    /// Failures are absorbed (logged by the implementation), so a flaky
    /// device never destabilises the host.
    fn update(&mut self);

    fn current_temperature(&self) -> Option<f64>;

    fn target_temperature(&self) -> Option<f64>;

    /// Current mode, `None` when unknown.
    fn hvac_mode(&self) -> Option<HvacMode>;

    /// Every mode [`set_hvac_mode`](Self::set_hvac_mode) accepts.
    fn hvac_modes(&self) -> Vec<HvacMode>;

    fn hvac_action(&self) -> Option<HvacAction> {
        None
    }

    fn preset_mode(&self) -> Option<Preset> {
        None
    }

    fn preset_modes(&self) -> Vec<Preset> {
        Vec::new()
    }

    fn min_temp(&self) -> f64 {
        7.0
    }

    fn max_temp(&self) -> f64 {
        35.0
    }

    fn precision(&self) -> f64 {
        PRECISION_TENTHS
    }

    fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::Celsius
    }

    fn supported_features(&self) -> Vec<ClimateFeature> {
        Vec::new()
    }

    /// Integration-specific attributes shown next to the standard ones.
    fn extra_state_attributes(&self) -> &HashMap<String, AttributeValue>;

    /// Switch the operating mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode is not supported or the device rejects
    /// the write.
    fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<(), Self::Error>;

    /// Switch the preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is not supported or the device rejects
    /// the write.
    fn set_preset_mode(&mut self, preset: Preset) -> Result<(), Self::Error>;

    /// Set the target temperature. `None` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the write.
    fn set_temperature(&mut self, temperature: Option<f64>) -> Result<(), Self::Error>;

    /// Entity state derived from the current mode.
    fn state(&self) -> EntityState {
        self.hvac_mode().into()
    }

    /// Standard climate attributes merged with
    /// [`extra_state_attributes`](Self::extra_state_attributes).
    fn state_attributes(&self) -> HashMap<String, AttributeValue> {
        let mut attributes = HashMap::new();
        let features = self.supported_features();

        attributes.insert(
            "hvac_modes".to_string(),
            AttributeValue::List(
                self.hvac_modes()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
        );
        attributes.insert("min_temp".to_string(), self.min_temp().into());
        attributes.insert("max_temp".to_string(), self.max_temp().into());
        attributes.insert("precision".to_string(), self.precision().into());
        attributes.insert(
            "temperature_unit".to_string(),
            self.temperature_unit().as_str().into(),
        );
        attributes.insert(
            "supported_features".to_string(),
            AttributeValue::List(features.iter().map(ToString::to_string).collect()),
        );
        if let Some(current) = self.current_temperature() {
            attributes.insert("current_temperature".to_string(), current.into());
        }
        if features.contains(&ClimateFeature::TargetTemperature)
            && let Some(target) = self.target_temperature()
        {
            attributes.insert("temperature".to_string(), target.into());
        }
        if let Some(action) = self.hvac_action() {
            attributes.insert("hvac_action".to_string(), action.as_str().into());
        }
        if features.contains(&ClimateFeature::PresetMode) {
            if let Some(preset) = self.preset_mode() {
                attributes.insert("preset_mode".to_string(), preset.as_str().into());
            }
            attributes.insert(
                "preset_modes".to_string(),
                AttributeValue::List(self.preset_modes().iter().map(ToString::to_string).collect()),
            );
        }

        for (key, value) in self.extra_state_attributes() {
            attributes.insert(key.clone(), value.clone());
        }
        attributes
    }
}
