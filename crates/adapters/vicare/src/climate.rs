//! ViCare heating circuit exposed as a [`Climate`].
//!
//! [`ViCareClimate`] keeps the last polled [`ClimateSnapshot`] of one circuit
//! and translates between the vendor vocabulary and the host one. Reads are
//! pure projections of the snapshot. Writes go straight to the circuit; only
//! the target temperature is updated optimistically, everything else waits
//! for the next poll.

use std::collections::HashMap;
use std::sync::Arc;

use heathub_app::ports::Climate;
use heathub_domain::climate::{
    ClimateFeature, HvacAction, HvacMode, PRECISION_WHOLE, Preset, TemperatureUnit,
};
use heathub_domain::device::Device;
use heathub_domain::entity::AttributeValue;
use heathub_domain::error::HubError;

use crate::config::HeatingType;
use crate::error::{ClimateError, VicareError};
use crate::vendor::{Appliance, ApplianceConfig, Circuit, HeatingUnit};
use crate::vocabulary;

/// Lowest settable target temperature, in °C.
pub const VICARE_TEMP_HEATING_MIN: f64 = 3.0;
/// Highest settable target temperature, in °C.
pub const VICARE_TEMP_HEATING_MAX: f64 = 37.0;

const MANUFACTURER: &str = "Viessmann";

/// Host device describing the appliance. Shared by all of its circuits.
///
/// # Errors
///
/// Returns [`HubError::Validation`] if the model name is empty.
pub fn appliance_device(config: &ApplianceConfig) -> Result<Device, HubError> {
    Device::builder()
        .name(&config.model)
        .manufacturer(MANUFACTURER)
        .model(&config.model)
        .integration(crate::INTEGRATION_NAME)
        .unique_id(&config.serial)
        .build()
}

/// Last known state of a circuit. Every field is absent until polled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimateSnapshot {
    /// Room temperature when the circuit has a room sensor, else supply temperature.
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    /// Raw vendor mode string.
    pub vicare_mode: Option<String>,
    /// Raw vendor program string.
    pub vicare_program: Option<String>,
    /// Whether any burner or compressor is active; absent when the appliance
    /// reported none.
    pub heating: Option<bool>,
    /// Vendor modes the circuit accepts.
    pub vicare_modes: Option<Vec<String>>,
    pub attributes: HashMap<String, AttributeValue>,
}

/// Map the per-field "not supported" signal to an absent value.
fn supported<T>(result: Result<T, VicareError>) -> Result<Option<T>, VicareError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_supported() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Fold the activity of `units` into `heating`, stopping at the first active
/// unit or at the first unit that does not report activity.
fn fold_activity<U: HeatingUnit>(
    units: Result<Vec<U>, VicareError>,
    heating: &mut Option<bool>,
) -> Result<(), VicareError> {
    let Some(units) = supported(units)? else {
        return Ok(());
    };
    for unit in units {
        let flag = heating.get_or_insert(false);
        if *flag {
            break;
        }
        match supported(unit.is_active())? {
            Some(active) => *flag = active,
            None => break,
        }
    }
    Ok(())
}

/// One heating circuit of a ViCare appliance.
pub struct ViCareClimate<C, A> {
    name: String,
    appliance: Arc<A>,
    circuit: C,
    config: ApplianceConfig,
    snapshot: ClimateSnapshot,
}

impl<C: Circuit, A: Appliance> ViCareClimate<C, A> {
    /// Bind a climate to one circuit of `appliance`. Nothing is read until
    /// the first [`update`](Climate::update).
    pub fn new(
        name: impl Into<String>,
        appliance: Arc<A>,
        circuit: C,
        config: ApplianceConfig,
    ) -> Self {
        Self {
            name: name.into(),
            appliance,
            circuit,
            config,
            snapshot: ClimateSnapshot::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &ClimateSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn heating_type(&self) -> HeatingType {
        self.config.heating_type
    }

    /// Host device of the appliance this circuit belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if the model name is empty.
    pub fn device_info(&self) -> Result<Device, HubError> {
        appliance_device(&self.config)
    }

    /// Vendor modes the circuit reported on the last poll.
    #[must_use]
    pub fn vicare_modes(&self) -> &[String] {
        self.snapshot.vicare_modes.as_deref().unwrap_or_default()
    }

    /// Write a raw vendor mode, bypassing the host vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::InvalidVicareMode`] when the circuit did not
    /// report `vicare_mode` as supported on the last poll, or
    /// [`ClimateError::Vendor`] when the write fails.
    #[tracing::instrument(skip(self), fields(circuit = %self.circuit.id()))]
    pub fn set_vicare_mode(&mut self, vicare_mode: &str) -> Result<(), ClimateError> {
        if !self.vicare_modes().iter().any(|mode| mode == vicare_mode) {
            return Err(ClimateError::InvalidVicareMode(vicare_mode.to_string()));
        }
        self.circuit.set_mode(vicare_mode)?;
        Ok(())
    }

    /// Read every field in order, writing each into the snapshot as soon as
    /// it is known. Stops at the first error that is not "not supported".
    fn poll(&mut self) -> Result<(), VicareError> {
        let room_temperature = supported(self.circuit.room_temperature())?;
        let supply_temperature = supported(self.circuit.supply_temperature())?;
        self.snapshot.current_temperature = room_temperature.or(supply_temperature);

        self.snapshot.vicare_program = supported(self.circuit.active_program())?;
        self.snapshot.target_temperature =
            supported(self.circuit.current_desired_temperature())?;
        self.snapshot.vicare_mode = supported(self.circuit.active_mode())?;

        let attributes = &mut self.snapshot.attributes;
        *attributes = HashMap::new();
        if let Some(room) = room_temperature {
            attributes.insert("room_temperature".to_string(), room.into());
        }
        if let Some(program) = &self.snapshot.vicare_program {
            attributes.insert("active_vicare_program".to_string(), program.as_str().into());
        }
        if let Some(mode) = &self.snapshot.vicare_mode {
            attributes.insert("active_vicare_mode".to_string(), mode.as_str().into());
        }
        if let Some(slope) = supported(self.circuit.heating_curve_slope())? {
            attributes.insert("heating_curve_slope".to_string(), slope.into());
        }
        if let Some(shift) = supported(self.circuit.heating_curve_shift())? {
            attributes.insert("heating_curve_shift".to_string(), shift.into());
        }
        if let Some(target) = supported(self.circuit.target_supply_temperature())? {
            attributes.insert("target_supply_temperature".to_string(), target.into());
        }

        self.snapshot.vicare_modes = supported(self.circuit.modes())?;
        if let Some(modes) = &self.snapshot.vicare_modes {
            self.snapshot
                .attributes
                .insert("vicare_modes".to_string(), modes.clone().into());
        }

        let mut heating = None;
        fold_activity(self.appliance.burners(), &mut heating)?;
        fold_activity(self.appliance.compressors(), &mut heating)?;
        self.snapshot.heating = heating;

        Ok(())
    }
}

impl<C: Circuit, A: Appliance> Climate for ViCareClimate<C, A> {
    type Error = ClimateError;

    fn name(&self) -> &str {
        &self.name
    }

    fn unique_id(&self) -> String {
        format!("{}-{}", self.config.serial, self.circuit.id())
    }

    fn update(&mut self) {
        let Err(err) = self.poll() else {
            return;
        };
        let circuit = self.circuit.id();
        match err {
            VicareError::NotSupported { .. } => {}
            VicareError::Connection(source) => {
                tracing::error!(%circuit, error = %source, "unable to retrieve data from ViCare server");
            }
            VicareError::RateLimit(reason) => {
                tracing::error!(%circuit, %reason, "ViCare API rate limit exceeded");
            }
            VicareError::Decode(reason) => {
                tracing::error!(%circuit, %reason, "unable to decode data from ViCare server");
            }
            VicareError::InvalidData(reason) => {
                tracing::error!(%circuit, %reason, "invalid data from ViCare server");
            }
        }
    }

    fn current_temperature(&self) -> Option<f64> {
        self.snapshot.current_temperature
    }

    fn target_temperature(&self) -> Option<f64> {
        self.snapshot.target_temperature
    }

    fn hvac_mode(&self) -> Option<HvacMode> {
        self.snapshot
            .vicare_mode
            .as_deref()
            .and_then(vocabulary::hvac_mode_for)
    }

    fn hvac_modes(&self) -> Vec<HvacMode> {
        vocabulary::hvac_modes()
    }

    fn hvac_action(&self) -> Option<HvacAction> {
        if self.snapshot.heating == Some(true) {
            Some(HvacAction::Heating)
        } else {
            Some(HvacAction::Idle)
        }
    }

    fn preset_mode(&self) -> Option<Preset> {
        self.snapshot
            .vicare_program
            .as_deref()
            .and_then(vocabulary::preset_for)
    }

    fn preset_modes(&self) -> Vec<Preset> {
        vocabulary::presets()
    }

    fn min_temp(&self) -> f64 {
        VICARE_TEMP_HEATING_MIN
    }

    fn max_temp(&self) -> f64 {
        VICARE_TEMP_HEATING_MAX
    }

    fn precision(&self) -> f64 {
        PRECISION_WHOLE
    }

    fn temperature_unit(&self) -> TemperatureUnit {
        TemperatureUnit::Celsius
    }

    fn supported_features(&self) -> Vec<ClimateFeature> {
        vec![ClimateFeature::TargetTemperature, ClimateFeature::PresetMode]
    }

    fn extra_state_attributes(&self) -> &HashMap<String, AttributeValue> {
        &self.snapshot.attributes
    }

    #[tracing::instrument(skip(self), fields(circuit = %self.circuit.id()))]
    fn set_hvac_mode(&mut self, mode: HvacMode) -> Result<(), ClimateError> {
        let vicare_mode = vocabulary::vicare_mode_for(mode)
            .ok_or_else(|| ClimateError::InvalidHvacMode(mode.to_string()))?;
        tracing::debug!(%mode, %vicare_mode, "setting hvac mode");
        self.circuit.set_mode(vicare_mode.as_str())?;
        Ok(())
    }

    /// Deactivates the cached program, then activates the new one. The two
    /// writes are not atomic.
    #[tracing::instrument(skip(self), fields(circuit = %self.circuit.id()))]
    fn set_preset_mode(&mut self, preset: Preset) -> Result<(), ClimateError> {
        let program = vocabulary::program_for(preset)
            .ok_or_else(|| ClimateError::InvalidPreset(preset.to_string()))?;
        tracing::debug!(%preset, %program, "setting preset");
        if let Some(current) = &self.snapshot.vicare_program {
            self.circuit.deactivate_program(current)?;
        }
        self.circuit.activate_program(program.as_str())?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(circuit = %self.circuit.id()))]
    fn set_temperature(&mut self, temperature: Option<f64>) -> Result<(), ClimateError> {
        let Some(temperature) = temperature else {
            return Ok(());
        };
        let program = self
            .snapshot
            .vicare_program
            .as_deref()
            .ok_or(ClimateError::NoActiveProgram)?;
        self.circuit.set_program_temperature(program, temperature)?;
        self.snapshot.target_temperature = Some(temperature);
        Ok(())
    }
}
