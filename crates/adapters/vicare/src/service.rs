//! Service calls accepted by ViCare climate entities.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use heathub_app::ports::Climate;
use heathub_domain::climate::{HvacMode, Preset};

use crate::climate::ViCareClimate;
use crate::error::ClimateError;
use crate::vendor::{Appliance, Circuit};

#[derive(Debug, Deserialize)]
struct HvacModeData {
    hvac_mode: HvacMode,
}

#[derive(Debug, Deserialize)]
struct PresetModeData {
    preset_mode: Preset,
}

#[derive(Debug, Deserialize)]
struct TemperatureData {
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VicareModeData {
    vicare_mode: String,
}

/// A parsed service call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetHvacMode(HvacMode),
    SetPresetMode(Preset),
    SetTemperature(Option<f64>),
    SetVicareMode(String),
    /// Re-poll the circuit immediately.
    Update,
}

impl Command {
    /// Parse `service` and its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::UnknownService`] for a service this
    /// integration does not handle, or [`ClimateError::InvalidServiceData`]
    /// when the payload does not match the service.
    pub fn parse(service: &str, data: serde_json::Value) -> Result<Self, ClimateError> {
        let command = match service {
            "set_hvac_mode" => Self::SetHvacMode(payload::<HvacModeData>(data)?.hvac_mode),
            "set_preset_mode" => Self::SetPresetMode(payload::<PresetModeData>(data)?.preset_mode),
            "set_temperature" => Self::SetTemperature(payload::<TemperatureData>(data)?.temperature),
            "set_vicare_mode" => Self::SetVicareMode(payload::<VicareModeData>(data)?.vicare_mode),
            "update" => Self::Update,
            other => return Err(ClimateError::UnknownService(other.to_string())),
        };
        Ok(command)
    }

    /// Run the command against `climate`. Blocks on the vendor client.
    ///
    /// # Errors
    ///
    /// Propagates the setter's [`ClimateError`].
    pub fn apply<C: Circuit, A: Appliance>(
        self,
        climate: &mut ViCareClimate<C, A>,
    ) -> Result<(), ClimateError> {
        match self {
            Self::SetHvacMode(mode) => climate.set_hvac_mode(mode),
            Self::SetPresetMode(preset) => climate.set_preset_mode(preset),
            Self::SetTemperature(temperature) => climate.set_temperature(temperature),
            Self::SetVicareMode(mode) => climate.set_vicare_mode(&mode),
            Self::Update => {
                climate.update();
                Ok(())
            }
        }
    }
}

fn payload<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ClimateError> {
    serde_json::from_value(data).map_err(ClimateError::InvalidServiceData)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_parse_hvac_mode_call() {
        let command = Command::parse("set_hvac_mode", json!({"hvac_mode": "heat"})).unwrap();
        assert_eq!(command, Command::SetHvacMode(HvacMode::Heat));
    }

    #[test]
    fn should_parse_modes_outside_adapter_table() {
        // Rejected later by the climate, not by the parser.
        let command = Command::parse("set_hvac_mode", json!({"hvac_mode": "fan_only"})).unwrap();
        assert_eq!(command, Command::SetHvacMode(HvacMode::FanOnly));
    }

    #[test]
    fn should_parse_preset_call() {
        let command = Command::parse("set_preset_mode", json!({"preset_mode": "eco"})).unwrap();
        assert_eq!(command, Command::SetPresetMode(Preset::Eco));
    }

    #[test]
    fn should_treat_missing_temperature_as_none() {
        let command = Command::parse("set_temperature", json!({})).unwrap();
        assert_eq!(command, Command::SetTemperature(None));

        let command = Command::parse("set_temperature", json!({"temperature": 22.5})).unwrap();
        assert_eq!(command, Command::SetTemperature(Some(22.5)));
    }

    #[test]
    fn should_pass_raw_vicare_mode_through() {
        let command =
            Command::parse("set_vicare_mode", json!({"vicare_mode": "dhwAndHeating"})).unwrap();
        assert_eq!(command, Command::SetVicareMode("dhwAndHeating".to_string()));
    }

    #[test]
    fn should_ignore_payload_of_update() {
        let command = Command::parse("update", json!(null)).unwrap();
        assert_eq!(command, Command::Update);
    }

    #[test]
    fn should_reject_unknown_service() {
        let err = Command::parse("turn_on", json!({})).unwrap_err();
        assert!(matches!(err, ClimateError::UnknownService(ref s) if s == "turn_on"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn should_reject_malformed_payload() {
        for (service, data) in [
            ("set_hvac_mode", json!({"hvac_mode": "warm"})),
            ("set_preset_mode", json!({})),
            ("set_temperature", json!({"temperature": "hot"})),
            ("set_vicare_mode", json!({"vicare_mode": 3})),
        ] {
            let err = Command::parse(service, data).unwrap_err();
            assert!(
                matches!(err, ClimateError::InvalidServiceData(_)),
                "{service}"
            );
        }
    }
}
