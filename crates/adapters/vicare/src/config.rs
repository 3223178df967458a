//! ViCare integration configuration.

use serde::Deserialize;

/// Kind of heat generator behind the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatingType {
    #[default]
    Auto,
    Gas,
    Oil,
    Pellets,
    HeatPump,
    FuelCell,
    Hybrid,
}

/// Configuration for the ViCare integration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VicareConfig {
    /// Base display name; climates are named `"{name} Heating"`.
    pub name: String,
    /// Heating system type of the appliance.
    pub heating_type: HeatingType,
    /// Interval between background polls, in seconds.
    pub scan_interval_secs: u16,
}

impl Default for VicareConfig {
    fn default() -> Self {
        Self {
            name: "ViCare".to_string(),
            heating_type: HeatingType::Auto,
            scan_interval_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = VicareConfig::default();
        assert_eq!(config.name, "ViCare");
        assert_eq!(config.heating_type, HeatingType::Auto);
        assert_eq!(config.scan_interval_secs, 60);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            name = "Boiler"
            heating_type = "heatpump"
            scan_interval_secs = 120
        "#;
        let config: VicareConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "Boiler");
        assert_eq!(config.heating_type, HeatingType::HeatPump);
        assert_eq!(config.scan_interval_secs, 120);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: VicareConfig = toml::from_str(r#"heating_type = "gas""#).unwrap();
        assert_eq!(config.heating_type, HeatingType::Gas);
        assert_eq!(config.name, "ViCare");
        assert_eq!(config.scan_interval_secs, 60);
    }

    #[test]
    fn should_reject_unknown_heating_type() {
        let result: Result<VicareConfig, _> = toml::from_str(r#"heating_type = "coal""#);
        assert!(result.is_err());
    }
}
