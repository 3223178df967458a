//! Vendor capability ports: what the adapter needs from a ViCare client.
//!
//! The HTTP/OAuth client lives outside this crate. It implements these
//! traits; every call may block on the network and may fail with any
//! [`VicareError`]. Getters signal [`VicareError::NotSupported`] when the
//! device does not have the feature.

use crate::config::HeatingType;
use crate::error::VicareError;

/// One controllable heating loop of an appliance.
pub trait Circuit {
    /// Circuit identifier, unique within its appliance (e.g. `"0"`).
    fn id(&self) -> &str;

    fn room_temperature(&self) -> Result<f64, VicareError>;

    fn supply_temperature(&self) -> Result<f64, VicareError>;

    /// Name of the active program (e.g. `"normal"`, `"comfort"`).
    fn active_program(&self) -> Result<String, VicareError>;

    fn current_desired_temperature(&self) -> Result<f64, VicareError>;

    /// Name of the active mode (e.g. `"dhwAndHeating"`).
    fn active_mode(&self) -> Result<String, VicareError>;

    fn heating_curve_slope(&self) -> Result<f64, VicareError>;

    fn heating_curve_shift(&self) -> Result<i64, VicareError>;

    fn target_supply_temperature(&self) -> Result<f64, VicareError>;

    /// Every mode name this circuit accepts.
    fn modes(&self) -> Result<Vec<String>, VicareError>;

    fn set_mode(&self, mode: &str) -> Result<(), VicareError>;

    fn set_program_temperature(&self, program: &str, temperature: f64) -> Result<(), VicareError>;

    fn deactivate_program(&self, program: &str) -> Result<(), VicareError>;

    fn activate_program(&self, program: &str) -> Result<(), VicareError>;
}

/// A burner or compressor.
pub trait HeatingUnit {
    /// Whether the unit is currently producing heat.
    fn is_active(&self) -> Result<bool, VicareError>;
}

/// The appliance shared by every circuit.
pub trait Appliance {
    type Unit: HeatingUnit;

    fn burners(&self) -> Result<Vec<Self::Unit>, VicareError>;

    fn compressors(&self) -> Result<Vec<Self::Unit>, VicareError>;
}

/// Immutable identity of an appliance, fixed when the integration is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceConfig {
    pub serial: String,
    pub model: String,
    pub heating_type: HeatingType,
}
