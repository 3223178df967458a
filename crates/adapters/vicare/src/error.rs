//! ViCare adapter error types.

use heathub_domain::error::HubError;

/// Errors signalled by the vendor client for a single read or write.
#[derive(Debug, thiserror::Error)]
pub enum VicareError {
    /// The device does not expose this feature. Expected; never logged.
    #[error("feature {feature} not supported by this device")]
    NotSupported {
        /// Vendor feature name (e.g. `"heating.circuits.0.sensors.temperature.room"`).
        feature: String,
    },

    /// The vendor server could not be reached.
    #[error("unable to retrieve data from ViCare server")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The vendor API rate limit was exceeded.
    #[error("ViCare API rate limit exceeded: {0}")]
    RateLimit(String),

    /// A response could not be decoded.
    #[error("unable to decode data from ViCare server: {0}")]
    Decode(String),

    /// A response was decoded but its content is not usable.
    #[error("invalid data from ViCare server: {0}")]
    InvalidData(String),
}

impl VicareError {
    /// Shorthand for [`VicareError::NotSupported`].
    #[must_use]
    pub fn not_supported(feature: impl Into<String>) -> Self {
        Self::NotSupported {
            feature: feature.into(),
        }
    }

    /// Whether this is the per-field "feature not supported" signal.
    #[must_use]
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

/// Errors raised by the climate setters and service-call routing.
#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    /// The hvac mode has no ViCare counterpart.
    #[error("cannot set invalid hvac mode {0:?}")]
    InvalidHvacMode(String),

    /// The preset has no ViCare program counterpart.
    #[error("cannot set invalid preset {0:?}")]
    InvalidPreset(String),

    /// The raw ViCare mode is not one the circuit reported as supported.
    #[error("cannot set invalid vicare mode {0:?}")]
    InvalidVicareMode(String),

    /// A program-relative write was attempted before any program was polled.
    /// Not a caller bug: the circuit simply has not been read yet.
    #[error("no active vicare program known")]
    NoActiveProgram,

    /// The service name is not handled by this integration.
    #[error("unknown service {0:?}")]
    UnknownService(String),

    /// The service-call payload does not match the service.
    #[error("invalid service data")]
    InvalidServiceData(#[source] serde_json::Error),

    /// The vendor client rejected a write.
    #[error("vendor call failed")]
    Vendor(#[from] VicareError),

    /// A domain-level error (validation, not-found, etc.).
    #[error("domain error")]
    Domain(#[source] HubError),
}

impl ClimateError {
    /// Whether the error is a caller bug (bad argument) rather than a device failure.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidHvacMode(_)
                | Self::InvalidPreset(_)
                | Self::InvalidVicareMode(_)
                | Self::UnknownService(_)
                | Self::InvalidServiceData(_)
        )
    }

    /// Convert into a [`HubError::Integration`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> HubError {
        match self {
            Self::Domain(err) => err,
            other => HubError::Integration(Box::new(other)),
        }
    }
}

impl From<ClimateError> for HubError {
    fn from(err: ClimateError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_rate_limit_with_message() {
        let err = VicareError::RateLimit("limit reset in 60s".to_string());
        assert_eq!(
            err.to_string(),
            "ViCare API rate limit exceeded: limit reset in 60s"
        );
    }

    #[test]
    fn should_flag_not_supported_only() {
        assert!(VicareError::not_supported("heating.burners").is_not_supported());
        assert!(!VicareError::Decode("eof".to_string()).is_not_supported());
    }

    #[test]
    fn should_classify_invalid_arguments() {
        assert!(ClimateError::InvalidHvacMode("cool".to_string()).is_invalid_argument());
        assert!(ClimateError::InvalidVicareMode("bogus".to_string()).is_invalid_argument());
        assert!(!ClimateError::Vendor(VicareError::InvalidData("x".to_string())).is_invalid_argument());
    }

    #[test]
    fn should_not_blame_caller_for_missing_program() {
        assert!(!ClimateError::NoActiveProgram.is_invalid_argument());
    }

    #[test]
    fn should_convert_vendor_error_to_integration_error() {
        let err: HubError = ClimateError::Vendor(VicareError::Decode("eof".to_string())).into();
        assert!(matches!(err, HubError::Integration(_)));
    }

    #[test]
    fn should_convert_domain_error_back_to_domain() {
        let domain_err = HubError::Validation(heathub_domain::error::ValidationError::EmptyName);
        let back: HubError = ClimateError::Domain(domain_err).into();
        assert!(matches!(back, HubError::Validation(_)));
    }
}
