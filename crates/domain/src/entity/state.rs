//! Entity state: the current operational state of an entity.

use serde::{Deserialize, Serialize};

use crate::climate::HvacMode;

/// Discrete operational state of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
    Unavailable,
}

impl EntityState {
    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// A climate entity is on whenever its hvac mode is anything but `off`.
impl From<Option<HvacMode>> for EntityState {
    fn from(mode: Option<HvacMode>) -> Self {
        match mode {
            None => Self::Unknown,
            Some(HvacMode::Off) => Self::Off,
            Some(_) => Self::On,
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}
