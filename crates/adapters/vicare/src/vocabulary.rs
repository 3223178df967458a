//! ViCare modes and programs, and the fixed tables that translate them to
//! the host climate vocabulary.
//!
//! Each direction is its own table. They are not inverses of each other:
//! several vendor modes collapse onto `off`, and writing `auto` sends
//! `dhwAndHeating` whatever vendor mode last produced `auto`.

use std::fmt;
use std::str::FromStr;

use heathub_domain::climate::{HvacMode, Preset};

/// Operating mode of a heating circuit as the firmware names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VicareMode {
    /// Domestic hot water only.
    Dhw,
    Heating,
    DhwAndHeating,
    DhwAndHeatingCooling,
    ForcedReduced,
    ForcedNormal,
    Standby,
}

impl VicareMode {
    pub const ALL: &'static [Self] = &[
        Self::Dhw,
        Self::Heating,
        Self::DhwAndHeating,
        Self::DhwAndHeatingCooling,
        Self::ForcedReduced,
        Self::ForcedNormal,
        Self::Standby,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dhw => "dhw",
            Self::Heating => "heating",
            Self::DhwAndHeating => "dhwAndHeating",
            Self::DhwAndHeatingCooling => "dhwAndHeatingCooling",
            Self::ForcedReduced => "forcedReduced",
            Self::ForcedNormal => "forcedNormal",
            Self::Standby => "standby",
        }
    }
}

impl fmt::Display for VicareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VicareMode {
    type Err = UnknownVicareTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownVicareTerm(s.to_string()))
    }
}

/// Heating program (schedule slot) of a circuit as the firmware names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VicareProgram {
    Active,
    Comfort,
    Eco,
    External,
    Holiday,
    Normal,
    Reduced,
    Standby,
}

impl VicareProgram {
    pub const ALL: &'static [Self] = &[
        Self::Active,
        Self::Comfort,
        Self::Eco,
        Self::External,
        Self::Holiday,
        Self::Normal,
        Self::Reduced,
        Self::Standby,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Comfort => "comfort",
            Self::Eco => "eco",
            Self::External => "external",
            Self::Holiday => "holiday",
            Self::Normal => "normal",
            Self::Reduced => "reduced",
            Self::Standby => "standby",
        }
    }
}

impl fmt::Display for VicareProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VicareProgram {
    type Err = UnknownVicareTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|program| program.as_str() == s)
            .ok_or_else(|| UnknownVicareTerm(s.to_string()))
    }
}

/// A vendor string that is not part of the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vicare term {0:?}")]
pub struct UnknownVicareTerm(pub String);

const VICARE_TO_HVAC: &[(VicareMode, HvacMode)] = &[
    (VicareMode::Dhw, HvacMode::Off),
    (VicareMode::Heating, HvacMode::Heat),
    (VicareMode::DhwAndHeating, HvacMode::Auto),
    (VicareMode::DhwAndHeatingCooling, HvacMode::Auto),
    (VicareMode::ForcedReduced, HvacMode::Off),
    (VicareMode::ForcedNormal, HvacMode::Heat),
    (VicareMode::Standby, HvacMode::Off),
];

const HVAC_TO_VICARE: &[(HvacMode, VicareMode)] = &[
    (HvacMode::Heat, VicareMode::ForcedNormal),
    (HvacMode::Off, VicareMode::ForcedReduced),
    (HvacMode::Auto, VicareMode::DhwAndHeating),
];

const PROGRAM_TO_PRESET: &[(VicareProgram, Preset)] = &[
    (VicareProgram::Comfort, Preset::Comfort),
    (VicareProgram::Eco, Preset::Eco),
];

const PRESET_TO_PROGRAM: &[(Preset, VicareProgram)] = &[
    (Preset::Comfort, VicareProgram::Comfort),
    (Preset::Eco, VicareProgram::Eco),
];

fn lookup<K: PartialEq + Copy, V: Copy>(table: &[(K, V)], key: K) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Host mode shown for a vendor mode string; `None` for unknown strings.
#[must_use]
pub fn hvac_mode_for(vicare_mode: &str) -> Option<HvacMode> {
    let mode = vicare_mode.parse().ok()?;
    lookup(VICARE_TO_HVAC, mode)
}

/// Vendor mode written for a host mode; `None` when the mode is not offered.
#[must_use]
pub fn vicare_mode_for(mode: HvacMode) -> Option<VicareMode> {
    lookup(HVAC_TO_VICARE, mode)
}

/// Every host mode the adapter accepts, in table order.
#[must_use]
pub fn hvac_modes() -> Vec<HvacMode> {
    HVAC_TO_VICARE.iter().map(|(mode, _)| *mode).collect()
}

/// Host preset shown for a vendor program string; `None` for programs with
/// no preset.
#[must_use]
pub fn preset_for(program: &str) -> Option<Preset> {
    let program = program.parse().ok()?;
    lookup(PROGRAM_TO_PRESET, program)
}

/// Vendor program activated for a host preset.
#[must_use]
pub fn program_for(preset: Preset) -> Option<VicareProgram> {
    lookup(PRESET_TO_PROGRAM, preset)
}

/// Every host preset the adapter accepts, in table order.
#[must_use]
pub fn presets() -> Vec<Preset> {
    PROGRAM_TO_PRESET.iter().map(|(_, preset)| *preset).collect()
}
