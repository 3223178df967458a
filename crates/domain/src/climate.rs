//! Climate vocabulary: the host-facing terms a climate entity speaks.
//!
//! Integrations translate their vendor vocabulary into these types. Each
//! enum parses from and displays as the wire string the host uses (`heat`,
//! `fan_only`, `comfort`, `°C`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whole-degree temperature precision.
pub const PRECISION_WHOLE: f64 = 1.0;
/// Tenth-degree temperature precision.
pub const PRECISION_TENTHS: f64 = 0.1;

/// A string could not be parsed into one of the climate enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct ParseClimateError {
    /// Which vocabulary was being parsed (e.g. `"hvac mode"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[doc = $doc:expr])*
        $name:ident, $kind:literal {
            $($(#[doc = $vdoc:expr])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[doc = $vdoc])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire string used by the host.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseClimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ParseClimateError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum!(
    /// Operating mode of a climate entity.
    HvacMode, "hvac mode" {
        Off => "off",
        Heat => "heat",
        Cool => "cool",
        HeatCool => "heat_cool",
        /// The device follows its own schedule.
        Auto => "auto",
        Dry => "dry",
        FanOnly => "fan_only",
    }
);

wire_enum!(
    /// What the climate device is currently doing.
    HvacAction, "hvac action" {
        Off => "off",
        Heating => "heating",
        Cooling => "cooling",
        Drying => "drying",
        Idle => "idle",
        Fan => "fan",
    }
);

wire_enum!(
    /// Named preset of a climate entity.
    Preset, "preset" {
        Eco => "eco",
        Away => "away",
        Boost => "boost",
        Comfort => "comfort",
        Home => "home",
        Sleep => "sleep",
        Activity => "activity",
    }
);

wire_enum!(
    /// Temperature unit reported by a climate entity.
    TemperatureUnit, "temperature unit" {
        Celsius => "°C",
        Fahrenheit => "°F",
    }
);

wire_enum!(
    /// Optional capabilities a climate entity advertises.
    ClimateFeature, "climate feature" {
        TargetTemperature => "target_temperature",
        TargetTemperatureRange => "target_temperature_range",
        PresetMode => "preset_mode",
        FanMode => "fan_mode",
    }
);
