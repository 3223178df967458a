//! In-memory vendor client used by the tests.
//!
//! Each fake keeps its state behind an `Arc<Mutex<_>>` so a test can hold a
//! handle, change readings between polls, and inspect recorded writes after
//! the circuit has been moved into a climate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::VicareError;
use crate::vendor::{Appliance, Circuit, HeatingUnit};

/// Scripted outcome of one vendor read.
#[derive(Debug, Clone)]
pub enum Read<T> {
    Value(T),
    Unsupported,
    Connection,
    RateLimit,
    Decode,
    InvalidData,
}

impl<T: Clone> Read<T> {
    fn get(&self, feature: &str) -> Result<T, VicareError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Unsupported => Err(VicareError::not_supported(feature)),
            Self::Connection => Err(VicareError::Connection(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))),
            Self::RateLimit => Err(VicareError::RateLimit("limit reached".to_string())),
            Self::Decode => Err(VicareError::Decode("expected value at line 1".to_string())),
            Self::InvalidData => Err(VicareError::InvalidData("missing value".to_string())),
        }
    }
}

/// A write issued against a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetMode(String),
    SetProgramTemperature(String, f64),
    DeactivateProgram(String),
    ActivateProgram(String),
}

#[derive(Debug)]
pub struct CircuitState {
    pub room_temperature: Read<f64>,
    pub supply_temperature: Read<f64>,
    pub active_program: Read<String>,
    pub desired_temperature: Read<f64>,
    pub active_mode: Read<String>,
    pub heating_curve_slope: Read<f64>,
    pub heating_curve_shift: Read<i64>,
    pub target_supply_temperature: Read<f64>,
    pub modes: Read<Vec<String>>,
    /// Once this many writes are recorded, further writes fail with a
    /// connection error.
    pub fail_writes_after: Option<usize>,
    /// Time the room temperature read blocks for, like a slow network.
    pub read_delay: Duration,
    pub calls: Vec<Call>,
}

impl Default for CircuitState {
    fn default() -> Self {
        Self {
            room_temperature: Read::Value(21.0),
            supply_temperature: Read::Value(45.0),
            active_program: Read::Value("normal".to_string()),
            desired_temperature: Read::Value(20.0),
            active_mode: Read::Value("dhwAndHeating".to_string()),
            heating_curve_slope: Read::Value(1.4),
            heating_curve_shift: Read::Value(0),
            target_supply_temperature: Read::Value(42.0),
            modes: Read::Value(vec![
                "dhw".to_string(),
                "dhwAndHeating".to_string(),
                "forcedNormal".to_string(),
                "forcedReduced".to_string(),
                "standby".to_string(),
            ]),
            fail_writes_after: None,
            read_delay: Duration::ZERO,
            calls: Vec::new(),
        }
    }
}

pub type Handle<S> = Arc<Mutex<S>>;

pub fn lock<S>(handle: &Handle<S>) -> MutexGuard<'_, S> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct FakeCircuit {
    id: String,
    state: Handle<CircuitState>,
}

impl FakeCircuit {
    pub fn new(id: &str) -> (Self, Handle<CircuitState>) {
        let state = Arc::new(Mutex::new(CircuitState::default()));
        let circuit = Self {
            id: id.to_string(),
            state: Arc::clone(&state),
        };
        (circuit, state)
    }

    fn record(&self, call: Call) -> Result<(), VicareError> {
        let mut state = lock(&self.state);
        if state
            .fail_writes_after
            .is_some_and(|limit| state.calls.len() >= limit)
        {
            return Read::<()>::Connection.get("write");
        }
        state.calls.push(call);
        Ok(())
    }
}

impl Circuit for FakeCircuit {
    fn id(&self) -> &str {
        &self.id
    }

    fn room_temperature(&self) -> Result<f64, VicareError> {
        let (read, delay) = {
            let state = lock(&self.state);
            (state.room_temperature.clone(), state.read_delay)
        };
        std::thread::sleep(delay);
        read.get("sensors.temperature.room")
    }

    fn supply_temperature(&self) -> Result<f64, VicareError> {
        lock(&self.state).supply_temperature.get("sensors.temperature.supply")
    }

    fn active_program(&self) -> Result<String, VicareError> {
        lock(&self.state).active_program.get("operating.programs.active")
    }

    fn current_desired_temperature(&self) -> Result<f64, VicareError> {
        lock(&self.state).desired_temperature.get("temperature.desired")
    }

    fn active_mode(&self) -> Result<String, VicareError> {
        lock(&self.state).active_mode.get("operating.modes.active")
    }

    fn heating_curve_slope(&self) -> Result<f64, VicareError> {
        lock(&self.state).heating_curve_slope.get("heating.curve.slope")
    }

    fn heating_curve_shift(&self) -> Result<i64, VicareError> {
        lock(&self.state).heating_curve_shift.get("heating.curve.shift")
    }

    fn target_supply_temperature(&self) -> Result<f64, VicareError> {
        lock(&self.state)
            .target_supply_temperature
            .get("temperature.supply.target")
    }

    fn modes(&self) -> Result<Vec<String>, VicareError> {
        lock(&self.state).modes.get("operating.modes")
    }

    fn set_mode(&self, mode: &str) -> Result<(), VicareError> {
        self.record(Call::SetMode(mode.to_string()))
    }

    fn set_program_temperature(&self, program: &str, temperature: f64) -> Result<(), VicareError> {
        self.record(Call::SetProgramTemperature(program.to_string(), temperature))
    }

    fn deactivate_program(&self, program: &str) -> Result<(), VicareError> {
        self.record(Call::DeactivateProgram(program.to_string()))
    }

    fn activate_program(&self, program: &str) -> Result<(), VicareError> {
        self.record(Call::ActivateProgram(program.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct FakeUnit(pub Read<bool>);

impl HeatingUnit for FakeUnit {
    fn is_active(&self) -> Result<bool, VicareError> {
        self.0.get("active")
    }
}

#[derive(Debug)]
pub struct ApplianceState {
    pub burners: Read<Vec<FakeUnit>>,
    pub compressors: Read<Vec<FakeUnit>>,
}

impl Default for ApplianceState {
    fn default() -> Self {
        Self {
            burners: Read::Value(vec![FakeUnit(Read::Value(false))]),
            compressors: Read::Unsupported,
        }
    }
}

pub struct FakeAppliance {
    state: Handle<ApplianceState>,
}

impl FakeAppliance {
    pub fn new() -> (Self, Handle<ApplianceState>) {
        let state = Arc::new(Mutex::new(ApplianceState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Appliance for FakeAppliance {
    type Unit = FakeUnit;

    fn burners(&self) -> Result<Vec<FakeUnit>, VicareError> {
        lock(&self.state).burners.get("heating.burners")
    }

    fn compressors(&self) -> Result<Vec<FakeUnit>, VicareError> {
        lock(&self.state).compressors.get("heating.compressors")
    }
}
