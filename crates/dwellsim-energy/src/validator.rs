//! Validation of computed totals against reference measurements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dwellsim_power_models::power_model::StateCode;

use crate::accumulator::DwellAccumulator;

/// Holds raw reference data parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawReferenceData {
    pub total_energy: f64,
    pub duration: f64,
    pub transitions: u64,
    pub tolerance_percent: Option<f64>,
    pub states: Option<Vec<RawStateReference>>,
}

/// Holds raw reference values of a single state parsed from YAML file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
struct RawStateReference {
    pub state: StateCode,
    pub name: Option<String>,
    pub energy: f64,
    pub duration: f64,
}

/// Reference measurements of a single state.
#[derive(Debug, PartialEq, Clone)]
pub struct StateReference {
    /// Display name of the state.
    pub name: String,
    /// Measured energy in Joules.
    pub energy: f64,
    /// Measured dwell time in seconds.
    pub duration: f64,
}

/// Ground-truth measurements used to validate the model output.
#[derive(Debug, PartialEq, Clone)]
pub struct ReferenceData {
    /// Measured total energy in Joules.
    pub total_energy: f64,
    /// Measured observation duration in seconds.
    pub duration: f64,
    /// Measured number of state transitions.
    pub transitions: u64,
    /// Tolerance on the error percentage for the pass/fail verdict.
    pub tolerance_percent: f64,
    /// Per-state reference measurements.
    pub states: BTreeMap<StateCode, StateReference>,
}

impl ReferenceData {
    /// Creates reference data by reading values from YAML file
    /// (uses default values if some parameters are absent).
    pub fn from_file(file_name: &str) -> Self {
        let raw: RawReferenceData = serde_yaml::from_str(
            &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
        )
        .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name));

        let mut states = BTreeMap::new();
        for entry in raw.states.unwrap_or_default() {
            states.insert(
                entry.state,
                StateReference {
                    name: entry.name.unwrap_or_else(|| format!("State {}", entry.state)),
                    energy: entry.energy,
                    duration: entry.duration,
                },
            );
        }
        Self {
            total_energy: raw.total_energy,
            duration: raw.duration,
            transitions: raw.transitions,
            tolerance_percent: raw.tolerance_percent.unwrap_or(1.),
            states,
        }
    }

    /// Returns the display name of the specified state.
    pub fn state_name(&self, state: StateCode) -> &str {
        self.states.get(&state).map_or("Undefined", |s| s.name.as_str())
    }
}

/// Outcome of comparing a computed metric against its reference value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Measured reference value.
    pub reference: f64,
    /// Value computed by the model.
    pub computed: f64,
    /// Signed error (computed minus reference).
    pub error: f64,
    /// Signed error as a percentage of the reference value
    /// (0 when the reference is 0).
    pub error_percent: f64,
    /// Whether the error magnitude is within tolerance.
    pub pass: bool,
}

/// Validation outcome for all metrics of a run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Total energy comparison.
    pub total_energy: ValidationResult,
    /// Average power comparison (energy over the reference duration).
    pub avg_power: ValidationResult,
    /// Accumulated duration comparison.
    pub duration: ValidationResult,
    /// Transition count comparison.
    pub transitions: ValidationResult,
    /// Per-state energy comparisons.
    pub state_energy: BTreeMap<StateCode, ValidationResult>,
    /// Per-state duration comparisons.
    pub state_duration: BTreeMap<StateCode, ValidationResult>,
}

impl ValidationReport {
    /// Returns the overall verdict, determined by the total energy check.
    pub fn passed(&self) -> bool {
        self.total_energy.pass
    }

    /// Returns the sum of absolute per-state energy errors in Joules.
    pub fn state_energy_error_sum(&self) -> f64 {
        self.state_energy.values().map(|r| r.error.abs()).sum()
    }
}

/// Compares model output against reference measurements.
pub struct Validator {
    reference: ReferenceData,
}

impl Validator {
    /// Creates component with the given reference data.
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Compares a computed value against a reference value.
    ///
    /// The error percentage is reported as 0 when the reference is 0, and the
    /// verdict then requires the absolute error to be 0 within epsilon.
    pub fn compare(computed: f64, reference: f64, tolerance_percent: f64) -> ValidationResult {
        let error = computed - reference;
        let (error_percent, pass) = if reference == 0. {
            (0., error.abs() < f64::EPSILON)
        } else {
            let error_percent = 100. * error / reference;
            (error_percent, error_percent.abs() < tolerance_percent)
        };
        ValidationResult {
            reference,
            computed,
            error,
            error_percent,
            pass,
        }
    }

    /// Validates the finalized accumulator state against the reference data.
    pub fn validate(&self, accumulator: &DwellAccumulator) -> ValidationReport {
        let tolerance = self.reference.tolerance_percent;
        let stats = accumulator.stats();

        let total_energy = Self::compare(accumulator.total_energy(), self.reference.total_energy, tolerance);
        let avg_power = Self::compare(
            accumulator.total_energy() / self.reference.duration,
            self.reference.total_energy / self.reference.duration,
            tolerance,
        );
        let duration = Self::compare(stats.total_duration(), self.reference.duration, tolerance);
        let transitions = Self::compare(
            accumulator.transition_count() as f64,
            self.reference.transitions as f64,
            tolerance,
        );

        // all reference states plus any states observed outside the reference table
        let mut state_codes: Vec<StateCode> = self.reference.states.keys().copied().collect();
        for state in stats.states() {
            if !self.reference.states.contains_key(&state) {
                state_codes.push(state);
            }
        }
        state_codes.sort_unstable();

        let mut state_energy = BTreeMap::new();
        let mut state_duration = BTreeMap::new();
        for state in state_codes {
            let (ref_energy, ref_duration) = self
                .reference
                .states
                .get(&state)
                .map_or((0., 0.), |s| (s.energy, s.duration));
            state_energy.insert(state, Self::compare(stats.energy_for(state), ref_energy, tolerance));
            state_duration.insert(state, Self::compare(stats.duration_for(state), ref_duration, tolerance));
        }

        ValidationReport {
            total_energy,
            avg_power,
            duration,
            transitions,
            state_energy,
            state_duration,
        }
    }

    /// Returns the reference data.
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }
}
