//! Per-state energy and dwell time statistics.

use std::collections::BTreeMap;

use dwellsim_power_models::power_model::StateCode;

/// Accumulated energy and dwell time of a single state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEntry {
    /// Energy consumed while dwelling in this state, in Joules.
    pub energy: f64,
    /// Total time spent in this state, in seconds.
    pub duration: f64,
}

/// Per-state statistics, updated only when a dwell interval is closed.
#[derive(Debug, Clone, Default)]
pub struct StateStats {
    entries: BTreeMap<StateCode, StateEntry>,
}

impl StateStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a closed dwell interval into the state's entry.
    pub(crate) fn add_dwell(&mut self, state: StateCode, energy: f64, duration: f64) {
        let entry = self.entries.entry(state).or_default();
        entry.energy += energy;
        entry.duration += duration;
    }

    /// Returns the accumulated energy of the specified state in Joules.
    pub fn energy_for(&self, state: StateCode) -> f64 {
        self.entries.get(&state).map_or(0., |e| e.energy)
    }

    /// Returns the accumulated dwell time of the specified state in seconds.
    pub fn duration_for(&self, state: StateCode) -> f64 {
        self.entries.get(&state).map_or(0., |e| e.duration)
    }

    /// Returns codes of all states with recorded dwell time in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateCode> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the sum of per-state energies.
    pub fn total_energy(&self) -> f64 {
        self.entries.values().map(|e| e.energy).sum()
    }

    /// Returns the sum of per-state dwell times.
    pub fn total_duration(&self) -> f64 {
        self.entries.values().map(|e| e.duration).sum()
    }
}
