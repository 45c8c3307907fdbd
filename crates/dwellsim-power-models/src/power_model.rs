//! Power consumption models.

use std::collections::BTreeMap;

use dyn_clone::{clone_trait_object, DynClone};

/// Identifier of a discrete device operating state.
pub type StateCode = i32;

/// Model for computing power consumption of a device in some operating state.
pub trait StatePowerModel: DynClone {
    /// Computes the power consumption in the given state.
    ///
    /// * `state` - device operating state code.
    fn get_power(&self, state: StateCode) -> f64;
}

clone_trait_object!(StatePowerModel);

/// A power model with constant power consumption value.
#[derive(Clone)]
pub struct ConstantPowerModel {
    power: f64,
}

impl ConstantPowerModel {
    /// Creates constant power model with specified parameters.
    ///
    /// * `power` - Power consumption value.
    pub fn new(power: f64) -> Self {
        Self { power }
    }
}

impl StatePowerModel for ConstantPowerModel {
    fn get_power(&self, _state: StateCode) -> f64 {
        self.power
    }
}

/// A power model backed by a fixed table of per-state power values.
///
/// State codes missing from the table (including negative sentinel codes used
/// to mean "no prior state") resolve to the default power value.
#[derive(Clone)]
pub struct TabularPowerModel {
    table: BTreeMap<StateCode, f64>,
    default_power: f64,
}

impl TabularPowerModel {
    /// Creates tabular power model with specified parameters.
    ///
    /// * `default_power` - Power consumption in states missing from the table.
    pub fn new(default_power: f64) -> Self {
        Self {
            table: BTreeMap::new(),
            default_power,
        }
    }

    /// Sets the power consumption of a state.
    pub fn with_state(mut self, state: StateCode, power: f64) -> Self {
        self.table.insert(state, power);
        self
    }

    /// Returns codes of all states defined in the table in ascending order.
    pub fn states(&self) -> impl Iterator<Item = StateCode> + '_ {
        self.table.keys().copied()
    }

    /// Returns the power consumption of states missing from the table.
    pub fn default_power(&self) -> f64 {
        self.default_power
    }
}

impl StatePowerModel for TabularPowerModel {
    fn get_power(&self, state: StateCode) -> f64 {
        *self.table.get(&state).unwrap_or(&self.default_power)
    }
}
