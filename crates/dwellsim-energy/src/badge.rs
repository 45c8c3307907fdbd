//! Fixed configuration of the presence badge device.

use std::collections::BTreeMap;

use dwellsim_power_models::power_model::{StateCode, TabularPowerModel};

use crate::validator::{ReferenceData, StateReference};

/// Power draw of each badge state in Watts, characterized from the measured dataset.
pub const BADGE_POWER_TABLE: [(StateCode, f64); 6] = [
    (0, 1.0357),
    (1, 1.0215),
    (2, 1.0284),
    (3, 1.0960),
    (4, 1.1500),
    (5, 1.0925),
];

/// Power draw of states outside the characterized table.
pub const DEFAULT_POWER: f64 = 1.0;

/// Creates the power model of the presence badge.
pub fn badge_power_model() -> TabularPowerModel {
    let mut model = TabularPowerModel::new(DEFAULT_POWER);
    for (state, power) in BADGE_POWER_TABLE {
        model = model.with_state(state, power);
    }
    model
}

/// Returns the display name of a badge state.
pub fn state_name(state: StateCode) -> &'static str {
    match state {
        0 => "At Work (In the Office)",
        1 => "Not at Work",
        2 => "At Work (Not in the office)",
        3 => "At Work (In the Office) Bluetooth",
        4 => "At Work (Not in the office) Bluetooth",
        5 => "Not at Work Bluetooth",
        _ => "Undefined",
    }
}

/// Creates the reference measurements of the badge dataset.
pub fn badge_reference() -> ReferenceData {
    let state_table = [
        (0, 3840.36, 3708.),
        (1, 268.66, 263.),
        (2, 131.64, 128.),
        (3, 10.96, 10.),
        (4, 6.90, 6.),
        (5, 4.37, 4.),
    ];
    let mut states = BTreeMap::new();
    for (state, energy, duration) in state_table {
        states.insert(
            state,
            StateReference {
                name: state_name(state).to_string(),
                energy,
                duration,
            },
        );
    }
    ReferenceData {
        total_energy: 4262.89,
        duration: 4119.,
        transitions: 10,
        tolerance_percent: 1.,
        states,
    }
}
