//! Dwell-energy accounting engine.
//!
//! Consumes an ordered stream of timestamped state-change events, converts
//! each closed dwell interval into energy (power × duration), maintains
//! running totals and per-state breakdowns, and validates the final result
//! against reference measurements.

pub mod accumulator;
pub mod badge;
pub mod report;
pub mod stats;
pub mod validator;
