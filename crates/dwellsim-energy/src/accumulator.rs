//! Dwell accumulator, which converts state dwell intervals into energy.

use std::fmt::Display;

use log::{debug, warn};

use dwellsim_power_models::power_model::{StateCode, StatePowerModel};

use crate::stats::StateStats;

/// An error type returned when an event or finalize timestamp precedes the
/// start of the currently open dwell interval.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidTimestampOrder {
    /// Start time of the open interval.
    pub interval_start: f64,
    /// The offending timestamp.
    pub time: f64,
}

impl Display for InvalidTimestampOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "timestamp {} precedes the open interval start {}",
            self.time, self.interval_start
        )
    }
}

/// The currently open dwell interval.
#[derive(Debug, Clone, Copy)]
struct OpenInterval {
    state: StateCode,
    start_time: f64,
}

/// Dwell accumulator structure.
///
/// Tracks the currently open dwell interval and converts closed intervals
/// into energy. Energy is attributed to the state that was active during the
/// interval, so closing always uses the previous state's power over the
/// closing interval's duration, while the instantaneous power gauge follows
/// the state just entered.
#[derive(Clone)]
pub struct DwellAccumulator {
    power_model: Box<dyn StatePowerModel>,
    open: Option<OpenInterval>,
    total_energy: f64,
    current_power: f64,
    transition_count: u64,
    first_event_time: Option<f64>,
    finalized: bool,
    stats: StateStats,
}

impl DwellAccumulator {
    /// Creates component with the given power model.
    pub fn new(power_model: Box<dyn StatePowerModel>) -> Self {
        Self {
            power_model,
            open: None,
            total_energy: 0.,
            current_power: 0.,
            transition_count: 0,
            first_event_time: None,
            finalized: false,
            stats: StateStats::new(),
        }
    }

    /// Processes a state-change event.
    ///
    /// Closes the currently open interval (if any) and opens a new interval
    /// for the entered state. The very first event only opens an interval.
    /// An event timestamp preceding the open interval's start is rejected
    /// without mutating any totals.
    pub fn on_event(&mut self, time: f64, state: StateCode) -> Result<(), InvalidTimestampOrder> {
        if let Some(open) = self.open {
            self.close_interval(open, time)?;
            self.transition_count += 1;
        } else if self.first_event_time.is_none() {
            self.first_event_time = Some(time);
        }
        self.current_power = self.power_model.get_power(state);
        self.open = Some(OpenInterval { state, start_time: time });
        Ok(())
    }

    /// Closes the last open dwell interval at the given end time.
    ///
    /// Performs the same energy and duration accounting as an interval close
    /// on event, but does not count a transition: a forced end-of-observation
    /// close is not a state change. Repeated calls are no-ops.
    pub fn finalize(&mut self, end_time: f64) -> Result<(), InvalidTimestampOrder> {
        if let Some(open) = self.open {
            self.close_interval(open, end_time)?;
            self.open = None;
        }
        self.finalized = true;
        Ok(())
    }

    fn close_interval(&mut self, open: OpenInterval, end_time: f64) -> Result<(), InvalidTimestampOrder> {
        let duration = end_time - open.start_time;
        if duration < 0. {
            warn!(
                "rejected timestamp {} preceding the interval opened at {}",
                end_time, open.start_time
            );
            return Err(InvalidTimestampOrder {
                interval_start: open.start_time,
                time: end_time,
            });
        }
        let energy = self.power_model.get_power(open.state) * duration;
        self.total_energy += energy;
        self.stats.add_dwell(open.state, energy, duration);
        debug!(
            "state {} dwelled for {:.6} s consuming {:.6} J",
            open.state, duration, energy
        );
        Ok(())
    }

    /// Returns the total energy consumption in Joules over all closed intervals.
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Returns the power consumption of the currently open interval's state in Watts.
    pub fn current_power(&self) -> f64 {
        self.current_power
    }

    /// Returns the number of dwell intervals closed by state-change events.
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// Returns the per-state statistics view.
    pub fn stats(&self) -> &StateStats {
        &self.stats
    }

    /// Returns the timestamp of the first processed event, if any.
    pub fn first_event_time(&self) -> Option<f64> {
        self.first_event_time
    }

    /// Returns whether the accumulator has been finalized.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}
