//! Power consumption models for devices with discrete operating states.

pub mod power_model;
