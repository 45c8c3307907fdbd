//! Model-vs-measurement report rendering.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;

use dwellsim_power_models::power_model::StateCode;

use crate::validator::{ReferenceData, ValidationReport, ValidationResult};

/// Renders the validation outcome as a multi-section CSV report.
///
/// Sections are delimited by `=== NAME ===` lines and each carries its own
/// CSV header, matching the layout consumed by the analysis tooling.
/// All numeric fields render with 6 fractional digits.
pub struct ReportGenerator<'a> {
    reference: &'a ReferenceData,
    validation: &'a ValidationReport,
}

impl<'a> ReportGenerator<'a> {
    /// Creates component over the final validation outcome.
    pub fn new(reference: &'a ReferenceData, validation: &'a ValidationReport) -> Self {
        Self { reference, validation }
    }

    /// Writes the report to the given sink.
    pub fn write<W: Write>(&self, sink: W) -> Result<(), std::io::Error> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(sink);

        wtr.write_record(["=== OVERALL METRICS ==="])?;
        wtr.write_record(["Metric", "Measured", "Model", "Error", "Error_Percent"])?;
        self.write_metric(&mut wtr, "Total Energy (J)", &self.validation.total_energy)?;
        self.write_metric(&mut wtr, "Average Power (W)", &self.validation.avg_power)?;
        self.write_metric(&mut wtr, "Duration (s)", &self.validation.duration)?;
        self.write_metric(&mut wtr, "Transitions", &self.validation.transitions)?;

        wtr.write_record(["=== PER-STATE ENERGY (Joules) ==="])?;
        self.write_state_section(&mut wtr, &self.validation.state_energy)?;

        wtr.write_record(["=== PER-STATE DURATION (seconds) ==="])?;
        self.write_state_section(&mut wtr, &self.validation.state_duration)?;

        wtr.write_record(["=== SUMMARY STATISTICS ==="])?;
        wtr.write_record(["Statistic", "Value"])?;
        wtr.write_record([
            "Total Energy Error (J)".to_string(),
            format!("{:.6}", self.validation.total_energy.error),
        ])?;
        wtr.write_record([
            "Total Energy Error (%)".to_string(),
            format!("{:.6}", self.validation.total_energy.error_percent),
        ])?;
        wtr.write_record([
            "Per-State Energy Error Sum (J)".to_string(),
            format!("{:.6}", self.validation.state_energy_error_sum()),
        ])?;
        wtr.write_record([
            "Model Status".to_string(),
            if self.validation.passed() { "PASS" } else { "FAIL" }.to_string(),
        ])?;

        wtr.flush()?;
        Ok(())
    }

    /// Writes the report to the file at the given path.
    pub fn save_to_file(&self, path: &str) -> Result<(), std::io::Error> {
        let file = File::create(path)?;
        self.write(file)
    }

    fn write_metric<W: Write>(
        &self,
        wtr: &mut csv::Writer<W>,
        name: &str,
        result: &ValidationResult,
    ) -> Result<(), std::io::Error> {
        wtr.write_record([
            name.to_string(),
            format!("{:.6}", result.reference),
            format!("{:.6}", result.computed),
            format!("{:.6}", result.error),
            format!("{:.6}", result.error_percent),
        ])?;
        Ok(())
    }

    fn write_state_section<W: Write>(
        &self,
        wtr: &mut csv::Writer<W>,
        results: &BTreeMap<StateCode, ValidationResult>,
    ) -> Result<(), std::io::Error> {
        wtr.write_record(["State", "State_Name", "Measured", "Model", "Error", "Error_Percent"])?;
        for (state, result) in results {
            wtr.write_record([
                state.to_string(),
                self.reference.state_name(*state).to_string(),
                format!("{:.6}", result.reference),
                format!("{:.6}", result.computed),
                format!("{:.6}", result.error),
                format!("{:.6}", result.error_percent),
            ])?;
        }
        Ok(())
    }
}
