use clap::Parser;
use log::{error, info};

use dwellsim_energy::accumulator::DwellAccumulator;
use dwellsim_energy::badge;
use dwellsim_energy::report::ReportGenerator;
use dwellsim_energy::validator::{ReferenceData, Validator};

/// Reference badge trace: (timestamp in seconds, entered state).
const TRACE: &[(f64, i32)] = &[
    (0., 1),
    (10., 0),
    (153., 4),
    (159., 2),
    (287., 0),
    (371., 5),
    (375., 1),
    (606., 0),
    (3132., 3),
    (3142., 0),
    (4097., 1),
];
const END_TIME: f64 = 4119.;

/// Replays the reference badge trace and validates the energy model.
#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Path to the output report CSV
    #[clap(long, default_value = "model_vs_measurement.csv")]
    output: String,

    /// Path to a YAML file with reference measurements (badge dataset by default)
    #[clap(long)]
    reference: Option<String>,
}

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn main() {
    init_logger();
    let args = Args::parse();

    let reference = match &args.reference {
        Some(path) => ReferenceData::from_file(path),
        None => badge::badge_reference(),
    };

    let mut accumulator = DwellAccumulator::new(Box::new(badge::badge_power_model()));
    for &(time, state) in TRACE {
        accumulator.on_event(time, state).unwrap();
    }
    accumulator.finalize(END_TIME).unwrap();

    info!(
        "total energy: {:.6} J over {:.6} s ({} transitions)",
        accumulator.total_energy(),
        accumulator.stats().total_duration(),
        accumulator.transition_count()
    );
    for state in accumulator.stats().states() {
        info!(
            "state {} ({}): {:.6} J over {:.6} s",
            state,
            badge::state_name(state),
            accumulator.stats().energy_for(state),
            accumulator.stats().duration_for(state)
        );
    }

    let validation = Validator::new(reference.clone()).validate(&accumulator);
    let report = ReportGenerator::new(&reference, &validation);
    if let Err(e) = report.save_to_file(&args.output) {
        error!("can't write report to {}: {}", args.output, e);
    } else {
        info!("report saved to {}", args.output);
    }

    info!(
        "model status: {} (total energy error {:.6}%)",
        if validation.passed() { "PASS" } else { "FAIL" },
        validation.total_energy.error_percent
    );
}
