use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ljpw_calib::{Calibrator, RawMetricBundle};
use ljpw_core::Coordinate;
use ljpw_mix::{
    compare_to_equilibrium, optimization_priority, AxisGap, DiagnosisReport,
    EquilibriumComparison, ModelConfig,
};
use serde::Serialize;

use super::{emit, load_structured};

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Coordinate as `L,J,P,W`.
    #[arg(long, value_parser = parse_coordinate, conflicts_with = "metrics", required_unless_present = "metrics")]
    pub coordinate: Option<Coordinate>,
    /// Raw metric bundle to calibrate first (YAML or JSON).
    #[arg(long)]
    pub metrics: Option<PathBuf>,
    /// Model configuration (YAML or JSON); every section is optional.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the diagnosis here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DiagnoseOutput {
    diagnosis: DiagnosisReport,
    equilibrium: EquilibriumComparison,
    priorities: Vec<AxisGap>,
}

fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|err| format!("`{part}`: {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    let values: [f64; 4] = parts
        .try_into()
        .map_err(|parts: Vec<f64>| format!("expected 4 values, got {}", parts.len()))?;
    Coordinate::from_vector(values).map_err(|err| err.to_string())
}

/// Diagnoses a coordinate, or a calibrated metric bundle.
pub fn run(args: &DiagnoseArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => load_structured::<ModelConfig>(path)?,
        None => ModelConfig::default(),
    };
    let engine = config.build_engine()?;

    let coordinate = match (&args.coordinate, &args.metrics) {
        (Some(coordinate), _) => *coordinate,
        (None, Some(path)) => {
            let bundle: RawMetricBundle = load_structured(path)?;
            Calibrator::default().calibrate(&bundle)?
        }
        (None, None) => return Err("either --coordinate or --metrics is required".into()),
    };

    let diagnosis = engine.diagnose(&coordinate);
    let output = DiagnoseOutput {
        equilibrium: compare_to_equilibrium(&coordinate, &config.reference),
        priorities: optimization_priority(
            &coordinate,
            &config.reference.anchor,
            config.thresholds.amplifier,
        ),
        diagnosis,
    };
    emit(&output, args.out.as_deref())
}
