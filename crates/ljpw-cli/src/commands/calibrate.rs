use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ljpw_calib::{CalibrationProfile, Calibrator, RawMetricBundle};

use super::{emit, load_structured};

#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Raw metric bundle (YAML or JSON).
    #[arg(long)]
    pub metrics: PathBuf,
    /// Alternative calibration profile; defaults to the software-team profile.
    #[arg(long)]
    pub profile: Option<PathBuf>,
    /// Write the calibration report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Maps a metric bundle to a coordinate and prints the per-sub-metric report.
pub fn run(args: &CalibrateArgs) -> Result<(), Box<dyn Error>> {
    let profile = match &args.profile {
        Some(path) => load_structured::<CalibrationProfile>(path)?,
        None => CalibrationProfile::software_team(),
    };
    let calibrator = Calibrator::new(profile)?;
    let bundle: RawMetricBundle = load_structured(&args.metrics)?;
    let report = calibrator.calibrate_detailed(&bundle)?;
    log::info!("calibrated {} to {}", args.metrics.display(), report.coordinate);
    emit(&report, args.out.as_deref())
}
