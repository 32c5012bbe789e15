use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    calibrate::{self, CalibrateArgs},
    diagnose::{self, DiagnoseArgs},
    simulate::{self, SimulateArgs},
    synth::{self, SynthArgs},
    validate::{self, ValidateArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ljpw", about = "LJPW calibration, diagnostics and coefficient validation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calibrate a raw metric bundle into a coordinate.
    Calibrate(CalibrateArgs),
    /// Diagnose a coordinate or a calibrated metric bundle.
    Diagnose(DiagnoseArgs),
    /// Validate a coupling coefficient across domains.
    Validate(ValidateArgs),
    /// Generate synthetic observations for one domain.
    Synth(SynthArgs),
    /// Simulate the love/wisdom feedback loop after a wisdom intervention.
    Simulate(SimulateArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Calibrate(args) => calibrate::run(&args),
        Command::Diagnose(args) => diagnose::run(&args),
        Command::Validate(args) => validate::run(&args),
        Command::Synth(args) => synth::run(&args),
        Command::Simulate(args) => simulate::run(&args),
    }
}
