use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ljpw_core::Axis;
use ljpw_mix::CouplingMatrix;
use ljpw_valid::{
    fitted_matrix, read_observations_csv, AcceptanceCriteria, CoefficientValidator, Domain,
    ValidationReport,
};
use serde::Serialize;

use super::{emit, load_structured, parse_axis};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Domain observations as `NAME=PATH.csv` (columns source,base,effective).
    #[arg(long = "domain", value_name = "NAME=PATH", value_parser = parse_domain, required = true)]
    pub domains: Vec<(String, PathBuf)>,
    /// Acceptance criteria (YAML or JSON).
    #[arg(long)]
    pub criteria: Option<PathBuf>,
    /// Install the posterior mean for `SOURCE:TARGET` (e.g. `L:J`) into the
    /// default coupling matrix and include it in the output.
    #[arg(long, value_parser = parse_pair)]
    pub install: Option<(Axis, Axis)>,
    /// Worker threads for the per-domain fits.
    #[arg(long)]
    pub threads: Option<usize>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ValidateOutput {
    report: ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    fitted_coupling: Option<CouplingMatrix>,
}

fn parse_domain(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected NAME=PATH, got `{value}`")),
    }
}

fn parse_pair(value: &str) -> Result<(Axis, Axis), String> {
    let (source, target) = value
        .split_once(':')
        .ok_or_else(|| format!("expected SOURCE:TARGET, got `{value}`"))?;
    Ok((parse_axis(source)?, parse_axis(target)?))
}

/// Fits every domain, aggregates and prints the validation report.
pub fn run(args: &ValidateArgs) -> Result<(), Box<dyn Error>> {
    let criteria = match &args.criteria {
        Some(path) => load_structured::<AcceptanceCriteria>(path)?,
        None => AcceptanceCriteria::default(),
    };
    let mut validator = CoefficientValidator::new(criteria)?;
    if let Some(threads) = args.threads {
        validator = validator.with_threads(threads);
    }

    let domains = args
        .domains
        .iter()
        .map(|(name, path)| -> Result<Domain, Box<dyn Error>> {
            Ok(Domain::new(name.clone(), read_observations_csv(path)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = validator.validate(&domains)?;
    let fitted_coupling = match args.install {
        Some((source, target)) => Some(fitted_matrix(
            &CouplingMatrix::love_amplification(),
            source,
            target,
            &report.posterior,
        )?),
        None => None,
    };
    emit(
        &ValidateOutput {
            report,
            fitted_coupling,
        },
        args.out.as_deref(),
    )
}
