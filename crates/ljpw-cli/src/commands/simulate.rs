use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ljpw_mix::{
    effective_justice, CouplingMatrix, InterventionPlan, JusticeOutcome, LoveWisdomFeedback,
    TrajectoryPoint,
};
use serde::Serialize;

use super::{emit, load_structured};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Starting love level.
    #[arg(long)]
    pub love: f64,
    /// Starting wisdom level.
    #[arg(long)]
    pub wisdom: f64,
    /// Size of the wisdom intervention.
    #[arg(long, default_value_t = 0.4)]
    pub delta_wisdom: f64,
    /// Justice level; adds the effective-justice outcomes at the love level
    /// reached in the last week.
    #[arg(long)]
    pub justice: Option<f64>,
    /// Intervention plan (YAML or JSON).
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Coupling matrix as a list of entries (YAML or JSON); defaults to the
    /// full matrix.
    #[arg(long)]
    pub coupling: Option<PathBuf>,
    /// Write the result here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulateOutput {
    trajectory: Vec<TrajectoryPoint>,
    observed_delta_love: f64,
    predicted_delta_love: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    justice: Option<JusticeOutcome>,
}

/// Runs the love/wisdom feedback loop for one starting state.
pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let matrix = match &args.coupling {
        Some(path) => load_structured::<CouplingMatrix>(path)?,
        None => CouplingMatrix::full(),
    };
    let plan = match &args.plan {
        Some(path) => load_structured::<InterventionPlan>(path)?,
        None => InterventionPlan::default(),
    };
    let feedback = LoveWisdomFeedback::new(&matrix, plan)?;

    let trajectory = feedback.simulate(args.love, args.wisdom, args.delta_wisdom)?;
    let observed_delta_love = match (trajectory.first(), trajectory.last()) {
        (Some(first), Some(last)) => last.love - first.love,
        _ => 0.0,
    };
    let predicted_delta_love = feedback.predict_delta_love(
        args.love,
        args.delta_wisdom,
        f64::from(plan.weeks_after_intervention()),
    );
    let justice = match args.justice {
        Some(level) => Some(effective_justice(level, trajectory_end_love(&trajectory), &matrix)?),
        None => None,
    };
    emit(
        &SimulateOutput {
            trajectory,
            observed_delta_love,
            predicted_delta_love,
            justice,
        },
        args.out.as_deref(),
    )
}

fn trajectory_end_love(trajectory: &[TrajectoryPoint]) -> f64 {
    trajectory.last().map_or(0.0, |point| point.love)
}
