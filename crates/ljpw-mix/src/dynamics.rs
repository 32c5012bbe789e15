//! The loop runs week by week. During the intervention wisdom rises in equal
//! steps; afterwards love grows with `κ(W → L)`, and once love passes the
//! threshold it feeds wisdom back through `κ(L → W)`.

use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::Axis;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::coupling::CouplingMatrix;

fn default_weeks() -> u32 {
    6
}

fn default_intervention_week() -> u32 {
    2
}

fn default_love_threshold() -> f64 {
    0.7
}

fn default_love_rate() -> f64 {
    0.1
}

fn default_wisdom_rate() -> f64 {
    0.05
}

fn default_time_constant() -> f64 {
    2.0
}

/// Schedule and rates of a wisdom intervention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionPlan {
    /// Last simulated week; the trajectory holds `weeks + 1` points.
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    /// Week at which the intervention is complete.
    #[serde(default = "default_intervention_week")]
    pub intervention_week: u32,
    /// Love above which the loop feeds wisdom back.
    #[serde(default = "default_love_threshold")]
    pub love_threshold: f64,
    /// Fraction of `κ(W → L) · ΔW · L` applied per week.
    #[serde(default = "default_love_rate")]
    pub love_rate: f64,
    /// Fraction of `κ(L → W) · (L − L₀)` applied per week.
    #[serde(default = "default_wisdom_rate")]
    pub wisdom_rate: f64,
    /// Time constant, in weeks, of the closed-form love response.
    #[serde(default = "default_time_constant")]
    pub time_constant: f64,
}

impl Default for InterventionPlan {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            intervention_week: default_intervention_week(),
            love_threshold: default_love_threshold(),
            love_rate: default_love_rate(),
            wisdom_rate: default_wisdom_rate(),
            time_constant: default_time_constant(),
        }
    }
}

fn plan_error(field: &str, value: impl ToString) -> LjpwError {
    LjpwError::Configuration(
        ErrorInfo::new("invalid-intervention-plan", "intervention plan parameter out of range")
            .with_context("field", field)
            .with_context("value", value.to_string()),
    )
}

impl InterventionPlan {
    /// Weeks between the end of the intervention and the end of the run.
    pub fn weeks_after_intervention(&self) -> u32 {
        self.weeks.saturating_sub(self.intervention_week)
    }

    /// Rejects schedules that end before the intervention and negative or
    /// non-finite rates.
    pub fn validate(&self) -> Result<(), LjpwError> {
        if self.intervention_week > self.weeks {
            return Err(plan_error("intervention_week", self.intervention_week));
        }
        if !(0.0..=1.0).contains(&self.love_threshold) {
            return Err(plan_error("love_threshold", self.love_threshold));
        }
        for (field, value) in [
            ("love_rate", self.love_rate),
            ("wisdom_rate", self.wisdom_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(plan_error(field, value));
            }
        }
        if !(self.time_constant.is_finite() && self.time_constant > 0.0) {
            return Err(plan_error("time_constant", self.time_constant));
        }
        Ok(())
    }
}

/// State of the loop at the start of a week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Week index, starting at zero.
    pub week: u32,
    /// Love level.
    pub love: f64,
    /// Wisdom level.
    pub wisdom: f64,
}

/// Simulated against closed-form love response for one starting state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Starting love.
    pub love0: f64,
    /// Starting wisdom.
    pub wisdom0: f64,
    /// Size of the intervention.
    pub delta_wisdom: f64,
    /// Love gained by the last simulated week.
    pub observed_delta_love: f64,
    /// [`LoveWisdomFeedback::predict_delta_love`] over the post-intervention weeks.
    pub predicted_delta_love: f64,
    /// Absolute gap between the two.
    pub error: f64,
}

fn check_level(axis: Axis, value: f64) -> Result<(), LjpwError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(LjpwError::Range(
        ErrorInfo::new("axis-out-of-range", "starting level must lie in [0, 1]")
            .with_context("axis", axis.label())
            .with_context("value", value.to_string()),
    ))
}

/// Love ↔ wisdom feedback loop driven by two coupling coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoveWisdomFeedback {
    wisdom_to_love: f64,
    love_to_wisdom: f64,
    plan: InterventionPlan,
}

impl LoveWisdomFeedback {
    /// Reads `κ(W → L)` and `κ(L → W)` from `matrix`. Absent pairs leave the
    /// corresponding direction inert.
    pub fn new(matrix: &CouplingMatrix, plan: InterventionPlan) -> Result<Self, LjpwError> {
        plan.validate()?;
        Ok(Self {
            wisdom_to_love: matrix.coefficient(Axis::Wisdom, Axis::Love),
            love_to_wisdom: matrix.coefficient(Axis::Love, Axis::Wisdom),
            plan,
        })
    }

    /// `κ(W → L)`.
    pub fn wisdom_to_love(&self) -> f64 {
        self.wisdom_to_love
    }

    /// `κ(L → W)`.
    pub fn love_to_wisdom(&self) -> f64 {
        self.love_to_wisdom
    }

    /// Active schedule.
    pub fn plan(&self) -> &InterventionPlan {
        &self.plan
    }

    /// Weekly trajectory after raising wisdom by `delta_wisdom`.
    ///
    /// Levels are clamped to `[0, 1]` after every step.
    pub fn simulate(
        &self,
        love0: f64,
        wisdom0: f64,
        delta_wisdom: f64,
    ) -> Result<Vec<TrajectoryPoint>, LjpwError> {
        check_level(Axis::Love, love0)?;
        check_level(Axis::Wisdom, wisdom0)?;
        if !(-1.0..=1.0).contains(&delta_wisdom) {
            return Err(LjpwError::Range(
                ErrorInfo::new("intervention-out-of-range", "wisdom change must lie in [-1, 1]")
                    .with_context("value", delta_wisdom.to_string()),
            ));
        }

        let plan = &self.plan;
        let mut love = love0;
        let mut wisdom = wisdom0;
        let mut trajectory = Vec::with_capacity(plan.weeks as usize + 1);
        for week in 0..=plan.weeks {
            trajectory.push(TrajectoryPoint { week, love, wisdom });
            if week < plan.intervention_week {
                wisdom = (wisdom + delta_wisdom / f64::from(plan.intervention_week)).clamp(0.0, 1.0);
            } else if week > plan.intervention_week {
                love = (love + self.wisdom_to_love * delta_wisdom * love * plan.love_rate)
                    .clamp(0.0, 1.0);
                if love > plan.love_threshold {
                    wisdom = (wisdom + self.love_to_wisdom * (love - love0) * plan.wisdom_rate)
                        .clamp(0.0, 1.0);
                }
            }
        }
        debug!(
            "simulated {} weeks from L={love0:.3} W={wisdom0:.3} with ΔW={delta_wisdom:.3}",
            plan.weeks
        );
        Ok(trajectory)
    }

    /// Closed-form love response `κ(W → L) · ΔW · L₀ · (1 − e^(−t/τ))`.
    pub fn predict_delta_love(&self, love0: f64, delta_wisdom: f64, weeks_after: f64) -> f64 {
        let time_factor = 1.0 - (-weeks_after / self.plan.time_constant).exp();
        self.wisdom_to_love * delta_wisdom * love0 * time_factor
    }

    /// Simulates every `(love0, wisdom0)` pair of the grid, love-major, and
    /// compares the simulated gain with the closed form over the
    /// post-intervention weeks.
    pub fn sensitivity(
        &self,
        loves: &[f64],
        wisdoms: &[f64],
        delta_wisdom: f64,
    ) -> Result<Vec<SensitivityPoint>, LjpwError> {
        let weeks_after = f64::from(self.plan.weeks_after_intervention());
        let mut points = Vec::with_capacity(loves.len() * wisdoms.len());
        for &love0 in loves {
            for &wisdom0 in wisdoms {
                let trajectory = self.simulate(love0, wisdom0, delta_wisdom)?;
                let observed_delta_love = match (trajectory.first(), trajectory.last()) {
                    (Some(first), Some(last)) => last.love - first.love,
                    _ => 0.0,
                };
                let predicted_delta_love =
                    self.predict_delta_love(love0, delta_wisdom, weeks_after);
                points.push(SensitivityPoint {
                    love0,
                    wisdom0,
                    delta_wisdom,
                    observed_delta_love,
                    predicted_delta_love,
                    error: (observed_delta_love - predicted_delta_love).abs(),
                });
            }
        }
        Ok(points)
    }
}
