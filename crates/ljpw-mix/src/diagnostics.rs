use ljpw_core::{Axis, Coordinate};
use serde::{Deserialize, Serialize};

use crate::color::{project, ColorProjection, ColorWeights};
use crate::coupling::CouplingMatrix;
use crate::mixer::{MixScores, Mixer};

fn default_amplifier() -> Axis {
    Axis::Love
}

fn default_low_robustness() -> f64 {
    0.5
}

fn default_low_effectiveness() -> f64 {
    0.6
}

fn default_low_growth() -> f64 {
    0.8
}

fn default_amplifier_deficiency() -> f64 {
    0.7
}

fn default_low_harmony() -> f64 {
    0.6
}

fn default_raise_amplifier() -> f64 {
    0.6
}

fn default_growth_ceiling() -> f64 {
    1.0
}

fn default_healthy_amplifier() -> f64 {
    0.7
}

fn default_high_harmony() -> f64 {
    0.85
}

/// Every cut-off used by [`DiagnosticsEngine::diagnose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticThresholds {
    /// Axis treated as the amplifier in issue and suggestion rules.
    #[serde(default = "default_amplifier")]
    pub amplifier: Axis,
    /// Robustness below this flags a bottleneck.
    #[serde(default = "default_low_robustness")]
    pub low_robustness: f64,
    /// Effectiveness below this flags a critically low axis.
    #[serde(default = "default_low_effectiveness")]
    pub low_effectiveness: f64,
    /// Growth below this, together with a weak amplifier, flags a deficiency.
    #[serde(default = "default_low_growth")]
    pub low_growth: f64,
    /// Amplifier value below which the deficiency issue may fire.
    #[serde(default = "default_amplifier_deficiency")]
    pub amplifier_deficiency: f64,
    /// Harmony below this flags distance from the anchor.
    #[serde(default = "default_low_harmony")]
    pub low_harmony: f64,
    /// Amplifier value below which raising it is suggested.
    #[serde(default = "default_raise_amplifier")]
    pub raise_amplifier: f64,
    /// Growth below this with a healthy amplifier suggests raising the others.
    #[serde(default = "default_growth_ceiling")]
    pub growth_ceiling: f64,
    /// Amplifier value above which it counts as healthy.
    #[serde(default = "default_healthy_amplifier")]
    pub healthy_amplifier: f64,
    /// Harmony above this suggests maintaining balance.
    #[serde(default = "default_high_harmony")]
    pub high_harmony: f64,
}

impl Default for DiagnosticThresholds {
    fn default() -> Self {
        Self {
            amplifier: default_amplifier(),
            low_robustness: default_low_robustness(),
            low_effectiveness: default_low_effectiveness(),
            low_growth: default_low_growth(),
            amplifier_deficiency: default_amplifier_deficiency(),
            low_harmony: default_low_harmony(),
            raise_amplifier: default_raise_amplifier(),
            growth_ceiling: default_growth_ceiling(),
            healthy_amplifier: default_healthy_amplifier(),
            high_harmony: default_high_harmony(),
        }
    }
}

/// Detected problem category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Robustness dragged down by the weakest axis.
    Bottleneck,
    /// At least one axis low enough to sink the multiplicative score.
    CriticallyLow,
    /// Weak amplifier limiting growth.
    AmplifierDeficiency,
    /// Far from the anchor.
    FarFromAnchor,
    /// Nothing fired.
    NoCriticalIssues,
}

/// A detected problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Category.
    pub kind: IssueKind,
    /// Human readable description.
    pub message: String,
}

/// Suggested action category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Raise the amplifier axis.
    RaiseAmplifier,
    /// Raise the bottleneck axis.
    FixBottleneck,
    /// Amplifier is healthy; raise the remaining axes.
    RaiseOthers,
    /// Keep the current balance.
    MaintainBalance,
    /// Nothing fired.
    WellBalanced,
}

/// A ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Category.
    pub kind: SuggestionKind,
    /// Axis the suggestion is about, if any.
    pub target: Option<Axis>,
    /// 1-based rank; lower is more urgent.
    pub priority: u32,
    /// Human readable description.
    pub message: String,
}

/// Outcome of [`DiagnosticsEngine::diagnose`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    /// The diagnosed coordinate.
    pub coordinate: Coordinate,
    /// Aggregate scores.
    pub scores: MixScores,
    /// Lowest axis; first in declaration order on ties.
    pub bottleneck: Axis,
    /// Value of the bottleneck axis.
    pub bottleneck_value: f64,
    /// Never empty.
    pub issues: Vec<Issue>,
    /// Never empty; sorted by priority.
    pub suggestions: Vec<Suggestion>,
    /// RGB projection.
    pub color: ColorProjection,
}

/// Lowest axis of `coord`. Ties resolve to the earliest axis in
/// [`Axis::ALL`].
pub fn bottleneck(coord: &Coordinate) -> (Axis, f64) {
    let mut lowest = (Axis::Love, coord.get(Axis::Love));
    for (axis, value) in coord.iter().skip(1) {
        if value < lowest.1 {
            lowest = (axis, value);
        }
    }
    lowest
}

/// Mixer plus thresholds plus color weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagnosticsEngine {
    mixer: Mixer,
    thresholds: DiagnosticThresholds,
    color_weights: ColorWeights,
}

impl DiagnosticsEngine {
    /// Assembles an engine from already validated parts.
    pub fn new(mixer: Mixer, thresholds: DiagnosticThresholds, color_weights: ColorWeights) -> Self {
        Self {
            mixer,
            thresholds,
            color_weights,
        }
    }

    /// Underlying mixer.
    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Active thresholds.
    pub fn thresholds(&self) -> &DiagnosticThresholds {
        &self.thresholds
    }

    /// Scores, bottleneck, issues, suggestions and color for `coord`.
    pub fn diagnose(&self, coord: &Coordinate) -> DiagnosisReport {
        let scores = self.mixer.mix(coord);
        let (weakest, weakest_value) = bottleneck(coord);
        let issues = self.issues(coord, &scores, weakest, weakest_value);
        let suggestions = self.suggestions(coord, &scores, weakest);
        log::debug!(
            "diagnosed {coord}: composite={:.4} bottleneck={} issues={} suggestions={}",
            scores.composite,
            weakest.label(),
            issues.len(),
            suggestions.len()
        );
        DiagnosisReport {
            coordinate: *coord,
            scores,
            bottleneck: weakest,
            bottleneck_value: weakest_value,
            issues,
            suggestions,
            color: project(coord, &self.color_weights),
        }
    }

    fn issues(
        &self,
        coord: &Coordinate,
        scores: &MixScores,
        weakest: Axis,
        weakest_value: f64,
    ) -> Vec<Issue> {
        let t = &self.thresholds;
        let amplifier = coord.get(t.amplifier);
        let mut issues = Vec::new();
        if scores.robustness < t.low_robustness {
            issues.push(Issue {
                kind: IssueKind::Bottleneck,
                message: format!(
                    "Bottleneck in {} (value: {weakest_value:.2})",
                    weakest.label()
                ),
            });
        }
        if scores.effectiveness < t.low_effectiveness {
            issues.push(Issue {
                kind: IssueKind::CriticallyLow,
                message: "One or more axes critically low (multiplicative effect)".to_string(),
            });
        }
        if scores.growth_potential < t.low_growth && amplifier < t.amplifier_deficiency {
            issues.push(Issue {
                kind: IssueKind::AmplifierDeficiency,
                message: format!("{} deficiency limiting growth potential", t.amplifier.name()),
            });
        }
        if scores.harmony < t.low_harmony {
            issues.push(Issue {
                kind: IssueKind::FarFromAnchor,
                message: "Far from the anchor point; significant optimization needed".to_string(),
            });
        }
        if issues.is_empty() {
            issues.push(Issue {
                kind: IssueKind::NoCriticalIssues,
                message: "No critical issues".to_string(),
            });
        }
        issues
    }

    fn suggestions(&self, coord: &Coordinate, scores: &MixScores, weakest: Axis) -> Vec<Suggestion> {
        let t = &self.thresholds;
        let amplifier = coord.get(t.amplifier);
        let mut found: Vec<(SuggestionKind, Option<Axis>, String)> = Vec::new();
        if amplifier < t.raise_amplifier {
            found.push((
                SuggestionKind::RaiseAmplifier,
                Some(t.amplifier),
                format!(
                    "Increase {} ({}); it amplifies the other axes",
                    t.amplifier.name(),
                    t.amplifier.label()
                ),
            ));
        }
        if scores.robustness < t.low_robustness {
            found.push((
                SuggestionKind::FixBottleneck,
                Some(weakest),
                format!("Fix bottleneck: improve {}", weakest.name()),
            ));
        }
        if scores.growth_potential < t.growth_ceiling && amplifier > t.healthy_amplifier {
            found.push((
                SuggestionKind::RaiseOthers,
                None,
                format!(
                    "{} is healthy, but the other axes need improvement",
                    t.amplifier.name()
                ),
            ));
        }
        if scores.harmony > t.high_harmony {
            found.push((
                SuggestionKind::MaintainBalance,
                None,
                "Excellent harmony; maintain balance while approaching the anchor".to_string(),
            ));
        }
        if found.is_empty() {
            found.push((
                SuggestionKind::WellBalanced,
                None,
                "System is well-balanced".to_string(),
            ));
        }
        found
            .into_iter()
            .zip(1..)
            .map(|((kind, target, message), priority)| Suggestion {
                kind,
                target,
                priority,
                message,
            })
            .collect()
    }
}

/// Diagnoses `coord` with default weights, thresholds and colors and the
/// given coupling matrix. Both inputs are validated at construction, so
/// there is no failure path.
pub fn diagnose(coord: &Coordinate, matrix: &CouplingMatrix) -> DiagnosisReport {
    let engine = DiagnosticsEngine::new(
        Mixer::with_matrix(matrix.clone()),
        DiagnosticThresholds::default(),
        ColorWeights::default(),
    );
    engine.diagnose(coord)
}
