#![deny(missing_docs)]
#![doc = "Coupling model, aggregate scores and diagnostics for LJPW coordinates: effective values under a coupling matrix, the five mixer scores, threshold-driven issues and suggestions, color projection, equilibrium comparison, and the love/wisdom and love/justice coupling dynamics."]

/// Effective justice and bureaucracy under love coupling.
pub mod bureaucracy;
/// Color projection and naming.
pub mod color;
/// Model configuration aggregate.
pub mod config;
/// Coupling matrix and effective values.
pub mod coupling;
/// Bottleneck, issues and ranked suggestions.
pub mod diagnostics;
/// Love ↔ wisdom feedback after a wisdom intervention.
pub mod dynamics;
/// Comparison against the natural equilibrium.
pub mod equilibrium;
/// The five aggregate scores.
pub mod mixer;
/// Improvement direction and axis ranking.
pub mod priority;

pub use bureaucracy::{classify, effective_justice, JusticeOutcome, OrganizationProfile};
pub use color::{project, ColorName, ColorProjection, ColorWeights};
pub use config::ModelConfig;
pub use coupling::{
    amplification, effective_value, effective_values, CouplingEntry, CouplingMatrix,
};
pub use diagnostics::{
    bottleneck, diagnose, DiagnosisReport, DiagnosticThresholds, DiagnosticsEngine, Issue,
    IssueKind, Suggestion, SuggestionKind,
};
pub use dynamics::{InterventionPlan, LoveWisdomFeedback, SensitivityPoint, TrajectoryPoint};
pub use equilibrium::{compare_to_equilibrium, EquilibriumComparison, EquilibriumInterpretation};
pub use mixer::{geometric_mean, harmonic_mean, CompositeWeights, MixScores, Mixer, MixerConfig};
pub use priority::{optimization_priority, optimization_vector, AxisGap};
