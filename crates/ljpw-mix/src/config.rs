use ljpw_core::errors::LjpwError;
use ljpw_core::ReferencePoints;
use serde::{Deserialize, Serialize};

use crate::color::ColorWeights;
use crate::coupling::CouplingMatrix;
use crate::diagnostics::{DiagnosticThresholds, DiagnosticsEngine};
use crate::mixer::{Mixer, MixerConfig};

fn default_coupling() -> CouplingMatrix {
    CouplingMatrix::love_amplification()
}

/// YAML/JSON-loadable model configuration. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Anchor and natural equilibrium.
    #[serde(default)]
    pub reference: ReferencePoints,
    /// Coupling coefficients.
    #[serde(default = "default_coupling")]
    pub coupling: CouplingMatrix,
    /// Score weights.
    #[serde(default)]
    pub mixer: MixerConfig,
    /// Diagnostic cut-offs.
    #[serde(default)]
    pub thresholds: DiagnosticThresholds,
    /// Color channel weights.
    #[serde(default)]
    pub color: ColorWeights,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            reference: ReferencePoints::default(),
            coupling: default_coupling(),
            mixer: MixerConfig::default(),
            thresholds: DiagnosticThresholds::default(),
            color: ColorWeights::default(),
        }
    }
}

impl ModelConfig {
    /// Validates the configuration and builds the mixer alone.
    pub fn build_mixer(&self) -> Result<Mixer, LjpwError> {
        Mixer::new(self.mixer, self.coupling.clone(), self.reference)
    }

    /// Validates the configuration and builds a diagnostics engine.
    pub fn build_engine(&self) -> Result<DiagnosticsEngine, LjpwError> {
        let mixer = self.build_mixer()?;
        Ok(DiagnosticsEngine::new(mixer, self.thresholds, self.color))
    }
}
