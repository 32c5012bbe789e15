use ljpw_core::errors::{ErrorInfo, LjpwError};
use ljpw_core::Axis;
use serde::{Deserialize, Serialize};

use crate::coupling::CouplingMatrix;

/// Love below which process turns into theater.
pub const LOW_LOVE: f64 = 0.4;
/// Love above which process feels helpful.
pub const HIGH_LOVE: f64 = 0.7;
/// Justice above which low love produces the bureaucratic trap.
pub const HIGH_JUSTICE: f64 = 0.7;

/// Organizational outcomes of a justice level under a given love level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JusticeOutcome {
    /// `J · (1 + κ(L → J) · L)`.
    pub effective_justice: f64,
    /// Share of processes actually followed, on `[0, 1]`.
    pub compliance: f64,
    /// Process satisfaction on `[1, 10]`.
    pub satisfaction: f64,
    /// Perceived red tape on `[1, 10]`.
    pub bureaucracy: f64,
}

/// Justice/love quadrant of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationProfile {
    /// Justice above 0.8 with love below 0.4.
    Bureaucratic,
    /// Justice above 0.8 with love above 0.7.
    Effective,
    /// Justice strictly between 0.5 and 0.7 with love above 0.7.
    Collaborative,
    /// Anything else.
    Other,
}

fn check_level(axis: Axis, value: f64) -> Result<(), LjpwError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(LjpwError::Range(
        ErrorInfo::new("axis-out-of-range", "level must lie in [0, 1]")
            .with_context("axis", axis.label())
            .with_context("value", value.to_string()),
    ))
}

/// Outcomes of `justice` amplified by `love` through `κ(L → J)` of `matrix`.
///
/// Below [`LOW_LOVE`] compliance is capped near 70% whatever the justice
/// level, and high justice there drives bureaucracy up instead of down.
pub fn effective_justice(
    justice: f64,
    love: f64,
    matrix: &CouplingMatrix,
) -> Result<JusticeOutcome, LjpwError> {
    check_level(Axis::Justice, justice)?;
    check_level(Axis::Love, love)?;

    let kappa = matrix.coefficient(Axis::Love, Axis::Justice);
    let effective_justice = justice * (1.0 + kappa * love);

    let compliance = if love < LOW_LOVE {
        0.50 + 0.20 * justice - (LOW_LOVE - love) * 0.3
    } else {
        (0.40 + 0.50 * effective_justice).min(0.95)
    };

    let satisfaction = (justice * 5.0 + love * 4.0 + justice * love * 3.0).min(10.0);

    let bureaucracy = if love < LOW_LOVE && justice > HIGH_JUSTICE {
        6.0 + (justice - HIGH_JUSTICE) * 5.0 + (LOW_LOVE - love) * 5.0
    } else if love > HIGH_LOVE {
        5.0 - love * 4.0 - justice * 0.5
    } else {
        5.0 + (justice - 0.5) * 2.0 - (love - 0.5) * 3.0
    };

    Ok(JusticeOutcome {
        effective_justice,
        compliance: compliance.clamp(0.0, 1.0),
        satisfaction: satisfaction.clamp(1.0, 10.0),
        bureaucracy: bureaucracy.clamp(1.0, 10.0),
    })
}

/// Quadrant of a `(justice, love)` pair.
pub fn classify(justice: f64, love: f64) -> OrganizationProfile {
    if justice > 0.8 && love < LOW_LOVE {
        OrganizationProfile::Bureaucratic
    } else if justice > 0.8 && love > HIGH_LOVE {
        OrganizationProfile::Effective
    } else if justice > 0.5 && justice < 0.7 && love > HIGH_LOVE {
        OrganizationProfile::Collaborative
    } else {
        OrganizationProfile::Other
    }
}
