use ljpw_core::errors::LjpwError;
use ljpw_core::Axis;
use ljpw_mix::CouplingMatrix;

use crate::bayes::PosteriorSummary;

/// Copy of `base` with `source → target` set to the posterior mean. `base`
/// is left untouched.
pub fn fitted_matrix(
    base: &CouplingMatrix,
    source: Axis,
    target: Axis,
    posterior: &PosteriorSummary,
) -> Result<CouplingMatrix, LjpwError> {
    let updated = base.with_coefficient(source, target, posterior.posterior_mean)?;
    log::debug!(
        "installed {}->{} = {:.4} (was {:.4})",
        source.label(),
        target.label(),
        posterior.posterior_mean,
        base.coefficient(source, target)
    );
    Ok(updated)
}
