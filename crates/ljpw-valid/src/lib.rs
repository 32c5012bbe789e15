#![deny(missing_docs)]
#![doc = "Empirical validation of LJPW coupling coefficients: per-domain regression, cross-domain agreement, a conjugate normal update of the prior, and the final verdict."]

/// Conjugate normal update of the coefficient prior.
pub mod bayes;
/// Acceptance thresholds.
pub mod criteria;
/// Cross-domain agreement of fitted coefficients.
pub mod cross;
/// Installing a validated coefficient back into a coupling matrix.
pub mod feedback;
/// Per-domain regression fits.
pub mod fit;
/// CSV persistence of observations.
pub mod io;
/// Regression and distribution helpers.
pub mod stats;
/// Seeded synthetic observations.
pub mod synth;
/// The fit, aggregate and update pipeline.
pub mod validator;

pub use bayes::{bayesian_update, PosteriorSummary};
pub use criteria::AcceptanceCriteria;
pub use cross::{cross_domain, CrossDomainSummary};
pub use feedback::fitted_matrix;
pub use fit::{fit_domain, CoefficientFit, Domain, DomainObservations, Interval};
pub use io::{read_observations_csv, write_observations_csv};
pub use synth::{generate, generate_domains, SynthConfig, SMALL_NOISE};
pub use validator::{verdict, CoefficientValidator, ValidationReport, Verdict};
