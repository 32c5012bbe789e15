#![deny(missing_docs)]
#![doc = "Core data model for the LJPW engine: the bounded four-axis coordinate, injected reference points, the shared error taxonomy, seeded RNG streams and canonical serde helpers."]

/// Bounded four-axis coordinate and per-axis records.
pub mod coordinate;
/// Error taxonomy shared by every LJPW crate.
pub mod errors;
/// Anchor and natural equilibrium reference points.
pub mod reference;
/// Seeded RNG streams.
pub mod rng;
/// Canonical JSON/YAML helpers and content hashing.
pub mod serde;

pub use coordinate::{Axis, AxisValues, Coordinate};
pub use errors::{ErrorInfo, LjpwError};
pub use reference::{natural_equilibrium, ReferencePoints};
pub use rng::{derive_label_seed, RngHandle};
