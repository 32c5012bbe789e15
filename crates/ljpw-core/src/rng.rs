use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Deterministic RNG handle.
///
/// Wraps `StdRng`. Per-domain streams are derived from a master seed and a
/// domain label with SipHash-1-3 under fixed zero keys, so the same
/// `(seed, label)` pair yields the same stream on every platform.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a handle for the stream named `label` under `master_seed`.
    pub fn for_label(master_seed: u64, label: &str) -> Self {
        Self::from_seed(derive_label_seed(master_seed, label))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the seed for a labelled substream (for example a domain name).
pub fn derive_label_seed(master_seed: u64, label: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write(label.as_bytes());
    hasher.finish()
}
