use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator for entity and character ids (16 hex digits).
pub struct IdGen {
    rng: ChaCha8Rng,
}

impl IdGen {
    /// Seeded generator for deterministic ids in tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn generate(&mut self) -> String {
        format!("{:016x}", self.rng.next_u64())
    }
}
