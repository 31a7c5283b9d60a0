//! Random source shared between the adapter and its callers.
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable handle to a seedable random generator.
///
/// All clones refer to the same generator, so reseeding through one handle is
/// observed by the others. Handles built separately are independent.
#[derive(Clone, Debug)]
pub struct RandomSource(Arc<Mutex<SmallRng>>);

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource {
    /// Creates a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self(Arc::new(Mutex::new(SmallRng::from_entropy())))
    }

    /// Creates a generator with a fixed seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(Arc::new(Mutex::new(SmallRng::seed_from_u64(seed))))
    }

    fn lock(&self) -> MutexGuard<'_, SmallRng> {
        // Poisoned locks are recovered.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reseeds the generator.
    pub fn reseed(&self, seed: u64) {
        *self.lock() = SmallRng::seed_from_u64(seed);
    }

    /// Draws from `U[0, 1)`.
    pub fn uniform(&self) -> f32 {
        self.lock().gen()
    }

    /// Draws from `U[low, high)`.
    pub fn uniform_in(&self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.uniform()
    }

    /// Returns `true` if both handles refer to the same generator.
    pub fn same_source(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
