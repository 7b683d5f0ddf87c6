//! Uniform random coordinates for percolation trials.
//!
//! The experiment driver draws sites through the [`SiteSource`] trait, so a
//! run can be fed by any `rand` generator via [`RandomSites`] or by a fixed
//! script in tests.
//!
//! # Reproducibility
//!
//! [`create_rng`] builds a `SmallRng` from a seed; the draw sequence is
//! deterministic for a given seed on the same platform.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform integers in `[0, n)`.
pub trait SiteSource {
    /// Draws an integer in `[0, n)`. `n` is always positive.
    fn uniform(&mut self, n: usize) -> usize;
}

impl<S: SiteSource + ?Sized> SiteSource for &mut S {
    fn uniform(&mut self, n: usize) -> usize {
        (**self).uniform(n)
    }
}

/// Adapts any [`rand::Rng`] into a [`SiteSource`].
///
/// # Examples
/// ```
/// use percolation::random::{create_rng, RandomSites, SiteSource};
/// let mut sites = RandomSites::new(create_rng(7));
/// for _ in 0..100 {
///     assert!(sites.uniform(5) < 5);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomSites<R> {
    rng: R,
}

impl<R: Rng> RandomSites<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> SiteSource for RandomSites<R> {
    fn uniform(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }
}

/// Creates a fast, seeded random number generator.
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates a `SmallRng` seeded from operating-system entropy.
pub fn entropy_rng() -> SmallRng {
    SmallRng::from_os_rng()
}
