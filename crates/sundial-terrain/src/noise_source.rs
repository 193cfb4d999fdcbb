//! Coherent 2D noise used to sample terrain elevation.

use noise::{NoiseFn, Simplex};

/// A deterministic 2D noise field with output in `[-1, 1]`.
///
/// Any `Fn(f64, f64) -> f64` is a noise source, which keeps test stubs
/// one-liners.
pub trait NoiseSource {
    /// Sample the field at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Seeded simplex noise.
///
/// Two instances built from the same seed produce identical fields.
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    noise: Simplex,
    seed: u64,
}

impl SimplexNoise {
    /// Create a field from a seed.
    ///
    /// The generator takes a 32-bit seed; both halves of `seed` are folded
    /// into it so seeds differing only in the high bits give different fields.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: Simplex::new(fold_seed(seed)),
            seed,
        }
    }

    /// Create a field from a freshly drawn random seed.
    ///
    /// The seed is available through [`seed`](Self::seed) so a session can be
    /// reproduced later.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y]).clamp(-1.0, 1.0)
    }
}
