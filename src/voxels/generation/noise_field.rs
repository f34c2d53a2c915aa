//! # Value Noise
//!
//! A seeded 2D value-noise field. Integer lattice points are hashed to a
//! value in `[0, 1]`, the four corners around a query point are blended with
//! a quintic fade curve, and the result is rescaled to `[-1, 1]`.
//!
//! The field implements [`noise::NoiseFn`] and [`noise::Seedable`], so it can
//! be dropped into the `noise` crate's combinators like any built-in source.

use noise::{NoiseFn, Seedable};

/// Deterministic 2D value noise. Holds nothing but its seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Creates a field for the given seed.
    pub fn new(seed: u32) -> Self {
        ValueNoise { seed }
    }

    /// Samples the field at `(x, y)`.
    ///
    /// # Returns
    /// A value in `[-1, 1]`. Equal inputs always give equal outputs.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor();
        let yi = y.floor();

        let u = fade(x - xi);
        let v = fade(y - yi);

        let xi = xi as i32;
        let yi = yi as i32;

        let aa = self.hash(xi, yi);
        let ab = self.hash(xi, yi.wrapping_add(1));
        let ba = self.hash(xi.wrapping_add(1), yi);
        let bb = self.hash(xi.wrapping_add(1), yi.wrapping_add(1));

        let x1 = lerp(aa, ba, u);
        let x2 = lerp(ab, bb, u);

        lerp(x1, x2, v) * 2.0 - 1.0
    }

    /// Hashes a lattice point to `[0, 1]`.
    fn hash(&self, x: i32, y: i32) -> f64 {
        let mut h = (self.seed as i32)
            .wrapping_add(x.wrapping_mul(374_761_393))
            .wrapping_add(y.wrapping_mul(668_265_263));
        h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
        h ^= h >> 16;
        (h & 0x7fff_ffff) as f64 / 0x7fff_ffff as f64
    }
}

/// Quintic smootherstep: `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

impl NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

impl Seedable for ValueNoise {
    fn set_seed(self, seed: u32) -> Self {
        ValueNoise { seed }
    }

    fn seed(&self) -> u32 {
        self.seed
    }
}
