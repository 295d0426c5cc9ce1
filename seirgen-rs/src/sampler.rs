//! Distribution samplers used when rerolling parameters: a lower-truncated
//! normal and a modified-PERT draw. Both take the RNG explicitly so callers
//! control seeding.
use crate::prelude::Real;
use ndarray::Array1;
use rand::prelude::*;
use rand_distr::{Beta, Normal};

/// Fresh small RNG seeded from the OS entropy pool.
pub fn default_rng() -> SmallRng {
    SmallRng::from_entropy()
}

/// Draw from a normal distribution with the given location and scale,
/// truncated from below at `lower`.
///
/// Implemented by resampling, so the draw can take many attempts when
/// `lower` sits far into the upper tail. A scale of zero (or less)
/// degenerates to `max(loc, lower)`.
pub fn truncnorm(loc: Real, scale: Real, lower: Real, rng: &mut impl Rng) -> Real {
    if scale <= 0.0 {
        return loc.max(lower);
    }
    let normal = Normal::new(loc, scale).unwrap();
    loop {
        let x = normal.sample(rng);
        if x >= lower {
            return x;
        }
    }
}

/// `n` independent truncated-normal draws as an array.
pub fn truncnorm_vec(loc: Real, scale: Real, lower: Real, n: usize, rng: &mut impl Rng) -> Array1<Real> {
    Array1::from((0..n).map(|_| truncnorm(loc, scale, lower, rng)).collect::<Vec<_>>())
}

/// Draw from a modified-PERT distribution on `[a, b]` with the given mean and
/// concentration `gamma`.
///
/// The mode is recovered from `mean = (a + gamma * mode + b) / (gamma + 2)`
/// and clamped into the interval so the underlying Beta shape parameters stay
/// positive; larger `gamma` concentrates the draw around the mode.
pub fn mpert(mean: Real, a: Real, b: Real, gamma: Real, rng: &mut impl Rng) -> Real {
    let width = b - a;
    if width <= 0.0 {
        return mean;
    }
    let eps = 1e-9 * width;
    let mode = ((mean * (gamma + 2.0) - a - b) / gamma).max(a + eps).min(b - eps);
    let alpha = 1.0 + gamma * (mode - a) / width;
    let beta = 1.0 + gamma * (b - mode) / width;
    let dist = Beta::new(alpha, beta).unwrap();
    a + width * dist.sample(rng)
}
