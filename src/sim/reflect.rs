//! Angle-space reflection
//!
//! Mirrors the incidence heading about the surface normal, with an optional
//! jitter on the incidence to keep the sprite out of perfectly periodic
//! bounce loops between parallel walls.

use rand::Rng;
use rand_pcg::Pcg32;

/// Mirror `incidence` about `normal` (both degrees), returning `[0, 360)`
///
/// Algebraically `(2 * normal - 180 - (incidence + jitter)) mod 360`, written
/// as the nested-remainder form so every intermediate stays in `[0, 360)`.
/// The result is invariant under `normal -> normal + 180`, so either
/// orientation of a face normal reflects identically.
#[inline]
pub fn reflect(incidence_degrees: f32, normal_degrees: f32, jitter_degrees: f32) -> f32 {
    let folded = ((normal_degrees - 180.0).rem_euclid(360.0)
        - (incidence_degrees + jitter_degrees))
        .rem_euclid(360.0);
    (normal_degrees + folded).rem_euclid(360.0)
}

/// Sample a jitter angle uniformly from `[-half_width, +half_width]` degrees
#[inline]
pub fn sample_jitter(rng: &mut Pcg32, half_width: f32) -> f32 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half_width..=half_width)
}
