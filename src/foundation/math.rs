//! Interpolation and seeded pseudo-random helpers.
//!
//! Everything here is a pure function of its arguments so that any frame can be
//! computed independently of every other frame.

/// Multiplier applied to an asset ordinal before the sine hash.
pub const SEED_SCALE: f64 = 12345.0;

#[inline]
/// Linearly interpolate between `a` and `b` with clamped parameter `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Map `x` from `[x0, x1]` onto `[y0, y1]`, clamping on both sides.
///
/// A degenerate input range (`x1 <= x0`) is treated as a step at `x0`: inputs
/// before it yield `y0`, everything else yields `y1`. The result never leaves
/// the closed interval spanned by `y0` and `y1`.
pub fn interpolate_clamped(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x1 <= x0 {
        return if x < x0 { y0 } else { y1 };
    }
    let t = (x - x0) / (x1 - x0);
    if t >= 1.0 {
        return y1;
    }
    lerp(y0, y1, t).clamp(y0.min(y1), y0.max(y1))
}

/// Deterministic sine hash of `(ordinal, coefficient)` into `[0, 1)`.
///
/// `0.5 + 0.5 * sin(ordinal * 12345 * coefficient)`. Ordinal 0 always maps to
/// `0.5`. The upper bound is excluded by nudging an exact `1.0` down.
pub fn seeded_unit(ordinal: u64, coefficient: f64) -> f64 {
    let v = 0.5 + 0.5 * (ordinal as f64 * SEED_SCALE * coefficient).sin();
    v.clamp(0.0, 1.0 - f64::EPSILON)
}

/// Map a seeded unit value onto `[min, max]`.
pub fn seeded_range(ordinal: u64, coefficient: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * seeded_unit(ordinal, coefficient)
}

/// SplitMix64 finalizer; a stateless 64-bit mixing function.
pub fn mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
