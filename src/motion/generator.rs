use crate::{
    foundation::core::{Affine, Vec2},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{interpolate_clamped, lerp, seeded_range},
    motion::presets::PanPreset,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual transform of the active image at one frame.
pub struct MotionTransform {
    /// Translation in pixels.
    pub pan: Vec2,
    /// Uniform scale, `1.0` is the fitted size.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
}

impl Default for MotionTransform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl MotionTransform {
    /// Convert to an affine matrix pivoting rotation and scale about `anchor`.
    pub fn to_affine(self, anchor: Vec2) -> Affine {
        // T(pan) * T(anchor) * R * S * T(-anchor)
        Affine::translate(self.pan)
            * Affine::translate(anchor)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-anchor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
/// Pan-and-zoom flavour.
pub enum KenBurnsMode {
    /// One of eight fixed drift directions picked by `ordinal % 8`.
    Directional {
        /// Scale at the first frame.
        #[serde(default = "default_start_scale")]
        start_scale: f64,
        /// Scale once the pan window has elapsed.
        #[serde(default = "default_end_scale")]
        end_scale: f64,
        /// Fraction of the asset duration spent moving; the rest holds.
        #[serde(default = "default_window_fraction")]
        window_fraction: f64,
    },
    /// Per-asset bounds derived from the seeded sine hash, moving for the
    /// whole asset duration.
    Seeded {
        /// Lower scale bound.
        #[serde(default = "default_min_scale")]
        min_scale: f64,
        /// Upper scale bound.
        #[serde(default = "default_max_scale")]
        max_scale: f64,
        /// Pan offsets are drawn from `[-pan_distance, pan_distance]`.
        #[serde(default = "default_pan_distance")]
        pan_distance: f64,
    },
}

fn default_start_scale() -> f64 {
    1.05
}
fn default_end_scale() -> f64 {
    1.0
}
fn default_window_fraction() -> f64 {
    0.6
}
fn default_min_scale() -> f64 {
    1.0
}
fn default_max_scale() -> f64 {
    1.15
}
fn default_pan_distance() -> f64 {
    40.0
}

impl Default for KenBurnsMode {
    fn default() -> Self {
        Self::Directional {
            start_scale: default_start_scale(),
            end_scale: default_end_scale(),
            window_fraction: default_window_fraction(),
        }
    }
}

impl KenBurnsMode {
    /// Seeded mode with default bounds.
    pub fn seeded() -> Self {
        Self::Seeded {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            pan_distance: default_pan_distance(),
        }
    }

    /// Reject non-finite or inverted parameters.
    pub fn validate(&self) -> ReelResult<()> {
        match *self {
            Self::Directional {
                start_scale,
                end_scale,
                window_fraction,
            } => {
                if !start_scale.is_finite() || start_scale <= 0.0 {
                    return Err(ReelError::invalid_config(
                        "ken_burns start_scale must be finite and > 0",
                    ));
                }
                if !end_scale.is_finite() || end_scale <= 0.0 {
                    return Err(ReelError::invalid_config(
                        "ken_burns end_scale must be finite and > 0",
                    ));
                }
                if !(0.0..=1.0).contains(&window_fraction) {
                    return Err(ReelError::invalid_config(
                        "ken_burns window_fraction must be in [0, 1]",
                    ));
                }
            }
            Self::Seeded {
                min_scale,
                max_scale,
                pan_distance,
            } => {
                if !min_scale.is_finite() || !max_scale.is_finite() || min_scale <= 0.0 {
                    return Err(ReelError::invalid_config(
                        "ken_burns scale bounds must be finite and > 0",
                    ));
                }
                if min_scale > max_scale {
                    return Err(ReelError::invalid_config(
                        "ken_burns min_scale must be <= max_scale",
                    ));
                }
                if !pan_distance.is_finite() || pan_distance < 0.0 {
                    return Err(ReelError::invalid_config(
                        "ken_burns pan_distance must be finite and >= 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// High-frequency shake parameters.
pub struct JitterConfig {
    /// Phase speed multiplier: 0.5 slow, 1 normal, 4 very fast.
    #[serde(default = "default_jitter_speed")]
    pub speed: f64,
    /// Peak shake distance in pixels.
    #[serde(default = "default_jitter_intensity")]
    pub intensity: f64,
}

fn default_jitter_speed() -> f64 {
    4.0
}
fn default_jitter_intensity() -> f64 {
    8.0
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            speed: default_jitter_speed(),
            intensity: default_jitter_intensity(),
        }
    }
}

impl JitterConfig {
    /// Reject non-finite or negative parameters.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.speed.is_finite() || !self.intensity.is_finite() {
            return Err(ReelError::invalid_config("jitter parameters must be finite"));
        }
        if self.intensity < 0.0 {
            return Err(ReelError::invalid_config("jitter intensity must be >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Spin-in transition at the start of every asset.
pub struct SwirlConfig {
    /// Length of the swirl in frames.
    #[serde(default = "default_swirl_frames")]
    pub frames: u64,
    /// Rotation at the first frame, in degrees.
    #[serde(default = "default_swirl_rotation")]
    pub start_rotation_deg: f64,
    /// Scale factor at the first frame.
    #[serde(default = "default_swirl_scale")]
    pub start_scale: f64,
}

fn default_swirl_frames() -> u64 {
    15
}
fn default_swirl_rotation() -> f64 {
    720.0
}
fn default_swirl_scale() -> f64 {
    0.3
}

impl Default for SwirlConfig {
    fn default() -> Self {
        Self {
            frames: default_swirl_frames(),
            start_rotation_deg: default_swirl_rotation(),
            start_scale: default_swirl_scale(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Configuration of the asset-local motion layers.
pub struct MotionConfig {
    /// Pan-and-zoom layer.
    #[serde(default)]
    pub ken_burns: KenBurnsMode,
    /// Optional spin-in; `None` disables it.
    #[serde(default)]
    pub swirl: Option<SwirlConfig>,
}

/// Pan, zoom and (optional) swirl for an asset at `local_frame`.
///
/// Pure: identical arguments always produce bit-identical output.
pub fn motion_at(
    ordinal: u64,
    local_frame: u64,
    duration_frames: u64,
    config: &MotionConfig,
) -> MotionTransform {
    let mut m = ken_burns_at(ordinal, local_frame, duration_frames, &config.ken_burns);
    if let Some(swirl) = &config.swirl {
        let (rotation_deg, scale) = swirl_at(local_frame, swirl);
        m.rotation_deg += rotation_deg;
        m.scale *= scale;
    }
    m
}

/// Base pan-and-zoom layer.
pub fn ken_burns_at(
    ordinal: u64,
    local_frame: u64,
    duration_frames: u64,
    mode: &KenBurnsMode,
) -> MotionTransform {
    let x = local_frame as f64;
    match *mode {
        KenBurnsMode::Directional {
            start_scale,
            end_scale,
            window_fraction,
        } => {
            let preset = PanPreset::for_ordinal(ordinal);
            let window = (duration_frames as f64 * window_fraction).floor();
            MotionTransform {
                pan: Vec2::new(
                    interpolate_clamped(x, 0.0, window, preset.start.x, preset.end.x),
                    interpolate_clamped(x, 0.0, window, preset.start.y, preset.end.y),
                ),
                scale: interpolate_clamped(x, 0.0, window, start_scale, end_scale),
                rotation_deg: 0.0,
            }
        }
        KenBurnsMode::Seeded {
            min_scale,
            max_scale,
            pan_distance,
        } => {
            let b = SeededBounds::for_ordinal(ordinal, min_scale, max_scale, pan_distance);
            let window = duration_frames as f64;
            MotionTransform {
                pan: Vec2::new(
                    interpolate_clamped(x, 0.0, window, b.start_pan.x, b.end_pan.x),
                    interpolate_clamped(x, 0.0, window, b.start_pan.y, b.end_pan.y),
                ),
                scale: interpolate_clamped(x, 0.0, window, b.start_scale, b.end_scale),
                rotation_deg: 0.0,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SeededBounds {
    start_scale: f64,
    end_scale: f64,
    start_pan: Vec2,
    end_pan: Vec2,
}

impl SeededBounds {
    fn for_ordinal(ordinal: u64, min_scale: f64, max_scale: f64, dist: f64) -> Self {
        Self {
            start_scale: seeded_range(ordinal, 0.1, min_scale, max_scale),
            end_scale: seeded_range(ordinal, 0.2, min_scale, max_scale),
            start_pan: Vec2::new(
                seeded_range(ordinal, 0.3, -dist, dist),
                seeded_range(ordinal, 0.4, -dist, dist),
            ),
            end_pan: Vec2::new(
                seeded_range(ordinal, 0.5, -dist, dist),
                seeded_range(ordinal, 0.6, -dist, dist),
            ),
        }
    }
}

/// Shake offset for `global_frame`.
///
/// Keyed on the global frame so consecutive assets never replay the same
/// pattern; the ordinal offsets the phase per asset.
pub fn jitter_at(global_frame: u64, ordinal: u64, config: &JitterConfig) -> Vec2 {
    let f = global_frame as f64;
    let o = ordinal as f64;
    let seed_x = (f + o * 1000.0) * config.speed;
    let seed_y = (f + o * 1500.0 + 500.0) * config.speed;
    Vec2::new(
        three_wave(seed_x, [0.3, 0.7, 1.3]) * config.intensity,
        three_wave(seed_y, [0.35, 0.8, 1.1]) * config.intensity,
    )
}

fn three_wave(seed: f64, freqs: [f64; 3]) -> f64 {
    const WEIGHTS: [f64; 3] = [0.7, 0.2, 0.1];
    freqs
        .iter()
        .zip(WEIGHTS)
        .map(|(k, w)| (seed * k).sin() * w)
        .sum()
}

/// Swirl rotation (degrees) and scale factor at `local_frame`.
///
/// Identity once `local_frame >= config.frames`.
pub fn swirl_at(local_frame: u64, config: &SwirlConfig) -> (f64, f64) {
    if local_frame >= config.frames {
        return (0.0, 1.0);
    }
    let t = local_frame as f64 / config.frames as f64;
    (
        lerp(config.start_rotation_deg, 0.0, t),
        lerp(config.start_scale, 1.0, t),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/motion/generator.rs"]
mod tests;
