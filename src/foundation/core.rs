use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
/// Zero-based frame index on the output timeline.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame interval `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame in the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::invalid_input("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
/// Frames per second. Always finite and strictly positive.
pub struct Fps(f64);

impl Fps {
    /// Validate and wrap a frame rate.
    pub fn new(fps: f64) -> ReelResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ReelError::invalid_config(format!(
                "fps must be finite and > 0, got {fps}"
            )));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Nearest frame for a millisecond timestamp (half rounds up).
    pub fn ms_to_frame_round(self, ms: f64) -> i64 {
        (ms / 1000.0 * self.0).round() as i64
    }

    /// Frames needed to cover `secs`, rounded up.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.0).ceil().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(30.0)
    }
}

impl TryFrom<f64> for Fps {
    type Error = ReelError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<Fps> for f64 {
    fn from(fps: Fps) -> Self {
        fps.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output canvas dimensions in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        // Vertical short-form video.
        Self {
            width: 1080,
            height: 1920,
        }
    }
}
