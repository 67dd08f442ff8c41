//! Slidereel is a deterministic timeline engine for narrated image slideshows.
//!
//! Given an ordered list of images, a target duration and word-level caption
//! timestamps, it decides which image is on screen for every frame, how that
//! image moves, and which caption is visible. Pixels, audio decoding and video
//! encoding belong to the renderer that consumes the [`RenderManifest`].
//!
//! # Pipeline overview
//!
//! 1. **Allocate**: `asset count + total frames -> frames per asset` ([`allocate`])
//! 2. **Group captions**: `tokens -> pages -> cues` ([`build_pages`], [`CaptionTrack`])
//! 3. **Resolve**: `Timeline + FrameIndex -> ResolvedPosition` ([`Timeline::resolve`])
//! 4. **Move**: `ResolvedPosition -> FrameContext` through the [`EffectPipeline`]
//! 5. **Plan**: every frame into a [`FramePlan`], serially or on a rayon pool
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure per-frame functions**: any frame can be computed in isolation and in
//!   any order; the same inputs always give bit-identical output.
//! - **No IO in the core**: only [`Project::from_path`], [`load_tokens`] and the
//!   discovery helpers touch the filesystem.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod captions;
mod effects;
mod foundation;
mod motion;
mod plan;
mod project;
mod timeline;

pub use captions::pages::{
    CaptionCue, CaptionPage, CaptionTrack, DEFAULT_MERGE_WINDOW_MS, build_pages, frame_range_for,
};
pub use captions::token::{CaptionToken, load_tokens, parse_tokens_json};
pub use effects::fx::{Effect, EffectInstance, default_effects, parse_effect};
pub use effects::pipeline::{EffectPipeline, EffectStage, FrameContext, NoiseFrame, stage_for};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::math::{
    SEED_SCALE, interpolate_clamped, lerp, mix64, seeded_range, seeded_unit,
};
pub use motion::generator::{
    JitterConfig, KenBurnsMode, MotionConfig, MotionTransform, SwirlConfig, jitter_at,
    ken_burns_at, motion_at, swirl_at,
};
pub use motion::presets::{PAN_PRESETS, PanDirection, PanPreset};
pub use plan::frames::{FramePlan, PlanStats, PlanThreading, plan_frame, plan_frames};
pub use plan::manifest::{AudioRole, AudioTrack, RenderManifest};
pub use project::discover::{discover_background_music, discover_images, discover_narration};
pub use project::model::{BackgroundMusic, Project};
pub use timeline::alloc::allocate;
pub use timeline::model::{Asset, AssetSegment};
pub use timeline::resolver::{ResolvedPosition, Timeline, total_frames_for};
