use crate::{
    effects::fx::{Effect, EffectInstance, parse_effect},
    foundation::core::FrameIndex,
    foundation::error::ReelResult,
    foundation::math::{interpolate_clamped, mix64},
    motion::generator::{
        JitterConfig, KenBurnsMode, MotionTransform, SwirlConfig, jitter_at, ken_burns_at,
        swirl_at,
    },
    timeline::resolver::ResolvedPosition,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// TV-static overlay parameters for one frame.
pub struct NoiseFrame {
    /// Seed for the noise pattern; differs on every frame.
    pub seed: u64,
    /// Overlay opacity.
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Value threaded through the effect stages for one frame.
pub struct FrameContext {
    /// Global frame index.
    pub frame: FrameIndex,
    /// Ordinal of the visible asset.
    pub asset_ordinal: u64,
    /// Offset inside the asset's display range.
    pub local_frame: u64,
    /// Frames the asset is displayed for.
    pub asset_frames: u64,
    /// Whether this is the last displayed asset.
    pub is_last_asset: bool,
    /// Whether the asset carries a background plate.
    pub has_background: bool,
    /// Foreground transform.
    pub transform: MotionTransform,
    /// Background plate transform, set by layer stages.
    pub background_transform: Option<MotionTransform>,
    /// Foreground opacity in `[0, 1]`.
    pub opacity: f64,
    /// Noise overlay, if any stage requested one.
    pub noise: Option<NoiseFrame>,
}

impl FrameContext {
    /// Identity context for a resolved timeline position.
    pub fn from_position(pos: &ResolvedPosition<'_>) -> Self {
        Self {
            frame: pos.frame,
            asset_ordinal: pos.asset_ordinal,
            local_frame: pos.local_frame,
            asset_frames: pos.asset_frames,
            is_last_asset: pos.is_last_asset,
            has_background: pos.asset.background.is_some(),
            transform: MotionTransform::default(),
            background_transform: None,
            opacity: 1.0,
            noise: None,
        }
    }
}

/// One pure transform step over a [`FrameContext`].
pub trait EffectStage: Send + Sync + std::fmt::Debug {
    /// Stable stage name for logs.
    fn name(&self) -> &'static str;
    /// Produce the next context. Must not depend on anything but `ctx`.
    fn apply(&self, ctx: FrameContext) -> FrameContext;
}

#[derive(Clone, Copy, Debug)]
struct KenBurnsStage(KenBurnsMode);

impl EffectStage for KenBurnsStage {
    fn name(&self) -> &'static str {
        "ken_burns"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        let m = ken_burns_at(ctx.asset_ordinal, ctx.local_frame, ctx.asset_frames, &self.0);
        ctx.transform.pan += m.pan;
        ctx.transform.scale *= m.scale;
        ctx
    }
}

#[derive(Clone, Copy, Debug)]
struct JitterStage(JitterConfig);

impl EffectStage for JitterStage {
    fn name(&self) -> &'static str {
        "jitter"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        ctx.transform.pan += jitter_at(ctx.frame.0, ctx.asset_ordinal, &self.0);
        ctx
    }
}

#[derive(Clone, Copy, Debug)]
struct SwirlStage(SwirlConfig);

impl EffectStage for SwirlStage {
    fn name(&self) -> &'static str {
        "swirl"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        let (rotation_deg, scale) = swirl_at(ctx.local_frame, &self.0);
        ctx.transform.rotation_deg += rotation_deg;
        ctx.transform.scale *= scale;
        ctx
    }
}

#[derive(Clone, Copy, Debug)]
struct LayerParallaxStage {
    depth: f64,
}

impl EffectStage for LayerParallaxStage {
    fn name(&self) -> &'static str {
        "layer_parallax"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        if ctx.has_background {
            ctx.background_transform = Some(MotionTransform {
                pan: ctx.transform.pan * self.depth,
                ..ctx.transform
            });
        }
        ctx
    }
}

#[derive(Clone, Copy, Debug)]
struct FadeOutStage {
    frames: u64,
}

impl EffectStage for FadeOutStage {
    fn name(&self) -> &'static str {
        "fade_out"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        if ctx.is_last_asset || self.frames == 0 {
            return ctx;
        }
        let end = ctx.asset_frames as f64;
        let start = ctx.asset_frames.saturating_sub(self.frames) as f64;
        // Fade reaches 0 one frame after the asset ends, so the final frame is
        // still partly visible.
        ctx.opacity *= interpolate_clamped(ctx.local_frame as f64, start, end, 1.0, 0.0);
        ctx
    }
}

#[derive(Clone, Copy, Debug)]
struct NoiseOverlayStage {
    opacity: f64,
}

impl EffectStage for NoiseOverlayStage {
    fn name(&self) -> &'static str {
        "noise_overlay"
    }

    fn apply(&self, mut ctx: FrameContext) -> FrameContext {
        ctx.noise = Some(NoiseFrame {
            seed: mix64(ctx.frame.0),
            opacity: self.opacity,
        });
        ctx
    }
}

/// Build the stage implementing `effect`.
pub fn stage_for(effect: &Effect) -> Box<dyn EffectStage> {
    match *effect {
        Effect::KenBurns(mode) => Box::new(KenBurnsStage(mode)),
        Effect::Jitter(cfg) => Box::new(JitterStage(cfg)),
        Effect::Swirl(cfg) => Box::new(SwirlStage(cfg)),
        Effect::LayerParallax { depth } => Box::new(LayerParallaxStage { depth }),
        Effect::FadeOut { frames } => Box::new(FadeOutStage { frames }),
        Effect::NoiseOverlay { opacity } => Box::new(NoiseOverlayStage { opacity }),
    }
}

#[derive(Debug, Default)]
/// Ordered list of stages applied to every frame.
pub struct EffectPipeline {
    stages: Vec<Box<dyn EffectStage>>,
}

impl EffectPipeline {
    /// Build from typed effects, in order.
    pub fn from_effects(effects: &[Effect]) -> Self {
        Self {
            stages: effects.iter().map(stage_for).collect(),
        }
    }

    /// Parse, validate and build from project entries.
    pub fn from_instances(instances: &[EffectInstance]) -> ReelResult<Self> {
        let effects = instances
            .iter()
            .map(parse_effect)
            .collect::<ReelResult<Vec<_>>>()?;
        let pipeline = Self::from_effects(&effects);
        tracing::debug!(stages = ?pipeline.stage_names(), "effect pipeline ready");
        Ok(pipeline)
    }

    /// Stage names in application order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `ctx`.
    pub fn apply(&self, ctx: FrameContext) -> FrameContext {
        self.stages.iter().fold(ctx, |ctx, stage| stage.apply(ctx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
