use rayon::prelude::*;

use crate::{
    effects::pipeline::{EffectPipeline, FrameContext, NoiseFrame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    motion::generator::MotionTransform,
    timeline::resolver::Timeline,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the compositor needs to draw one frame.
pub struct FramePlan {
    /// Global frame index.
    pub frame: FrameIndex,
    /// Ordinal of the visible asset.
    pub asset_ordinal: u64,
    /// Foreground image reference.
    pub asset: String,
    /// Background plate reference, for layered assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Offset inside the asset's display range.
    pub local_frame: u64,
    /// Foreground transform.
    pub transform: MotionTransform,
    /// Background plate transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_transform: Option<MotionTransform>,
    /// Foreground opacity.
    pub opacity: f64,
    /// Noise overlay for this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseFrame>,
    /// Caption text visible on this frame; `null` when none.
    pub caption: Option<String>,
}

/// Resolve and run the effect pipeline for a single frame.
pub fn plan_frame(
    timeline: &Timeline,
    pipeline: &EffectPipeline,
    frame: FrameIndex,
) -> ReelResult<FramePlan> {
    let pos = timeline.resolve(frame)?;
    let ctx = pipeline.apply(FrameContext::from_position(&pos));
    Ok(FramePlan {
        frame,
        asset_ordinal: pos.asset_ordinal,
        asset: pos.asset.source.clone(),
        background: pos.asset.background.clone(),
        local_frame: pos.local_frame,
        transform: ctx.transform,
        background_transform: ctx.background_transform,
        opacity: ctx.opacity.clamp(0.0, 1.0),
        noise: ctx.noise,
        caption: pos.caption.map(|c| c.text.clone()),
    })
}

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame planning.
pub struct PlanThreading {
    /// Plan frames on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Frames per scheduled batch.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for PlanThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 256,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Aggregated planning counters.
pub struct PlanStats {
    /// Frames planned.
    pub frames_total: u64,
    /// Frames with a caption visible.
    pub frames_captioned: u64,
    /// Batches scheduled.
    pub chunks: u64,
}

/// Plan every frame in `range`, serially or in parallel.
///
/// Both modes return identical plans in frame order.
#[tracing::instrument(skip(timeline, pipeline))]
pub fn plan_frames(
    timeline: &Timeline,
    pipeline: &EffectPipeline,
    range: FrameRange,
    threading: &PlanThreading,
) -> ReelResult<(Vec<FramePlan>, PlanStats)> {
    if range.is_empty() {
        return Err(ReelError::invalid_input("plan range must be non-empty"));
    }
    if range.end.0 > timeline.total_frames() {
        return Err(ReelError::evaluation(format!(
            "plan range end {} exceeds timeline length {}",
            range.end.0,
            timeline.total_frames()
        )));
    }

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut out = Vec::with_capacity(range.len_frames().min(1 << 16) as usize);
    let mut stats = PlanStats::default();

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            out.push(plan_frame(timeline, pipeline, FrameIndex(f))?);
        }
        stats.chunks = range.len_frames().div_ceil(chunk_size);
    } else {
        let pool = build_thread_pool(threading.threads)?;
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let chunk = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|f| plan_frame(timeline, pipeline, FrameIndex(f)))
                    .collect::<ReelResult<Vec<_>>>()
            })?;
            out.extend(chunk);
            stats.chunks += 1;
            chunk_start = chunk_end;
        }
    }

    stats.frames_total = out.len() as u64;
    stats.frames_captioned = out.iter().filter(|p| p.caption.is_some()).count() as u64;
    tracing::debug!(?stats, "planned frames");
    Ok((out, stats))
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::invalid_config(
            "plan threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/frames.rs"]
mod tests;
