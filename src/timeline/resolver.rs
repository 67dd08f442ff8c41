use crate::{
    captions::pages::{CaptionCue, CaptionTrack, DEFAULT_MERGE_WINDOW_MS},
    captions::token::CaptionToken,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::alloc::allocate,
    timeline::model::{Asset, AssetSegment},
};

#[derive(Clone, Debug, serde::Serialize)]
/// Resolved composition: which asset and which caption cover every frame.
///
/// Built once from validated inputs and immutable afterwards, so it can be
/// shared across threads and queried for frames in any order.
pub struct Timeline {
    fps: Fps,
    total_frames: u64,
    assets: Vec<Asset>,
    allocation: Vec<u64>,
    segments: Vec<AssetSegment>,
    captions: CaptionTrack,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Result of looking up one frame on a [`Timeline`].
pub struct ResolvedPosition<'a> {
    /// Frame that was resolved.
    pub frame: FrameIndex,
    /// Ordinal of the visible asset.
    pub asset_ordinal: u64,
    /// The visible asset.
    pub asset: &'a Asset,
    /// Offset of `frame` inside the asset's display range.
    pub local_frame: u64,
    /// Number of frames the asset is displayed for.
    pub asset_frames: u64,
    /// `true` when this asset is the last one displayed.
    pub is_last_asset: bool,
    /// Caption visible on this frame, if any.
    pub caption: Option<&'a CaptionCue>,
}

impl Timeline {
    /// Build a timeline spanning exactly `total_frames`.
    ///
    /// Assets that receive 0 frames (only possible when `total_frames` is
    /// smaller than the asset count) are skipped; the remaining assets keep
    /// their input ordinals.
    #[tracing::instrument(skip(assets, tokens), fields(assets = assets.len(), tokens = tokens.len()))]
    pub fn new(
        assets: Vec<Asset>,
        total_frames: u64,
        fps: Fps,
        tokens: &[CaptionToken],
        merge_window_ms: u64,
    ) -> ReelResult<Self> {
        if assets.is_empty() {
            return Err(ReelError::invalid_input("timeline needs at least one asset"));
        }
        if total_frames == 0 {
            return Err(ReelError::invalid_input("timeline needs at least one frame"));
        }

        let allocation = allocate(assets.len(), total_frames)?;
        let mut segments = Vec::with_capacity(assets.len());
        let mut cursor = 0u64;
        for (ordinal, &frames) in allocation.iter().enumerate() {
            if frames == 0 {
                continue;
            }
            let range = FrameRange::new(FrameIndex(cursor), FrameIndex(cursor + frames))?;
            segments.push(AssetSegment {
                ordinal: ordinal as u64,
                range,
            });
            cursor += frames;
        }
        let skipped = assets.len() - segments.len();
        if skipped > 0 {
            tracing::warn!(
                skipped,
                total_frames,
                "fewer frames than assets; trailing assets are not displayed"
            );
        }

        let captions = CaptionTrack::from_tokens(tokens, merge_window_ms, fps, total_frames)?;
        tracing::debug!(
            segments = segments.len(),
            cues = captions.cues.len(),
            "timeline built"
        );

        Ok(Self {
            fps,
            total_frames,
            assets,
            allocation,
            segments,
            captions,
        })
    }

    /// Build a timeline covering `duration_secs`, rounded up to whole frames.
    pub fn from_duration_secs(
        assets: Vec<Asset>,
        duration_secs: f64,
        fps: Fps,
        tokens: &[CaptionToken],
        merge_window_ms: u64,
    ) -> ReelResult<Self> {
        let total_frames = total_frames_for(duration_secs, fps)?;
        Self::new(assets, total_frames, fps, tokens, merge_window_ms)
    }

    /// Timeline without captions, using the default merge window.
    pub fn without_captions(assets: Vec<Asset>, total_frames: u64, fps: Fps) -> ReelResult<Self> {
        Self::new(assets, total_frames, fps, &[], DEFAULT_MERGE_WINDOW_MS)
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total number of frames.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Input assets, indexed by ordinal.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Frame count per asset ordinal (may contain zeros).
    pub fn allocation(&self) -> &[u64] {
        &self.allocation
    }

    /// Displayed assets in order.
    pub fn segments(&self) -> &[AssetSegment] {
        &self.segments
    }

    /// Caption pages and cues.
    pub fn captions(&self) -> &CaptionTrack {
        &self.captions
    }

    /// Look up the asset and caption visible on `frame`.
    pub fn resolve(&self, frame: FrameIndex) -> ReelResult<ResolvedPosition<'_>> {
        if frame.0 >= self.total_frames {
            return Err(ReelError::evaluation(format!(
                "frame {} is out of bounds (total {})",
                frame.0, self.total_frames
            )));
        }
        let idx = self.segments.partition_point(|s| s.range.end.0 <= frame.0);
        let segment = self
            .segments
            .get(idx)
            .ok_or_else(|| ReelError::evaluation("no asset segment covers frame"))?;
        Ok(ResolvedPosition {
            frame,
            asset_ordinal: segment.ordinal,
            asset: &self.assets[segment.ordinal as usize],
            local_frame: frame.0 - segment.range.start.0,
            asset_frames: segment.range.len_frames(),
            is_last_asset: idx + 1 == self.segments.len(),
            caption: self.captions.active_at(frame),
        })
    }
}

/// Frames needed to cover `duration_secs` at `fps` (rounded up, at least 1).
pub fn total_frames_for(duration_secs: f64, fps: Fps) -> ReelResult<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ReelError::invalid_input(format!(
            "duration must be finite and > 0 seconds, got {duration_secs}"
        )));
    }
    Ok(fps.secs_to_frames_ceil(duration_secs).max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolver.rs"]
mod tests;
