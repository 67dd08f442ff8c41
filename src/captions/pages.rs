use crate::{
    captions::token::CaptionToken,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

/// Default grouping window: one word per page for typical speech.
pub const DEFAULT_MERGE_WINDOW_MS: u64 = 200;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Consecutive tokens shown together as one on-screen unit.
pub struct CaptionPage {
    /// Tokens in chronological order (never empty).
    pub tokens: Vec<CaptionToken>,
    /// Start time of the first token.
    pub start_ms: f64,
}

impl CaptionPage {
    fn from_token(token: &CaptionToken) -> Self {
        Self {
            start_ms: token.start_ms,
            tokens: vec![token.clone()],
        }
    }

    fn latest_start_ms(&self) -> f64 {
        self.tokens.last().map_or(self.start_ms, |t| t.start_ms)
    }

    /// Concatenated token text with surrounding whitespace removed.
    pub fn text(&self) -> String {
        let joined: String = self.tokens.iter().map(|t| t.text.as_str()).collect();
        joined.trim().to_string()
    }
}

/// Group tokens into display pages.
///
/// A new page starts whenever a token begins more than `merge_window_ms` after
/// the start of the previous token on the current page.
pub fn build_pages(tokens: &[CaptionToken], merge_window_ms: u64) -> Vec<CaptionPage> {
    let window = merge_window_ms as f64;
    let mut pages: Vec<CaptionPage> = Vec::new();
    for token in tokens {
        match pages.last_mut() {
            Some(page) if token.start_ms - page.latest_start_ms() <= window => {
                page.tokens.push(token.clone());
            }
            _ => pages.push(CaptionPage::from_token(token)),
        }
    }
    pages
}

/// Frame range `(start, end_exclusive)` of page `index`.
///
/// `start` is the page start rounded to the nearest frame; `end` is the next
/// page's start frame, or `total_frames` for the last page, and never exceeds
/// `total_frames`. The range may be empty or inverted; such pages are never
/// displayed.
pub fn frame_range_for(
    pages: &[CaptionPage],
    index: usize,
    fps: Fps,
    total_frames: u64,
) -> ReelResult<(i64, i64)> {
    let page = pages.get(index).ok_or_else(|| {
        ReelError::evaluation(format!(
            "caption page index {index} out of bounds ({} pages)",
            pages.len()
        ))
    })?;
    let total = i64::try_from(total_frames)
        .map_err(|_| ReelError::invalid_input("total_frames exceeds i64 range"))?;
    let start = fps.ms_to_frame_round(page.start_ms);
    let end = match pages.get(index + 1) {
        Some(next) => fps.ms_to_frame_round(next.start_ms).min(total),
        None => total,
    };
    Ok((start, end))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A caption page paired with the frames it is displayed on.
pub struct CaptionCue {
    /// Index of the page in the page list.
    pub page_index: usize,
    /// Display text.
    pub text: String,
    /// Frames the cue is visible on.
    pub range: FrameRange,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// All displayable caption cues, ordered and non-overlapping.
pub struct CaptionTrack {
    /// Pages as grouped from the token stream, including dropped ones.
    pub pages: Vec<CaptionPage>,
    /// Cues with non-empty frame ranges.
    pub cues: Vec<CaptionCue>,
}

impl CaptionTrack {
    /// Resolve every page's frame range once, keeping the non-empty ones.
    #[tracing::instrument(skip(pages), fields(pages = pages.len()))]
    pub fn build(pages: Vec<CaptionPage>, fps: Fps, total_frames: u64) -> ReelResult<Self> {
        let mut cues = Vec::with_capacity(pages.len());
        let mut floor = 0i64;
        for index in 0..pages.len() {
            let (start, end) = frame_range_for(&pages, index, fps, total_frames)?;
            // Out-of-order starts must not overlap an earlier cue.
            let start = start.max(floor);
            if end <= start {
                tracing::debug!(index, start, end, "dropping caption page with empty range");
                continue;
            }
            floor = end;
            cues.push(CaptionCue {
                page_index: index,
                text: pages[index].text(),
                range: FrameRange::new(FrameIndex(start as u64), FrameIndex(end as u64))?,
            });
        }
        Ok(Self { pages, cues })
    }

    /// Group `tokens` and resolve their cues in one step.
    pub fn from_tokens(
        tokens: &[CaptionToken],
        merge_window_ms: u64,
        fps: Fps,
        total_frames: u64,
    ) -> ReelResult<Self> {
        for t in tokens {
            t.validate()?;
        }
        Self::build(build_pages(tokens, merge_window_ms), fps, total_frames)
    }

    /// The cue visible on `frame`, if any.
    pub fn active_at(&self, frame: FrameIndex) -> Option<&CaptionCue> {
        let idx = self.cues.partition_point(|c| c.range.end.0 <= frame.0);
        self.cues.get(idx).filter(|c| c.range.contains(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captions/pages.rs"]
mod tests;
