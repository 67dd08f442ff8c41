use crate::{
    captions::pages::CaptionCue,
    foundation::core::{Canvas, Fps},
    plan::frames::{FramePlan, PlanStats},
    timeline::model::Asset,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How an audio file is used in the mix.
pub enum AudioRole {
    /// Voice-over the captions are aligned to.
    Narration,
    /// Looped music under the narration.
    BackgroundMusic,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Audio file passed through to the renderer untouched.
pub struct AudioTrack {
    /// Path or URI of the audio file.
    pub path: String,
    /// Role in the mix.
    pub role: AudioRole,
    /// Linear gain in `[0, 1]`.
    pub volume: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Complete hand-off document for the rendering collaborator.
pub struct RenderManifest {
    /// Frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Number of frames in the video.
    pub total_frames: u64,
    /// Audio tracks to mix.
    pub audio: Vec<AudioTrack>,
    /// Input assets in ordinal order.
    pub assets: Vec<Asset>,
    /// Caption cues with their frame ranges.
    pub cues: Vec<CaptionCue>,
    /// Per-frame plans in frame order.
    pub frames: Vec<FramePlan>,
    /// Planning counters.
    pub stats: PlanStats,
}
