use std::path::{Path, PathBuf};

use crate::{
    captions::pages::DEFAULT_MERGE_WINDOW_MS,
    captions::token::{CaptionToken, load_tokens},
    effects::fx::{EffectInstance, default_effects},
    effects::pipeline::EffectPipeline,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    plan::frames::{PlanThreading, plan_frames},
    plan::manifest::{AudioRole, AudioTrack, RenderManifest},
    timeline::model::Asset,
    timeline::resolver::{Timeline, total_frames_for},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Music bed mixed under the narration.
pub struct BackgroundMusic {
    /// Path or URI of the music file.
    pub path: String,
    /// Linear gain in `[0, 1]`.
    #[serde(default = "default_music_volume")]
    pub volume: f64,
}

fn default_music_volume() -> f64 {
    0.15
}

fn default_fps() -> f64 {
    30.0
}

fn default_merge_window_ms() -> u64 {
    DEFAULT_MERGE_WINDOW_MS
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A slideshow project as stored on disk.
///
/// A project is a pure data model; [`Project::timeline`] and
/// [`Project::plan`] turn it into frames. Relative paths are kept as written
/// and interpreted by the renderer.
pub struct Project {
    /// Images in display order.
    pub assets: Vec<Asset>,
    /// Narration audio; captions are aligned to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Optional music bed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music: Option<BackgroundMusic>,
    /// Video length in seconds (normally the narration length).
    pub duration_secs: f64,
    /// Frame rate; checked by [`Project::validate`].
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Output size.
    #[serde(default)]
    pub canvas: Canvas,
    /// Inline caption tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<CaptionToken>,
    /// Caption token file, relative to the project file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions_path: Option<PathBuf>,
    /// Caption grouping window.
    #[serde(default = "default_merge_window_ms")]
    pub merge_window_ms: u64,
    /// Effect stages in application order.
    #[serde(default = "default_effects")]
    pub effects: Vec<EffectInstance>,
}

impl Project {
    /// Project with default settings and no captions.
    pub fn new(assets: Vec<Asset>, duration_secs: f64) -> Self {
        Self {
            assets,
            audio: None,
            background_music: None,
            duration_secs,
            fps: default_fps(),
            canvas: Canvas::default(),
            captions: Vec::new(),
            captions_path: None,
            merge_window_ms: DEFAULT_MERGE_WINDOW_MS,
            effects: default_effects(),
        }
    }

    /// Parse and validate a project from JSON text.
    ///
    /// `captions_path` is not followed; use [`Project::from_path`] for that.
    pub fn from_json(json: &str) -> ReelResult<Self> {
        let project: Self = serde_json::from_str(json)?;
        project.validate()?;
        Ok(project)
    }

    /// Read a project file, loading `captions_path` relative to it.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReelError::Other(
                anyhow::Error::new(e).context(format!("read project '{}'", path.display())),
            )
        })?;
        let mut project: Self = serde_json::from_str(&json)?;
        if let Some(rel) = &project.captions_path {
            if !project.captions.is_empty() {
                return Err(ReelError::invalid_input(
                    "project sets both inline captions and captions_path",
                ));
            }
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            project.captions = load_tokens(&base.join(rel))?;
        }
        project.validate()?;
        Ok(project)
    }

    /// Check everything that can be checked without building the timeline.
    pub fn validate(&self) -> ReelResult<()> {
        if self.assets.is_empty() {
            return Err(ReelError::invalid_input("project has no assets"));
        }
        total_frames_for(self.duration_secs, self.fps()?)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::invalid_config("canvas width/height must be > 0"));
        }
        if let Some(music) = &self.background_music
            && !(0.0..=1.0).contains(&music.volume)
        {
            return Err(ReelError::invalid_config(
                "background_music.volume must be in [0, 1]",
            ));
        }
        for token in &self.captions {
            token.validate()?;
        }
        Ok(())
    }

    /// Validated frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.fps)
    }

    /// Build the immutable timeline.
    pub fn timeline(&self) -> ReelResult<Timeline> {
        Timeline::from_duration_secs(
            self.assets.clone(),
            self.duration_secs,
            self.fps()?,
            &self.captions,
            self.merge_window_ms,
        )
    }

    /// Build the effect pipeline.
    pub fn pipeline(&self) -> ReelResult<EffectPipeline> {
        EffectPipeline::from_instances(&self.effects)
    }

    /// Audio tracks in mix order.
    pub fn audio_tracks(&self) -> Vec<AudioTrack> {
        let mut tracks = Vec::new();
        if let Some(path) = &self.audio {
            tracks.push(AudioTrack {
                path: path.clone(),
                role: AudioRole::Narration,
                volume: 1.0,
            });
        }
        if let Some(music) = &self.background_music {
            tracks.push(AudioTrack {
                path: music.path.clone(),
                role: AudioRole::BackgroundMusic,
                volume: music.volume,
            });
        }
        tracks
    }

    /// Plan every frame and bundle the result for the renderer.
    #[tracing::instrument(skip(self), fields(assets = self.assets.len()))]
    pub fn plan(&self, threading: &PlanThreading) -> ReelResult<RenderManifest> {
        self.validate()?;
        let timeline = self.timeline()?;
        let pipeline = self.pipeline()?;
        let range = FrameRange::new(FrameIndex(0), FrameIndex(timeline.total_frames()))?;
        let (frames, stats) = plan_frames(&timeline, &pipeline, range, threading)?;
        tracing::info!(
            total_frames = timeline.total_frames(),
            fps = timeline.fps().as_f64(),
            cues = timeline.captions().cues.len(),
            "project planned"
        );
        Ok(RenderManifest {
            fps: timeline.fps(),
            canvas: self.canvas,
            total_frames: timeline.total_frames(),
            audio: self.audio_tracks(),
            assets: self.assets.clone(),
            cues: timeline.captions().cues.clone(),
            frames,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
