use crate::foundation::core::FrameRange;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "AssetRepr")]
/// An image shown for one contiguous stretch of the video.
///
/// The asset's ordinal is its position in the input list; it is never stored
/// here so reordering the list is the only way to change it. In JSON an asset
/// is either a bare path string or `{source, background}`.
pub struct Asset {
    /// Path or URI of the image, opaque to the engine.
    pub source: String,
    /// Optional background plate when the image was split into layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Asset {
    /// Single-layer asset.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            background: None,
        }
    }

    /// Foreground/background pair.
    pub fn layered(foreground: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            source: foreground.into(),
            background: Some(background.into()),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum AssetRepr {
    Path(String),
    Full {
        source: String,
        #[serde(default)]
        background: Option<String>,
    },
}

impl From<AssetRepr> for Asset {
    fn from(r: AssetRepr) -> Self {
        match r {
            AssetRepr::Path(source) => Self::new(source),
            AssetRepr::Full { source, background } => Self { source, background },
        }
    }
}

impl From<&str> for Asset {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Frames assigned to one asset.
pub struct AssetSegment {
    /// Position of the asset in the input list.
    pub ordinal: u64,
    /// Frames the asset is displayed on. Never empty.
    pub range: FrameRange,
}
