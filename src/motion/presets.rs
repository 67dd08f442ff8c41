use crate::foundation::core::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Direction the image drifts in from before settling at the centre.
pub enum PanDirection {
    /// Starts below, drifts up.
    Bottom,
    /// Starts above, drifts down.
    Top,
    /// Starts left, drifts right.
    Left,
    /// Starts right, drifts left.
    Right,
    /// Starts bottom-left.
    BottomLeft,
    /// Starts bottom-right.
    BottomRight,
    /// Starts top-left.
    TopLeft,
    /// Starts top-right.
    TopRight,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Start/end pan offsets (pixels) for one direction.
pub struct PanPreset {
    /// Direction this preset encodes.
    pub direction: PanDirection,
    /// Pan offset at the first frame.
    pub start: Vec2,
    /// Pan offset once the pan window has elapsed.
    pub end: Vec2,
}

const fn preset(direction: PanDirection, x: f64, y: f64) -> PanPreset {
    PanPreset {
        direction,
        start: Vec2::new(x, y),
        end: Vec2::new(0.0, 0.0),
    }
}

/// The eight directional presets, cycled by asset ordinal.
pub const PAN_PRESETS: [PanPreset; 8] = [
    preset(PanDirection::Bottom, 0.0, 45.0),
    preset(PanDirection::Top, 0.0, -45.0),
    preset(PanDirection::Left, -50.0, 0.0),
    preset(PanDirection::Right, 50.0, 0.0),
    preset(PanDirection::BottomLeft, -40.0, 40.0),
    preset(PanDirection::BottomRight, 40.0, 40.0),
    preset(PanDirection::TopLeft, -40.0, -40.0),
    preset(PanDirection::TopRight, 40.0, -40.0),
];

impl PanPreset {
    /// Preset for an asset ordinal (`ordinal % 8`).
    pub fn for_ordinal(ordinal: u64) -> &'static PanPreset {
        &PAN_PRESETS[(ordinal % PAN_PRESETS.len() as u64) as usize]
    }
}
