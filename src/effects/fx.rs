use crate::{
    foundation::error::{ReelError, ReelResult},
    motion::generator::{JitterConfig, KenBurnsMode, SwirlConfig},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Untyped effect entry as written in a project file.
pub struct EffectInstance {
    /// Effect kind, e.g. `ken_burns` or `jitter`.
    pub kind: String,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl EffectInstance {
    /// Entry with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: serde_json::Value::Null,
        }
    }

    /// Entry with parameters.
    pub fn with_params(kind: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Validated, typed effect.
pub enum Effect {
    /// Base pan-and-zoom.
    KenBurns(KenBurnsMode),
    /// Global-frame shake.
    Jitter(JitterConfig),
    /// Spin-in at the start of every asset.
    Swirl(SwirlConfig),
    /// Background plate follows the foreground pan scaled by `depth`.
    LayerParallax {
        /// Fraction of the foreground pan applied to the background.
        depth: f64,
    },
    /// Fade to transparent over the last `frames` of every asset but the last.
    FadeOut {
        /// Fade length in frames.
        frames: u64,
    },
    /// Per-frame TV-static overlay.
    NoiseOverlay {
        /// Overlay opacity in `[0, 1]`.
        opacity: f64,
    },
}

/// The pipeline used when a project does not list any effects.
pub fn default_effects() -> Vec<EffectInstance> {
    vec![EffectInstance::new("ken_burns"), EffectInstance::new("jitter")]
}

/// Parse and validate one effect entry.
pub fn parse_effect(inst: &EffectInstance) -> ReelResult<Effect> {
    let kind = inst.kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ReelError::invalid_config("effect kind must be non-empty"));
    }

    match kind.as_str() {
        "kenburns" | "ken_burns" | "ken-burns" => {
            let mode: KenBurnsMode = params_or_default(&inst.params, &kind)?;
            mode.validate()?;
            Ok(Effect::KenBurns(mode))
        }
        "jitter" | "shake" => {
            let cfg: JitterConfig = params_or_default(&inst.params, &kind)?;
            cfg.validate()?;
            Ok(Effect::Jitter(cfg))
        }
        "swirl" => {
            let cfg: SwirlConfig = params_or_default(&inst.params, &kind)?;
            if !cfg.start_rotation_deg.is_finite()
                || !cfg.start_scale.is_finite()
                || cfg.start_scale < 0.0
            {
                return Err(ReelError::invalid_config(
                    "swirl start_rotation_deg/start_scale must be finite, start_scale >= 0",
                ));
            }
            Ok(Effect::Swirl(cfg))
        }
        "layerparallax" | "layer_parallax" | "layer-parallax" => {
            let depth = get_f64_or(&inst.params, "depth", 0.5)?;
            if !depth.is_finite() {
                return Err(ReelError::invalid_config(
                    "layer_parallax.depth must be finite",
                ));
            }
            Ok(Effect::LayerParallax { depth })
        }
        "fadeout" | "fade_out" | "fade-out" => {
            let frames = get_u64(&inst.params, "frames")?;
            Ok(Effect::FadeOut { frames })
        }
        "noiseoverlay" | "noise_overlay" | "noise-overlay" => {
            let opacity = get_f64_or(&inst.params, "opacity", 0.15)?;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ReelError::invalid_config(
                    "noise_overlay.opacity must be in [0, 1]",
                ));
            }
            Ok(Effect::NoiseOverlay { opacity })
        }
        _ => Err(ReelError::invalid_config(format!(
            "unknown effect kind '{kind}'"
        ))),
    }
}

fn params_or_default<T>(params: &serde_json::Value, kind: &str) -> ReelResult<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone())
        .map_err(|e| ReelError::invalid_config(format!("invalid '{kind}' params: {e}")))
}

fn get_u64(obj: &serde_json::Value, key: &str) -> ReelResult<u64> {
    let Some(v) = obj.get(key) else {
        return Err(ReelError::invalid_config(format!(
            "missing effect param '{key}'"
        )));
    };
    v.as_u64().ok_or_else(|| {
        ReelError::invalid_config(format!("effect param '{key}' must be a non-negative integer"))
    })
}

fn get_f64_or(obj: &serde_json::Value, key: &str, default: f64) -> ReelResult<f64> {
    match obj.get(key) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| {
            ReelError::invalid_config(format!("effect param '{key}' must be a number"))
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
