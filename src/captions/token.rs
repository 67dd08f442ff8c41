use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One timed word (or word fragment) from the transcription.
///
/// Matches the caption JSON emitted by the transcription step: an array of
/// `{text, startMs, endMs, timestampMs, confidence}` objects. `timestampMs` is
/// accepted and ignored.
pub struct CaptionToken {
    /// Display text, usually with a leading space.
    pub text: String,
    /// Start time in milliseconds.
    pub start_ms: f64,
    /// End time in milliseconds.
    pub end_ms: f64,
    /// Recognizer confidence, when reported.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl CaptionToken {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, start_ms: f64, end_ms: f64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
            confidence: None,
        }
    }

    /// Check timestamps are finite, non-negative and ordered.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.start_ms.is_finite() || self.start_ms < 0.0 {
            return Err(ReelError::invalid_input(format!(
                "caption token '{}' startMs must be finite and >= 0",
                self.text
            )));
        }
        if !self.end_ms.is_finite() || self.end_ms < self.start_ms {
            return Err(ReelError::invalid_input(format!(
                "caption token '{}' endMs must be finite and >= startMs",
                self.text
            )));
        }
        if let Some(c) = self.confidence
            && !c.is_finite()
        {
            return Err(ReelError::invalid_input(format!(
                "caption token '{}' confidence must be finite",
                self.text
            )));
        }
        Ok(())
    }
}

/// Parse and validate a caption token array from JSON text.
pub fn parse_tokens_json(json: &str) -> ReelResult<Vec<CaptionToken>> {
    let tokens: Vec<CaptionToken> = serde_json::from_str(json)?;
    for t in &tokens {
        t.validate()?;
    }
    Ok(tokens)
}

/// Read and validate a caption token file.
pub fn load_tokens(path: &Path) -> ReelResult<Vec<CaptionToken>> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ReelError::Other(anyhow::Error::new(e).context(format!(
            "read caption tokens '{}'",
            path.display()
        )))
    })?;
    let tokens = parse_tokens_json(&json)?;
    tracing::debug!(count = tokens.len(), path = %path.display(), "loaded caption tokens");
    Ok(tokens)
}

#[cfg(test)]
#[path = "../../tests/unit/captions/token.rs"]
mod tests;
