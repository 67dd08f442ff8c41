/// Convenience result type used across slidereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided content (assets, durations, caption tokens).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid engine configuration (fps, effect parameters, merge window).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Errors while resolving timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ReelError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

impl From<std::io::Error> for ReelError {
    fn from(e: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
