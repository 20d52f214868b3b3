/// Convenience result type used across cliprig.
pub type CliprigResult<T> = Result<T, CliprigError>;

/// Top-level error taxonomy for boundary operations (loading, validation).
///
/// Interactive edits and sampling never fail; only data crossing into the
/// model from outside is checked.
#[derive(thiserror::Error, Debug)]
pub enum CliprigError {
    /// Invalid user-provided timeline, clip or settings data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Keyframe list violates ordering or identity invariants.
    #[error("keyframe error: {0}")]
    Keyframe(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliprigError {
    /// Build a [`CliprigError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CliprigError::Keyframe`] value.
    pub fn keyframe(msg: impl Into<String>) -> Self {
        Self::Keyframe(msg.into())
    }

    /// Build a [`CliprigError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CliprigError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
