//! Error types for path and event model operations

use serde::{Deserialize, Serialize};

/// Failures surfaced by model constructors and mutators.
///
/// Degenerate geometry (zero-width keyframe brackets, zero time deltas, dangling
/// path references) never produces one of these; sampling resolves those to a
/// held position or a zero vector instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ChoreoError {
    /// Constructor received fewer keyframes than a path needs
    #[error("Invalid path: {provided} keyframe(s) supplied, at least {required} required")]
    InvalidPath { provided: usize, required: usize },

    /// Edit would leave a path (or document) in an invalid state
    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// Keyframe index does not exist in the path
    #[error("Keyframe index {index} out of range (path has {len} keyframes)")]
    KeyframeOutOfRange { index: usize, len: usize },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl ChoreoError {
    /// Shorthand for an [`ChoreoError::InvariantViolation`].
    #[inline]
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } | Self::KeyframeOutOfRange { .. } => "path",
            Self::InvariantViolation { .. } => "validation",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ChoreoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ChoreoError::InvalidPath {
            provided: 1,
            required: 2,
        };
        assert_eq!(
            error.to_string(),
            "Invalid path: 1 keyframe(s) supplied, at least 2 required"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(ChoreoError::invariant("x").category(), "validation");
        assert_eq!(
            ChoreoError::KeyframeOutOfRange { index: 4, len: 2 }.category(),
            "path"
        );
    }

    #[test]
    fn test_serde_json_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ChoreoError = bad.into();
        assert_eq!(error.category(), "serialization");
    }

    #[test]
    fn test_serialization() {
        let error = ChoreoError::invariant("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: ChoreoError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
