//! Error types for keyframe evaluation and property loading.

/// Errors raised while evaluating or loading keyframe data.
///
/// Every variant describes malformed animation data or misuse of a driver; none of
/// them is worth retrying.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum KeyframeError {
    /// A driver was evaluated without any keyframes.
    #[error("keyframe list is empty")]
    EmptyKeyframes,

    /// A keyframe that needs both endpoints lacks its end value.
    #[error("missing values for keyframe starting at frame {start_frame}")]
    MissingValues { start_frame: f32 },

    /// Two gradient keyframes disagree on their stop count.
    #[error("gradient stop count mismatch: expected {expected}, got {actual}")]
    GradientMismatch { expected: usize, actual: usize },

    /// Animation data had the wrong shape.
    #[error("parse error: {reason}")]
    Parse { reason: String },

    /// Animation data was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeyframeError {
    /// Create a parse error from a message.
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyKeyframes | Self::MissingValues { .. } | Self::GradientMismatch { .. } => {
                "evaluation"
            }
            Self::Parse { .. } | Self::Json(_) => "loading",
        }
    }
}

/// Keyframe result type
pub type Result<T> = std::result::Result<T, KeyframeError>;
