/// Convenience result type used across badgeloop.
pub type BadgeloopResult<T> = Result<T, BadgeloopError>;

/// Top-level error taxonomy used by the composition and assembly APIs.
#[derive(thiserror::Error, Debug)]
pub enum BadgeloopError {
    /// Background or color specification could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Source bytes could not be decoded into a bitmap.
    #[error(
        "unsupported image{}: {reason}",
        .index.map(|i| format!(" #{i}")).unwrap_or_default()
    )]
    UnsupportedImage {
        /// Position of the offending image in the caller's input list, when known.
        index: Option<usize>,
        /// Decoder message.
        reason: String,
    },

    /// A multi-item frame was requested with zero images.
    #[error("empty group: at least one image is required to compose a frame")]
    EmptyGroup,

    /// Neither badges nor logos produced a frame.
    #[error("no content: no frames were generated, check your inputs")]
    NoContent,

    /// Invalid configuration or inconsistent inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// The animation container could not be written or read back.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeloopError {
    /// Build a [`BadgeloopError::InvalidColor`] value.
    pub fn invalid_color(spec: impl Into<String>) -> Self {
        Self::InvalidColor(spec.into())
    }

    /// Build a [`BadgeloopError::UnsupportedImage`] value without an input index.
    pub fn unsupported_image(reason: impl Into<String>) -> Self {
        Self::UnsupportedImage {
            index: None,
            reason: reason.into(),
        }
    }

    /// Build a [`BadgeloopError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BadgeloopError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Attach the caller's input index to an [`BadgeloopError::UnsupportedImage`].
    ///
    /// Other variants pass through unchanged.
    pub fn at_index(self, i: usize) -> Self {
        match self {
            Self::UnsupportedImage { reason, .. } => Self::UnsupportedImage {
                index: Some(i),
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
