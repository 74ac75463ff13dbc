/// Convenience result type used across the crate.
pub type TelopResult<T> = Result<T, TelopError>;

/// Error taxonomy for loading, rendering and exporting.
///
/// Every kind is recoverable: it aborts the requested operation only and never leaves
/// partially-updated session state behind.
#[derive(thiserror::Error, Debug)]
pub enum TelopError {
    /// The base image is missing, unreadable or not a decodable image.
    #[error("image load failed: {0}")]
    ImageLoadFailed(String),

    /// No font resource could be resolved for the selected family, or the file failed to parse.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// The destination could not be written or its format is not supported.
    #[error("output write failed: {0}")]
    OutputWriteFailed(String),

    /// A preset document is malformed or misses required fields.
    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    /// Invalid arguments passed to a core operation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TelopError {
    /// Build a [`TelopError::ImageLoadFailed`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoadFailed(msg.into())
    }

    /// Build a [`TelopError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`TelopError::OutputWriteFailed`] value.
    pub fn output_write(msg: impl Into<String>) -> Self {
        Self::OutputWriteFailed(msg.into())
    }

    /// Build a [`TelopError::InvalidPreset`] value.
    pub fn invalid_preset(msg: impl Into<String>) -> Self {
        Self::InvalidPreset(msg.into())
    }

    /// Build a [`TelopError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
