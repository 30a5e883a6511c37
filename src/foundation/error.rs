/// Convenience result type used across Sharecard.
pub type SharecardResult<T> = Result<T, SharecardError>;

/// Error taxonomy of the composition pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SharecardError {
    /// The background template is unreadable or not a usable raster image.
    #[error("template load error: {0}")]
    TemplateLoad(String),

    /// An avatar image or font could not be loaded; the element is skipped.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The rendered PNG could not be written.
    #[error("write error: {0}")]
    Write(String),

    /// Invalid layout, style or session data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SharecardError {
    /// Build a [`SharecardError::TemplateLoad`] value.
    pub fn template_load(msg: impl Into<String>) -> Self {
        Self::TemplateLoad(msg.into())
    }

    /// Build a [`SharecardError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`SharecardError::Write`] value.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Build a [`SharecardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SharecardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Only a missing template stops a whole batch; everything else is scoped to one session
    /// or one element.
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(self, Self::TemplateLoad(_))
    }
}

/// Flatten an `anyhow` chain into one line, innermost cause last.
pub(crate) fn chain_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
