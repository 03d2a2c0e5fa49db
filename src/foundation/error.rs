/// Convenience result type used across vacmap.
pub type MapResult<T> = Result<T, MapError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    /// Required map data is absent or malformed (`size`, `pixelSize`, robot position, layers).
    ///
    /// Hosts are expected to fall back to a previously rendered image on this error.
    #[error("incomplete map data: {0}")]
    IncompleteMap(String),

    /// A rotation outside `{0, 90, 180, 270}` was requested. This is a caller bug.
    #[error("invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation(i64),

    /// Invalid render settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// A rendering invariant was broken (buffer shape mismatch, oversized raster, ...).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MapError {
    /// Build a [`MapError::IncompleteMap`] value.
    pub fn incomplete(msg: impl Into<String>) -> Self {
        Self::IncompleteMap(msg.into())
    }

    /// Build a [`MapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MapError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors caused by the incoming map payload rather than by the caller.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::IncompleteMap(_) | Self::Serde(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
