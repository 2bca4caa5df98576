use crate::sequence::family::Family;

/// Convenience result type used across the show engine.
pub type HengeResult<T> = Result<T, HengeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HengeError {
    /// Ring construction parameters that cannot produce a layout.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A family has no bit position in the sequence entry layout.
    #[error("missing family bit: family {family:?} has no configured bit position")]
    MissingFamilyBit {
        /// Family without a configured bit position.
        family: Family,
    },

    /// The show is marked running but its timing fields are unset.
    #[error("timing contract violation: {0}")]
    TimingContract(String),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while painting or compositing surfaces.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HengeError {
    /// Build a [`HengeError::InvalidGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`HengeError::TimingContract`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::TimingContract(msg.into())
    }

    /// Build a [`HengeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HengeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HengeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
