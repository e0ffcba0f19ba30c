//! Errors raised while bringing external data into the core.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when parsing or validating inventory data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A date string could not be parsed
    #[error("invalid date: {input:?}")]
    InvalidDate {
        /// The offending input
        input: String,
    },

    /// A status string is not one of the four known statuses
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),

    /// A required field was absent or blank
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Quantity was negative or not a number
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The record did not have the expected shape (wrong-typed field, not an object)
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidDate`].
    pub fn invalid_date(input: impl Into<String>) -> Self {
        CoreError::InvalidDate {
            input: input.into(),
        }
    }
}
