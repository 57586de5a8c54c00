//! Error types for argument validation and payload normalization.

use thiserror::Error;

/// Invalid caller input that cannot be silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The year did not parse as an integer.
    #[error("Invalid year: '{0}'. Year must be an integer")]
    InvalidYear(String),

    /// The year parsed but is outside the supported range.
    #[error("Year must be between 1970 and 9999")]
    YearOutOfRange(i64),

    /// A national calendar was requested without a nation code.
    #[error("Nation code is required")]
    MissingNation,

    /// A diocesan calendar was requested without a diocese code.
    #[error("Diocese code is required")]
    MissingDiocese,

    /// The calendar type is not one of the known kinds.
    #[error("Invalid calendar type: '{0}'. Expected one of: general, national, diocesan")]
    InvalidCalendarType(String),
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upstream data that does not have the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The calendar payload has no `litcal` event list.
    #[error("No calendar data available")]
    NoCalendarData,

    /// The events payload has no event-definition collection.
    #[error("No event definitions available")]
    NoEventDefinitions,

    /// The calendar listing has no metadata block.
    #[error("No calendar listing available")]
    NoCalendarListing,

    /// A single event could not be mapped.
    #[error("Malformed event '{key}': {reason}")]
    MalformedEvent { key: String, reason: String },
}

impl NormalizeError {
    /// Creates a malformed-event error.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            ValidationError::YearOutOfRange(1969).to_string(),
            "Year must be between 1970 and 9999"
        );
        assert_eq!(
            ValidationError::MissingNation.to_string(),
            "Nation code is required"
        );
        assert_eq!(
            NormalizeError::NoCalendarData.to_string(),
            "No calendar data available"
        );
        assert_eq!(
            NormalizeError::malformed("Easter", "grade must be an integer").to_string(),
            "Malformed event 'Easter': grade must be an integer"
        );
    }
}
