/// Error returned when parsing a closed enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

/// Errors surfaced while validating a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The clock offset does not describe a real UTC offset.
    #[error("utc_offset_minutes {0} is outside -1439..=1439")]
    OffsetOutOfRange(i32),

    /// An environment override held a value that is neither truthy nor falsy.
    #[error("{var} must be one of 1/true/yes/on or 0/false/no/off, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
}
