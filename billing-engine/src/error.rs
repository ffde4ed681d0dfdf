use thiserror::Error;

/// Errors raised when parsing billing identifiers from their wire form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown service code: {0}")]
    UnknownServiceCode(String),

    #[error("Unknown medication type: {0}")]
    UnknownMedicationType(String),

    #[error("Unknown patient category: {0}")]
    UnknownPatientCategory(String),

    #[error("Unknown facility category: {0}")]
    UnknownFacilityCategory(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
