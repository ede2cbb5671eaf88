use thiserror::Error;

/// Top-level error type for the Euclis geometry kernel.
#[derive(Debug, Error)]
pub enum EuclisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

/// Errors related to geometric construction and computation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot derive a direction from a near-zero vector (magnitude {magnitude:e})")]
    InvalidDirection { magnitude: f64 },

    #[error("expected 3 components, got {0}")]
    InvalidComponentCount(usize),

    #[error("tolerance must be non-negative, got {0}")]
    NegativeTolerance(f64),

    #[error("rotation axis is parallel to the {operand} vector")]
    UndefinedRotationAxis { operand: &'static str },
}

/// Errors related to parsing coordinate literals.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed coordinate literal: {0:?}")]
    MalformedLiteral(String),

    #[error("expected 3 components, got {0}")]
    InvalidComponentCount(usize),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
}

/// Errors related to structured XML (de)serialization.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("missing required field {0:?}")]
    MissingField(&'static str),

    #[error("non-numeric value {value:?} for field {field:?}")]
    NonNumeric { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`EuclisError`].
pub type Result<T> = std::result::Result<T, EuclisError>;
