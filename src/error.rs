use thiserror::Error;

/// Top-level error type for path generation.
#[derive(Debug, Error)]
pub enum FloorpathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while validating input polygons.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("polygon point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("invalid parameter `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors related to pipeline operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`FloorpathError`].
pub type Result<T> = std::result::Result<T, FloorpathError>;
