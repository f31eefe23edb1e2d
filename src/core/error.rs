use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),

    #[error("Inconsistent array lengths: expected {expected}, found {found}")]
    InconsistentArrayLengths { expected: usize, found: usize },

    #[error("Insufficient data error: {0}")]
    InsufficientData(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

// Conversion for Plotters errors
#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("Plot drawing error: {}", err))
    }
}

/// Fail with `DimensionMismatch` unless two sample vectors have the same length
pub(crate) fn check_same_length(what: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::DimensionMismatch(format!(
            "Length mismatch between {}: {} vs {}",
            what, expected, found
        )));
    }
    Ok(())
}
