use thiserror::Error;

pub type Result<T> = std::result::Result<T, PercolationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("site ({row}, {col}) is out of bounds for a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("trial {trial} failed: {source}")]
    TrialFailure {
        trial: usize,
        #[source]
        source: Box<PercolationError>,
    },
}

impl PercolationError {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Out-of-range coordinates are reported as their own variant but belong
    /// to the invalid-argument family.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::OutOfBounds { .. })
    }
}
