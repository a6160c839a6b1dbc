// Error taxonomy for latency pattern classification
//
// Every error the classifier produces is a caller-input defect. Nothing here
// performs I/O, so there is no transient failure class and no retry story.

use thiserror::Error;

/// Errors for classification operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Insufficient windows: need at least {required}, got {actual}")]
    InsufficientWindows { required: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClassifyError {
    /// True for every variant: the caller must fix the input, not retry.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InsufficientWindows { .. } | Self::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
