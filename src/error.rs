use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} cannot be empty")]
    BlankInput(&'static str),
    #[error("not a goal number: {0:?}")]
    InvalidSelector(String),
    #[error("goal number {token} is out of range (1..{len})")]
    OutOfRange { token: String, len: usize },
    #[error("{0}")]
    EmptyCollection(String),
    #[error("corrupt data file {}: {message}", .path.display())]
    CorruptData { path: PathBuf, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Input-validation failures are reported to the user and the menu continues;
    /// everything else aborts the program.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::BlankInput(_)
                | AppError::InvalidSelector(_)
                | AppError::OutOfRange { .. }
                | AppError::EmptyCollection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recoverable() {
        assert!(AppError::BlankInput("goal title").is_recoverable());
        assert!(AppError::InvalidSelector("abc".to_string()).is_recoverable());
        let out_of_range = AppError::OutOfRange {
            token: "3".to_string(),
            len: 2,
        };
        assert!(out_of_range.is_recoverable());
        assert!(AppError::EmptyCollection("No goals found.".to_string()).is_recoverable());
    }

    #[test]
    fn storage_errors_are_fatal() {
        let corrupt = AppError::CorruptData {
            path: PathBuf::from("refine.json"),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(!corrupt.is_recoverable());
        assert!(corrupt.to_string().contains("refine.json"));
        assert!(!AppError::NotFound("refine.json".to_string()).is_recoverable());
    }
}
