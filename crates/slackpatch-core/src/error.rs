use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Term table mismatch: {searches} search terms but {replacements} replacement terms")]
    TermCountMismatch { searches: usize, replacements: usize },

    #[error("Invalid term '{term}': {reason}")]
    InvalidTerm { term: String, reason: String },

    #[error("Buffer access out of bounds: offset {offset:#x} + {len} exceeds buffer size {size}")]
    OutOfBounds { offset: usize, len: usize, size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds {
            offset: 0x10,
            len: 8,
            size: 16,
        };
        let message = err.to_string();
        assert!(message.contains("0x10"));
        assert!(message.contains("16"));
    }
}
