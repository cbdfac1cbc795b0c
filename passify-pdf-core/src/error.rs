use std::path::PathBuf;
use thiserror::Error;

/// Failures of the encryption operation.
///
/// The set is closed so adapters can match on the kind of failure
/// instead of inspecting messages.
#[derive(Error, Debug)]
pub enum EncryptError {
    #[error("Input file '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Input path '{}' is not a file.", .0.display())]
    InvalidInputType(PathBuf),

    #[error("Failed to encrypt PDF: {0}")]
    Processing(String),
}

impl From<lopdf::Error> for EncryptError {
    fn from(err: lopdf::Error) -> Self {
        EncryptError::Processing(err.to_string())
    }
}

impl From<std::io::Error> for EncryptError {
    fn from(err: std::io::Error) -> Self {
        EncryptError::Processing(err.to_string())
    }
}

pub type EncryptResult<T> = std::result::Result<T, EncryptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_not_found_display_names_path() {
        let error = EncryptError::NotFound(PathBuf::from("missing.pdf"));
        assert_eq!(error.to_string(), "Input file 'missing.pdf' not found.");
    }

    #[test]
    fn test_invalid_input_type_display_names_path() {
        let error = EncryptError::InvalidInputType(PathBuf::from("some/dir"));
        assert_eq!(error.to_string(), "Input path 'some/dir' is not a file.");
    }

    #[test]
    fn test_processing_wraps_cause() {
        let error = EncryptError::Processing("xref table is broken".to_string());
        assert_eq!(
            error.to_string(),
            "Failed to encrypt PDF: xref table is broken"
        );
    }

    #[test]
    fn test_io_error_becomes_processing() {
        let io_error = IoError::new(ErrorKind::PermissionDenied, "read-only file system");
        let error = EncryptError::from(io_error);

        match error {
            EncryptError::Processing(ref message) => {
                assert!(message.contains("read-only file system"));
            }
            _ => panic!("Expected Processing variant"),
        }
    }

    #[test]
    fn test_error_debug_contains_variant() {
        let error = EncryptError::Processing("boom".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("Processing"));
        assert!(debug_str.contains("boom"));
    }
}
