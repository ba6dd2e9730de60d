//! Common error types used throughout tubeprep.

/// Common error type for tubeprep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A string was not a valid 11-character video identifier.
    #[error("Invalid video id: {0:?}")]
    InvalidVideoId(String),

    /// An extension in the category table is malformed.
    #[error("Invalid extension for {category}: {extension:?}")]
    InvalidExtension { category: String, extension: String },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new InvalidExtension error.
    pub fn invalid_extension(category: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::InvalidExtension {
            category: category.into(),
            extension: extension.into(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidVideoId("short".to_string());
        assert_eq!(err.to_string(), "Invalid video id: \"short\"");

        let err = Error::invalid_extension("media", "mkv");
        assert_eq!(err.to_string(), "Invalid extension for media: \"mkv\"");

        let err = Error::invalid_input("bad format");
        assert_eq!(err.to_string(), "Invalid input: bad format");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }
}
