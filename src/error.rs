//! Error types for schema generation

use std::path::PathBuf;

/// Errors that abort a generation run.
///
/// Messages name only the failing step; the underlying error is reachable
/// through [`std::error::Error::source`].
///
/// Every variant is terminal: the output file is only written after the whole
/// script has been rendered, so no variant leaves partial output behind.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The input export does not exist
    #[error("File {} not found.", .path.display())]
    MissingInput { path: PathBuf },

    /// None of the split strategies produced exactly three arrays
    #[error("Split failed. Found {parts} parts.")]
    Split { parts: usize },

    /// One of the three arrays is not valid JSON for its record type
    #[error("JSON Parse Error in {section}")]
    Parse {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the input or writing the output failed
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_error_message() {
        let err = GenerateError::Split { parts: 2 };
        assert_eq!(err.to_string(), "Split failed. Found 2 parts.");
    }

    #[test]
    fn test_missing_input_message() {
        let err = GenerateError::MissingInput {
            path: PathBuf::from("full_and_final.sql"),
        };
        assert_eq!(err.to_string(), "File full_and_final.sql not found.");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("[1,").unwrap_err();
        let err = GenerateError::Parse {
            section: "columns",
            source,
        };
        assert_eq!(err.to_string(), "JSON Parse Error in columns");
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("EOF"));
    }
}
