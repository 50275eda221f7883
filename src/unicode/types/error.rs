//! Error types for mapping file parsing and code page construction.

use thiserror::Error;

/// The error type for all mapping-file and code-page-construction failures.
///
/// These errors never cross the public conversion API: the registry layer
/// logs them and degrades to the default code page (or to plain 7-bit
/// handling when even that is unavailable).
#[derive(Debug, Error)]
pub enum MappingError {
    /// A mapping file could not be opened or read.
    #[error("could not open mapping file {file}: {source}")]
    Open {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A line in a mapping file does not match any recognized form.
    #[error("error parsing mapping file {file}, line {line}: {details}")]
    Parse {
        file: String,
        line: usize,
        details: String,
    },

    /// A mapping line assembled a grapheme that is not valid (for example a
    /// combining mark used as a base code point).
    #[error("invalid grapheme defined in file {file}, line {line}")]
    InvalidGrapheme { file: String, line: usize },

    /// A mapping file parsed cleanly but defined nothing.
    #[error("mapping file {0} has no entries")]
    NoEntries(String),
}

/// A convenience `Result` alias using the crate's [`MappingError`] type.
pub type Result<T> = std::result::Result<T, MappingError>;

impl MappingError {
    pub(crate) fn parse(file: &str, line: usize, details: impl Into<String>) -> Self {
        MappingError::Parse {
            file: file.to_string(),
            line,
            details: details.into(),
        }
    }

    pub(crate) fn invalid_grapheme(file: &str, line: usize) -> Self {
        MappingError::InvalidGrapheme {
            file: file.to_string(),
            line,
        }
    }
}
