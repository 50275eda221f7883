//! Recognizers for the plain-text mapping configuration files.
//!
//! Each recognizer parses a whole file into a fresh table and returns it,
//! or fails with a [`MappingError`](super::types::error::MappingError)
//! naming the file and line. Nothing is committed on failure; the caller
//! keeps whatever tables it already had.
//!
//! - [`main_config`]: `MAIN.TXT`, the per-code-page construction recipes
//! - [`codepage_file`]: external per-code-page byte tables
//! - [`ascii_table`]: `ASCII.TXT`, the Unicode to 7-bit ASCII fallback
//! - [`decomposition`]: `DECOMPOSITION.TXT`, KD-style decomposition rules

pub(crate) mod ascii_table;
pub(crate) mod codepage_file;
pub(crate) mod decomposition;
pub(crate) mod main_config;
pub(crate) mod tokens;

use std::fs;
use std::path::Path;

use super::types::error::{MappingError, Result};

/// Reads a mapping file to a string, decoding lossily so that stray bytes
/// in comments cannot abort a load.
pub(crate) fn read_mapping_file(path_root: &Path, file_name: &str) -> Result<String> {
    let path = path_root.join(file_name);
    match fs::read(&path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(source) => Err(MappingError::Open {
            file: file_name.to_string(),
            source,
        }),
    }
}
