//! Recognizer for the Unicode to 7-bit ASCII fallback table.
//!
//! Each line maps one code point to the closest printable ASCII character:
//!
//! ```text
//! <cp> <glyph>
//! ```
//!
//! where `<glyph>` is a single printable character or one of the names
//! `SPC`, `HSH`, `NNN`.

use super::super::types::error::{MappingError, Result};
use super::super::types::models::AsciiMapping;
use super::tokens::{parse_ascii_glyph, parse_hex_code_point, tokenize, LineReader};

pub(crate) fn parse(content: &str, file_name: &str) -> Result<AsciiMapping> {
    let mut mapping = AsciiMapping::new();
    let mut reader = LineReader::new(content);

    while let Some(line) = reader.next_line() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        let line_num = reader.line_num();

        if tokens.len() != 2 {
            return Err(MappingError::parse(file_name, line_num, "malformed entry"));
        }
        let code_point = parse_hex_code_point(tokens[0]).ok_or_else(|| {
            MappingError::parse(file_name, line_num, "malformed code point")
        })?;
        let character = parse_ascii_glyph(tokens[1]).ok_or_else(|| {
            MappingError::parse(file_name, line_num, "malformed ASCII glyph")
        })?;

        mapping.insert(code_point, character);
    }

    if mapping.is_empty() {
        return Err(MappingError::NoEntries(file_name.to_string()));
    }
    Ok(mapping)
}
