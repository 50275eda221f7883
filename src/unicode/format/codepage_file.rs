//! Recognizer for external per-code-page mapping files.
//!
//! These files carry only the bare byte forms:
//!
//! ```text
//! <byte>                          # byte has no character
//! <byte> <cp> [<mark> [<mark>]]   # byte maps to a grapheme
//! ```

use super::super::types::error::{MappingError, Result};
use super::super::types::grapheme::Grapheme;
use super::super::types::models::{add_if_not_mapped, CodePageMappingReverse};
use super::tokens::{parse_grapheme, parse_hex_byte, tokenize, LineReader};

pub(crate) fn parse(content: &str, file_name: &str) -> Result<CodePageMappingReverse> {
    let mut mapping = CodePageMappingReverse::new();
    let mut reader = LineReader::new(content);

    while let Some(line) = reader.next_line() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        let line_num = reader.line_num();

        let character_code = parse_hex_byte(tokens[0]).ok_or_else(|| {
            MappingError::parse(file_name, line_num, "malformed mapping entry")
        })?;
        if tokens.len() > 4 {
            return Err(MappingError::parse(file_name, line_num, "too many tokens"));
        }

        // 7-bit ASCII codes are fixed; only the high half is configurable
        if character_code < 0x80 {
            continue;
        }

        if tokens.len() == 1 {
            add_if_not_mapped(&mut mapping, character_code, Grapheme::default());
            continue;
        }

        let grapheme = parse_grapheme(&tokens).ok_or_else(|| {
            MappingError::parse(file_name, line_num, "malformed mapping entry")
        })?;

        // An invalid grapheme that is shadowed by an earlier entry is
        // tolerated; at least the CP 1258 definition from unicode.org maps
        // some bytes to bare combining marks, which is fine for converting
        // texts but unusable here, where the number of output characters
        // has to match the number of input characters. Such slots are
        // expected to be overridden in the main configuration file.
        if add_if_not_mapped(&mut mapping, character_code, grapheme.clone()) && !grapheme.is_valid()
        {
            return Err(MappingError::invalid_grapheme(file_name, line_num));
        }
    }

    if mapping.is_empty() {
        return Err(MappingError::NoEntries(file_name.to_string()));
    }
    Ok(mapping)
}
