//! Recognizer for the KD-style decomposition rules.
//!
//! Each line rewrites one precomposed code point into a base plus one or
//! more combining marks:
//!
//! ```text
//! <cp_source> <cp_base> <mark> [<mark>…]
//! ```
//!
//! A source may only be defined once, every mark must actually classify as
//! a combining mark, and the assembled rule must be a valid grapheme.
//! Rules chain: a rule's base may itself have a rule, so the loader's
//! output feeds a repeated rewrite in
//! [`Grapheme::decompose`](super::super::types::grapheme::Grapheme::decompose).

use super::super::types::error::{MappingError, Result};
use super::super::types::grapheme::{is_combining_mark, Grapheme};
use super::super::types::models::DecompositionRules;
use super::tokens::{parse_hex_code_point, tokenize, LineReader};

pub(crate) fn parse(content: &str, file_name: &str) -> Result<DecompositionRules> {
    let mut rules = DecompositionRules::new();
    let mut reader = LineReader::new(content);

    while let Some(line) = reader.next_line() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        let line_num = reader.line_num();

        if tokens.len() < 3 {
            return Err(MappingError::parse(file_name, line_num, "malformed rule"));
        }
        let (source, base) = match (
            parse_hex_code_point(tokens[0]),
            parse_hex_code_point(tokens[1]),
        ) {
            (Some(source), Some(base)) => (source, base),
            _ => {
                return Err(MappingError::parse(
                    file_name,
                    line_num,
                    "malformed code point",
                ))
            }
        };
        if rules.contains_key(&source) {
            return Err(MappingError::parse(
                file_name,
                line_num,
                "code point already has a decomposition rule",
            ));
        }

        let mut rule = Grapheme::new(base);
        for (position, token) in tokens.iter().enumerate().skip(2) {
            let mark = parse_hex_code_point(token).ok_or_else(|| {
                MappingError::parse(file_name, line_num, "malformed code point")
            })?;
            if !is_combining_mark(mark) {
                return Err(MappingError::parse(
                    file_name,
                    line_num,
                    format!("token #{} is not a supported combining mark", position + 1),
                ));
            }
            rule.add_mark(mark);
        }
        if !rule.is_valid() {
            return Err(MappingError::invalid_grapheme(file_name, line_num));
        }

        rules.insert(source, rule);
    }

    if rules.is_empty() {
        return Err(MappingError::NoEntries(file_name.to_string()));
    }
    Ok(rules)
}
