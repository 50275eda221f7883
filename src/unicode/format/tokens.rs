//! Lexical layer for the mapping configuration files.
//!
//! Every file is line-oriented UTF-8 text. `#` starts a comment running to
//! the end of the line, whitespace separates tokens, and a line whose first
//! byte is 0x1a ends the file early. Numeric literals are fixed width:
//! `0xXX` for bytes, `0xXXXX` for code points, and bare decimal for code
//! page numbers.

use super::super::types::grapheme::Grapheme;
use super::super::types::models::{CodePoint, END_OF_FILE_MARKING, UNKNOWN_CHARACTER};

/// Hands out non-empty lines one at a time, tracking line numbers for
/// error reporting and honoring the end-of-file marker.
pub(crate) struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line_num: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_num: 0,
        }
    }

    /// The number of the line most recently returned, 1-based.
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    pub fn next_line(&mut self) -> Option<&'a str> {
        loop {
            let line = self.lines.next()?;
            if line.as_bytes().first() == Some(&END_OF_FILE_MARKING) {
                return None; // end of definitions
            }
            self.line_num += 1;
            if !line.is_empty() {
                return Some(line);
            }
        }
    }
}

/// Splits a line into whitespace-separated tokens, dropping comments.
pub(crate) fn tokenize(line: &str) -> Vec<&str> {
    let line = match line.find('#') {
        Some(comment_start) => &line[..comment_start],
        None => line,
    };
    line.split(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parses a byte literal of exactly the form `0xXX`.
pub(crate) fn parse_hex_byte(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("0x")?;
    if token.len() != 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Parses a code point literal of exactly the form `0xXXXX`.
pub(crate) fn parse_hex_code_point(token: &str) -> Option<CodePoint> {
    let digits = token.strip_prefix("0x")?;
    if token.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    CodePoint::from_str_radix(digits, 16).ok()
}

/// Parses a decimal code page number, 1 to 5 digits, 1..=65535.
pub(crate) fn parse_code_page(token: &str) -> Option<u16> {
    if token.is_empty() || token.len() > 5 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match token.parse::<u32>() {
        Ok(value) if (1..=u32::from(u16::MAX)).contains(&value) => Some(value as u16),
        _ => None,
    }
}

/// Parses an ASCII glyph token: a single printable character, or one of the
/// names `SPC` (space), `HSH` (`#`, which would otherwise start a comment)
/// and `NNN` (the unknown-character sentinel).
pub(crate) fn parse_ascii_glyph(token: &str) -> Option<u8> {
    if token.len() == 1 {
        return Some(token.as_bytes()[0]);
    }
    match token {
        "SPC" => Some(b' '),
        "HSH" => Some(b'#'),
        "NNN" => Some(UNKNOWN_CHARACTER),
        _ => None,
    }
}

/// Assembles a grapheme from a mapping line's tokens: token 1 is the base
/// code point, tokens 2 and up are combining marks. The caller has already
/// consumed token 0 (the byte) and bounded the token count.
pub(crate) fn parse_grapheme(tokens: &[&str]) -> Option<Grapheme> {
    let code_point = parse_hex_code_point(tokens.get(1)?)?;
    let mut grapheme = Grapheme::new(code_point);

    for token in &tokens[2..] {
        let mark = parse_hex_code_point(token)?;
        grapheme.add_mark(mark);
    }

    Some(grapheme)
}
