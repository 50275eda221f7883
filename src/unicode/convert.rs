//! The transcoding pipeline between code point sequences and DOS bytes.
//!
//! Going to DOS, code points are first assembled into graphemes (a base
//! plus any trailing combining marks) and each grapheme then walks a
//! fallback chain until something produces exactly one byte. Going from
//! DOS, each byte expands independently through the reverse table or the
//! screen-code glyphs.

use std::collections::BTreeSet;

use log::warn;

use super::codec::screen::{SCREEN_CODES, SCREEN_CODE_7F};
use super::types::grapheme::{is_combining_mark, Grapheme};
use super::types::models::{
    AsciiMapping, CodePageMapping, CodePageMappingReverse, CodePageTables, CodePoint,
    DecompositionRules, UNKNOWN_CHARACTER,
};

/// Converts a code point sequence to DOS bytes, one byte per grapheme.
///
/// The fallback chain, first hit wins:
/// 1. bare 7-bit ASCII base
/// 2. the code page's direct mapping
/// 3. the code page's alias mapping
/// 4. the global ASCII fallback table
/// 5. the direct mapping, after decomposing the grapheme
/// 6. the alias mapping, after decomposing the grapheme
/// 7. steps 1-4 again with the decomposed grapheme's marks stripped
/// 8. the unknown-character sentinel, clearing the status flag
///
/// `page` is `None` when no code page could be prepared at all; only the
/// 7-bit shortcut and the ASCII fallback apply then.
pub(crate) fn wide_to_dos(
    input: &[CodePoint],
    page: Option<&CodePageTables>,
    ascii: &AsciiMapping,
    rules: &DecompositionRules,
    warned_code_points: &mut BTreeSet<CodePoint>,
) -> (Vec<u8>, bool) {
    let mut out = Vec::with_capacity(input.len());
    let mut status = true;

    let mut i = 0;
    while i < input.len() {
        let mut grapheme = Grapheme::new(input[i]);
        while i + 1 < input.len() && is_combining_mark(input[i + 1]) {
            i += 1;
            grapheme.add_mark(input[i]);
        }
        i += 1;

        if push_normalized(&grapheme, page, ascii, &mut out) {
            continue;
        }

        let mut decomposed = grapheme.clone();
        decomposed.decompose(rules);
        if push_page(page.map(|p| &p.decomposed), &decomposed, &mut out)
            || push_page(page.map(|p| &p.aliases_decomposed), &decomposed, &mut out)
        {
            continue;
        }

        // Last, desperate attempt: decompose and strip the marks
        let original_code_point = grapheme.code_point();
        grapheme.decompose(rules);
        if grapheme.has_mark() {
            grapheme.strip_marks();
            if push_normalized(&grapheme, page, ascii, &mut out) {
                continue;
            }
        }

        out.push(UNKNOWN_CHARACTER);
        status = false;
        if warned_code_points.insert(original_code_point) {
            warn!(
                "UNICODE: no fallback mapping for code point {:#06x}",
                original_code_point
            );
        }
    }

    (out, status)
}

/// Expands DOS bytes to a code point sequence.
///
/// High bytes go through the code page's reverse table (or become the
/// sentinel), 0x7f shows a house, printable ASCII passes through, and
/// control bytes expand to their CP437 screen glyphs.
pub(crate) fn dos_to_wide(input: &[u8], reverse: Option<&CodePageMappingReverse>) -> Vec<CodePoint> {
    let mut out = Vec::with_capacity(input.len());

    for &byte in input {
        if byte >= 0x80 {
            match reverse.and_then(|mapping| mapping.get(&byte)) {
                Some(grapheme) if !grapheme.is_empty() && grapheme.is_valid() => {
                    grapheme.push_into(&mut out);
                }
                _ => out.push(CodePoint::from(UNKNOWN_CHARACTER)),
            }
        } else if byte == 0x7f {
            out.push(SCREEN_CODE_7F);
        } else if byte >= 0x20 {
            out.push(CodePoint::from(byte));
        } else {
            out.push(SCREEN_CODES[usize::from(byte)]);
        }
    }

    out
}

fn push_7bit(grapheme: &Grapheme, out: &mut Vec<u8>) -> bool {
    if grapheme.has_mark() {
        return false;
    }
    let code_point = grapheme.code_point();
    if code_point >= 0x80 {
        return false;
    }
    out.push(code_point as u8);
    true
}

fn push_page(mapping: Option<&CodePageMapping>, grapheme: &Grapheme, out: &mut Vec<u8>) -> bool {
    let Some(mapping) = mapping else {
        return false;
    };
    match mapping.get(grapheme) {
        Some(&byte) => {
            out.push(byte);
            true
        }
        None => false,
    }
}

fn push_ascii_fallback(grapheme: &Grapheme, ascii: &AsciiMapping, out: &mut Vec<u8>) -> bool {
    if grapheme.has_mark() {
        return false;
    }
    match ascii.get(&grapheme.code_point()) {
        Some(&byte) => {
            out.push(byte);
            true
        }
        None => false,
    }
}

fn push_normalized(
    grapheme: &Grapheme,
    page: Option<&CodePageTables>,
    ascii: &AsciiMapping,
    out: &mut Vec<u8>,
) -> bool {
    push_7bit(grapheme, out)
        || push_page(page.map(|p| &p.normalized), grapheme, out)
        || push_page(page.map(|p| &p.aliases_normalized), grapheme, out)
        || push_ascii_fallback(grapheme, ascii, out)
}
