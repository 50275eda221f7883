//! Table types and constants shared across the transcoder.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::grapheme::Grapheme;

/// A Unicode code point restricted to the Basic Multilingual Plane.
///
/// Values at or above 0x10000 are never represented; multi-byte UTF-8
/// sequences that would produce them decode to the unknown-character
/// sentinel instead.
pub type CodePoint = u16;

/// Emitted whenever there is no sane way to handle a glyph: `?`.
pub const UNKNOWN_CHARACTER: u8 = 0x3f;

/// End-of-file marker honored in mapping files (used by some files from
/// unicode.org).
pub const END_OF_FILE_MARKING: u8 = 0x1a;

/// The code page used when the requested one is unknown or broken
/// (United States).
pub const DEFAULT_CODE_PAGE: u16 = 437;

/// Unicode to DOS code page mapping.
pub type CodePageMapping = BTreeMap<Grapheme, u8>;

/// DOS code page to Unicode mapping.
pub type CodePageMappingReverse = BTreeMap<u8, Grapheme>;

/// KD-style decomposition rules, base code point to decomposed grapheme.
pub type DecompositionRules = BTreeMap<CodePoint, Grapheme>;

/// Code pages that are byte-for-byte identical to another one.
pub type ConfigDuplicates = BTreeMap<u16, u16>;

/// Unicode to Unicode fallback rewrites, in declaration order (first match
/// wins when materialized against a code page).
pub type ConfigAliases = Vec<(CodePoint, CodePoint)>;

/// Unicode to 7-bit ASCII mapping, the last-resort fallback.
pub type AsciiMapping = BTreeMap<CodePoint, u8>;

/// How to construct the mappings for one code page, as described by the
/// main configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigMappingEntry {
    pub valid: bool,
    /// Direct byte entries from the main file.
    pub mapping: CodePageMappingReverse,
    /// Parent code page to inherit from, 0 when none.
    pub extends_code_page: u16,
    pub extends_dir: String,
    pub extends_file: String,
}

/// Per-code-page construction recipes keyed by code page number.
pub type ConfigMappings = BTreeMap<u16, ConfigMappingEntry>;

/// The derived lookup tables for one prepared code page.
#[derive(Debug, Default)]
pub struct CodePageTables {
    /// Unicode to byte, as loaded.
    pub normalized: CodePageMapping,
    /// Unicode to byte for graphemes whose decomposition differs from the
    /// loaded form.
    pub decomposed: CodePageMapping,
    /// Alias rewrites materialized against this code page's coverage.
    pub aliases_normalized: CodePageMapping,
    pub aliases_decomposed: CodePageMapping,
    /// Byte to Unicode.
    pub reverse: CodePageMappingReverse,
}

/// Inserts only when the key is absent; returns whether the value was added.
/// First writer wins in every mapping direction.
pub(crate) fn add_if_not_mapped<K: Ord, V>(map: &mut BTreeMap<K, V>, key: K, value: V) -> bool {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}
