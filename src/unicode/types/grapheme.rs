//! The grapheme value type: one visible character, one DOS byte.
//!
//! A [`Grapheme`] is a base Unicode code point plus zero or more combining
//! marks. It is the key type of every Unicode-to-byte mapping table, so its
//! equality and ordering must not depend on the order in which marks were
//! attached; a second, sorted mark list is kept for comparisons while the
//! insertion-ordered list is preserved for emitting the marks back out.

use std::cmp::Ordering;

use super::models::{CodePoint, DecompositionRules, UNKNOWN_CHARACTER};

/// Inclusive code point ranges recognized as combining marks.
///
/// Arabic combining marks start at U+064B, but some of them are present as
/// standalone characters in Arabic code pages, so the range deliberately
/// begins at U+0653.
const COMBINING_MARK_RANGES: [(CodePoint, CodePoint); 6] = [
    (0x0300, 0x036f), // Combining Diacritical Marks
    (0x0653, 0x065f), // Arabic Combining Marks
    (0x1ab0, 0x1aff), // Combining Diacritical Marks Extended
    (0x1dc0, 0x1dff), // Combining Diacritical Marks Supplement
    (0x20d0, 0x20ff), // Combining Diacritical Marks for Symbols
    (0xfe20, 0xfe2f), // Combining Half Marks
];

/// Returns whether the code point cannot stand alone and attaches to the
/// preceding base character.
pub fn is_combining_mark(code_point: CodePoint) -> bool {
    COMBINING_MARK_RANGES
        .iter()
        .any(|&(first, last)| code_point >= first && code_point <= last)
}

/// A base code point with its combining marks, treated as a single visible
/// character mapping to a single DOS byte.
#[derive(Debug, Clone)]
pub struct Grapheme {
    code_point: CodePoint,
    /// Marks in the order they were attached; used when emitting back to
    /// Unicode so they reappear as they arrived.
    marks: Vec<CodePoint>,
    /// The same marks kept sorted; used for equality and ordering.
    marks_sorted: Vec<CodePoint>,
    is_empty: bool,
    is_valid: bool,
}

impl Default for Grapheme {
    /// An empty, valid grapheme. Its base reads as space but is never
    /// emitted; undefined code page slots are stored this way.
    fn default() -> Self {
        Self {
            code_point: CodePoint::from(b' '),
            marks: Vec::new(),
            marks_sorted: Vec::new(),
            is_empty: true,
            is_valid: true,
        }
    }
}

impl Grapheme {
    /// Creates a grapheme from a base code point.
    ///
    /// A combining mark is not a valid base, so such a grapheme is
    /// immediately invalidated.
    pub fn new(code_point: CodePoint) -> Self {
        let mut grapheme = Self {
            code_point,
            is_empty: false,
            ..Self::default()
        };
        if is_combining_mark(code_point) {
            grapheme.invalidate();
        }
        grapheme
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn has_mark(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn code_point(&self) -> CodePoint {
        self.code_point
    }

    /// Appends the base and then the marks, in insertion order, to the
    /// output sequence. Empty and invalid graphemes contribute nothing.
    pub fn push_into(&self, out: &mut Vec<CodePoint>) {
        if self.is_empty || !self.is_valid {
            return;
        }
        out.push(self.code_point);
        out.extend_from_slice(&self.marks);
    }

    /// Marks the grapheme as invalid; the base becomes the unknown-character
    /// sentinel and the marks are dropped.
    pub fn invalidate(&mut self) {
        self.is_empty = false;
        self.is_valid = false;
        self.code_point = CodePoint::from(UNKNOWN_CHARACTER);
        self.marks.clear();
        self.marks_sorted.clear();
    }

    /// Attaches a combining mark.
    ///
    /// Invalid graphemes ignore the call. A non-mark code point, or a mark
    /// added to an empty grapheme, invalidates it. Duplicate marks are
    /// ignored.
    pub fn add_mark(&mut self, code_point: CodePoint) {
        if !self.is_valid {
            return;
        }
        if !is_combining_mark(code_point) || self.is_empty {
            self.invalidate();
            return;
        }
        if self.marks.contains(&code_point) {
            return;
        }
        self.marks.push(code_point);
        let position = self.marks_sorted.partition_point(|&mark| mark < code_point);
        self.marks_sorted.insert(position, code_point);
    }

    /// Drops all combining marks, keeping the base.
    pub fn strip_marks(&mut self) {
        self.marks.clear();
        self.marks_sorted.clear();
    }

    /// Rewrites the base through the decomposition rules until no rule
    /// applies, attaching the marks each rule contributes.
    ///
    /// The rewrite count is bounded by the rule table size so that a cyclic
    /// rule set terminates instead of hanging.
    pub fn decompose(&mut self, rules: &DecompositionRules) {
        if !self.is_valid || self.is_empty {
            return;
        }
        let mut rewrites_left = rules.len();
        while let Some(rule) = rules.get(&self.code_point) {
            if rewrites_left == 0 {
                break;
            }
            rewrites_left -= 1;
            self.code_point = rule.code_point;
            for &mark in &rule.marks {
                self.add_mark(mark);
            }
        }
    }
}

impl PartialEq for Grapheme {
    fn eq(&self, other: &Self) -> bool {
        self.is_empty == other.is_empty
            && self.is_valid == other.is_valid
            && self.code_point == other.code_point
            && self.marks_sorted == other.marks_sorted
    }
}

impl Eq for Grapheme {}

impl PartialOrd for Grapheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grapheme {
    /// Lexicographic over (base, mark count, sorted marks). The empty and
    /// valid flags do not participate; mapping tables never hold empty or
    /// invalid graphemes as keys.
    fn cmp(&self, other: &Self) -> Ordering {
        self.code_point
            .cmp(&other.code_point)
            .then_with(|| self.marks_sorted.len().cmp(&other.marks_sorted.len()))
            .then_with(|| self.marks_sorted.cmp(&other.marks_sorted))
    }
}
