//! Codec layer between byte strings and code point sequences.
//!
//! - [`utf8`]: BMP-only UTF-8 decoding and encoding
//! - [`screen`]: the CP437 screen-code glyph table for control bytes

pub mod screen;
pub mod utf8;
