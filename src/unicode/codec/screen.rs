//! Glyphs displayed by DOS for the control byte range.
//!
//! When read back from the screen, bytes 0x00 to 0x1f are the CP437
//! graphical characters (smileys, card suits, arrows), not control codes,
//! and 0x7f shows a house rather than DEL.

use super::super::types::models::CodePoint;

/// Unicode code points for screen codes 0x00 to 0x1f.
#[rustfmt::skip]
pub const SCREEN_CODES: [CodePoint; 0x20] = [
    0x0020, 0x263a, 0x263b, 0x2665, // 00-03
    0x2666, 0x2663, 0x2660, 0x2022, // 04-07
    0x25d8, 0x25cb, 0x25d9, 0x2642, // 08-0b
    0x2640, 0x266a, 0x266b, 0x263c, // 0c-0f
    0x25ba, 0x25c4, 0x2195, 0x203c, // 10-13
    0x00b6, 0x00a7, 0x25ac, 0x21a8, // 14-17
    0x2191, 0x2193, 0x2192, 0x2190, // 18-1b
    0x221f, 0x2194, 0x25b2, 0x25bc, // 1c-1f
];

/// Screen glyph for byte 0x7f: HOUSE.
pub const SCREEN_CODE_7F: CodePoint = 0x2302;
