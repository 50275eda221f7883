//! UTF-8 to code point codec, restricted to the Basic Multilingual Plane.
//!
//! The decoder is deliberately lenient in the same places the DOS-era data
//! it serves is lenient: overlong encodings and UTF-16 surrogate values are
//! passed through rather than rejected. Because surrogates can round-trip,
//! the encoder's output is a byte string and not guaranteed to be valid
//! UTF-8 in the strict sense.

use super::super::types::models::{CodePoint, UNKNOWN_CHARACTER};

// Lead byte thresholds, by encoded sequence length.
const THRESHOLD_NON_ASCII: u8 = 0b1000_0000;
const THRESHOLD_2_BYTES: u8 = 0b1100_0000;
const THRESHOLD_3_BYTES: u8 = 0b1110_0000;
const THRESHOLD_4_BYTES: u8 = 0b1111_0000;
const THRESHOLD_5_BYTES: u8 = 0b1111_1000;
const THRESHOLD_6_BYTES: u8 = 0b1111_1100;

const ENCODE_THRESHOLD_2_BYTES: CodePoint = 0x0080;
const ENCODE_THRESHOLD_3_BYTES: CodePoint = 0x0800;

fn is_continuation(byte: u8) -> bool {
    byte >= THRESHOLD_NON_ASCII && byte < THRESHOLD_2_BYTES
}

/// Decodes a UTF-8 byte string into a sequence of BMP code points.
///
/// The whole input is always consumed. Every malformed position emits the
/// unknown-character sentinel and clears the returned status flag:
/// stray continuation bytes, truncated 2- and 3-byte sequences, and 4- to
/// 6-byte sequences (which encode code points beyond the BMP; their
/// continuation bytes are skipped, clamped at the end of input).
pub fn decode(input: &[u8]) -> (Vec<CodePoint>, bool) {
    let mut out = Vec::with_capacity(input.len());
    let mut status = true;
    let mut i = 0;

    while i < input.len() {
        let lead = input[i];
        i += 1;

        if lead < THRESHOLD_NON_ASCII {
            // 1-byte code point, ASCII compatible
            out.push(CodePoint::from(lead));
            continue;
        }

        if lead >= THRESHOLD_4_BYTES {
            // Beyond the BMP; skip the continuation bytes and give up on
            // this position.
            let expected = if lead >= THRESHOLD_6_BYTES {
                5
            } else if lead >= THRESHOLD_5_BYTES {
                4
            } else {
                3
            };
            let mut skipped = 0;
            while skipped < expected && i < input.len() && is_continuation(input[i]) {
                i += 1;
                skipped += 1;
            }
            out.push(CodePoint::from(UNKNOWN_CHARACTER));
            status = false;
            continue;
        }

        let (needed, first_bits) = if lead >= THRESHOLD_3_BYTES {
            (2, u32::from(lead & 0x0f))
        } else if lead >= THRESHOLD_2_BYTES {
            (1, u32::from(lead & 0x1f))
        } else {
            // Continuation byte without a lead byte
            out.push(CodePoint::from(UNKNOWN_CHARACTER));
            status = false;
            continue;
        };

        let mut code_point = first_bits;
        let mut malformed = false;
        for _ in 0..needed {
            match input.get(i) {
                Some(&byte) if is_continuation(byte) => {
                    i += 1;
                    code_point = (code_point << 6) | u32::from(byte & 0x3f);
                }
                _ => {
                    malformed = true;
                    break;
                }
            }
        }

        if malformed {
            out.push(CodePoint::from(UNKNOWN_CHARACTER));
            status = false;
        } else {
            out.push(code_point as CodePoint);
        }
    }

    (out, status)
}

/// Encodes a sequence of BMP code points as UTF-8 bytes.
pub fn encode(input: &[CodePoint]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() * 2);

    for &code_point in input {
        if code_point < ENCODE_THRESHOLD_2_BYTES {
            out.push(code_point as u8);
        } else if code_point < ENCODE_THRESHOLD_3_BYTES {
            out.push(THRESHOLD_2_BYTES | (code_point >> 6) as u8);
            out.push(THRESHOLD_NON_ASCII | (code_point & 0x3f) as u8);
        } else {
            out.push(THRESHOLD_3_BYTES | (code_point >> 12) as u8);
            out.push(THRESHOLD_NON_ASCII | ((code_point >> 6) & 0x3f) as u8);
            out.push(THRESHOLD_NON_ASCII | (code_point & 0x3f) as u8);
        }
    }

    out
}
