//! End-to-end conversions over the mapping tables shipped under
//! `resources/`.

use std::path::PathBuf;

use dos_unicode::{FixedHost, Transcoder, UNKNOWN_CHARACTER};

fn resources_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

fn transcoder() -> Transcoder<FixedHost> {
    Transcoder::new(FixedHost::new(resources_root()))
}

fn transcoder_for_host_cp(code_page: u16) -> Transcoder<FixedHost> {
    Transcoder::new(FixedHost::new(resources_root()).with_code_page(code_page))
}

#[test]
fn printable_ascii_is_identity_in_both_directions() {
    let mut t = transcoder();
    let ascii: Vec<u8> = (0x20..=0x7e).collect();

    let (out, ok) = t.utf8_to_dos_for_cp(&ascii, 437);
    assert!(ok);
    assert_eq!(out, ascii);

    assert_eq!(t.dos_to_utf8_for_cp(&ascii, 437), ascii);
}

#[test]
fn cp437_high_bytes_round_trip() {
    let mut t = transcoder();
    for byte in 0x80..=0xff_u8 {
        let utf8 = t.dos_to_utf8_for_cp(&[byte], 437);
        let (back, ok) = t.utf8_to_dos_for_cp(&utf8, 437);
        assert!(ok, "byte {:#04x} did not map back cleanly", byte);
        assert_eq!(back, vec![byte], "round trip broke for byte {:#04x}", byte);
    }
}

#[test]
fn control_bytes_expand_to_screen_code_glyphs() {
    let mut t = transcoder();

    assert_eq!(t.dos_to_utf8_for_cp(&[0x01], 437), "\u{263a}".as_bytes());
    assert_eq!(t.dos_to_utf8_for_cp(&[0x7f], 437), "\u{2302}".as_bytes());
    // CR and LF are screen glyphs too, not line breaks
    assert_eq!(
        t.dos_to_utf8_for_cp(&[0x0d, 0x0a], 437),
        "\u{266a}\u{266b}".as_bytes()
    );
    assert_eq!(t.dos_to_utf8_for_cp(&[0x00], 437), b" ");
}

#[test]
fn precomposed_characters_map_directly() {
    let mut t = transcoder();

    assert_eq!(t.utf8_to_dos_for_cp("é".as_bytes(), 850), (vec![0x82], true));
    assert_eq!(t.utf8_to_dos_for_cp("Ą".as_bytes(), 852), (vec![0xa4], true));
    assert_eq!(t.utf8_to_dos_for_cp("ą".as_bytes(), 852), (vec![0xa5], true));
}

#[test]
fn combining_sequences_map_through_the_decomposed_tables() {
    let mut t = transcoder();

    // e + combining acute is the decomposed spelling of the mapped é
    assert_eq!(
        t.utf8_to_dos_for_cp("e\u{0301}".as_bytes(), 850),
        (vec![0x82], true)
    );
    // A + combining ogonek, the decomposed spelling of Ą
    assert_eq!(
        t.utf8_to_dos_for_cp("A\u{0328}".as_bytes(), 852),
        (vec![0xa4], true)
    );
}

#[test]
fn unmappable_marks_are_stripped_after_decomposition() {
    let mut t = transcoder();

    // CP 437 has no Á in any spelling; the mark is dropped, the base kept
    assert_eq!(
        t.utf8_to_dos_for_cp("A\u{0301}".as_bytes(), 437),
        (vec![0x41], true)
    );
    assert_eq!(t.utf8_to_dos_for_cp("Á".as_bytes(), 437), (vec![0x41], true));
    // CP 850 has Á directly
    assert_eq!(t.utf8_to_dos_for_cp("Á".as_bytes(), 850), (vec![0xb5], true));
    // Chained decomposition: ế is ê + acute, and CP 437 has neither; only
    // the fully decomposed base survives
    assert_eq!(t.utf8_to_dos_for_cp("ế".as_bytes(), 437), (vec![0x65], true));
}

#[test]
fn unmappable_code_points_become_the_sentinel() {
    let mut t = transcoder();

    let (out, ok) = t.utf8_to_dos_for_cp("日".as_bytes(), 437);
    assert_eq!(out, vec![UNKNOWN_CHARACTER]);
    assert!(!ok);

    // Mixed input still converts the rest
    let (out, ok) = t.utf8_to_dos_for_cp("a日b".as_bytes(), 437);
    assert_eq!(out, vec![b'a', UNKNOWN_CHARACTER, b'b']);
    assert!(!ok);
}

#[test]
fn aliases_rescue_equivalent_code_points() {
    let mut t = transcoder();

    // Ohm sign -> Greek capital omega, which CP 437 has
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{2126}".as_bytes(), 437),
        (vec![0xea], true)
    );
    // Angstrom sign -> A with ring above
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{212b}".as_bytes(), 437),
        (vec![0x8f], true)
    );
    // Bidirectional alias: Greek small mu rides the micro sign slot
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{03bc}".as_bytes(), 437),
        (vec![0xe6], true)
    );
}

#[test]
fn ascii_fallback_is_tried_after_the_code_page() {
    let mut t = transcoder();

    // En dash has no CP 437 slot; the fallback table substitutes '-'
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{2013}".as_bytes(), 437),
        (vec![b'-'], true)
    );
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{266f}".as_bytes(), 437),
        (vec![b'#'], true)
    );
    // The multiplication sign is in CP 850, so the fallback only applies
    // to code pages without it
    assert_eq!(
        t.utf8_to_dos_for_cp("×".as_bytes(), 850),
        (vec![0x9e], true)
    );
    assert_eq!(
        t.utf8_to_dos_for_cp("×".as_bytes(), 437),
        (vec![b'x'], true)
    );
}

#[test]
fn cp858_inherits_cp850_with_the_euro_override() {
    let mut t = transcoder();

    assert_eq!(t.utf8_to_dos_for_cp("€".as_bytes(), 858), (vec![0xd5], true));
    assert_eq!(t.dos_to_utf8_for_cp(&[0xd5], 858), "€".as_bytes());
    // Everything else comes from CP 850
    assert_eq!(t.utf8_to_dos_for_cp("é".as_bytes(), 858), (vec![0x82], true));
    // The dotless i lost its slot to the euro and its parent entry is
    // shadowed, so it cannot map at all
    let (out, ok) = t.utf8_to_dos_for_cp("\u{0131}".as_bytes(), 858);
    assert_eq!(out, vec![UNKNOWN_CHARACTER]);
    assert!(!ok);
    // In CP 850 itself it still works
    assert_eq!(
        t.utf8_to_dos_for_cp("\u{0131}".as_bytes(), 850),
        (vec![0xd5], true)
    );
}

#[test]
fn malformed_utf8_positions_become_the_sentinel() {
    let mut t = transcoder();

    // Truncated 2-byte sequence
    let (out, ok) = t.utf8_to_dos_for_cp(&[b'a', 0xc3], 437);
    assert_eq!(out, vec![b'a', UNKNOWN_CHARACTER]);
    assert!(!ok);

    // Stray continuation byte
    let (out, ok) = t.utf8_to_dos_for_cp(&[0x90], 437);
    assert_eq!(out, vec![UNKNOWN_CHARACTER]);
    assert!(!ok);

    // A 4-byte sequence (beyond the BMP) collapses to one sentinel
    let (out, ok) = t.utf8_to_dos_for_cp("🎵".as_bytes(), 437);
    assert_eq!(out, vec![UNKNOWN_CHARACTER]);
    assert!(!ok);
}

#[test]
fn unknown_code_page_falls_back_to_the_default() {
    let mut t = transcoder();

    // CP 999 does not exist; CP 437 takes over transparently
    assert_eq!(t.utf8_to_dos_for_cp("é".as_bytes(), 999), (vec![0x82], true));
}

#[test]
fn code_page_zero_means_no_code_page_at_all() {
    let mut t = transcoder();

    assert_eq!(t.utf8_to_dos_for_cp(b"A", 0), (vec![b'A'], true));
    let (out, ok) = t.utf8_to_dos_for_cp("é".as_bytes(), 0);
    assert_eq!(out, vec![UNKNOWN_CHARACTER]);
    assert!(!ok);
    // Reverse direction: every high byte is unknown
    assert_eq!(t.dos_to_utf8_for_cp(&[0xb0], 0), b"?");
}

#[test]
fn current_code_page_entry_points_follow_the_host() {
    let mut t = transcoder_for_host_cp(852);
    assert_eq!(t.utf8_code_page(), 852);
    assert_eq!(t.utf8_to_dos("Ą".as_bytes()), (vec![0xa4], true));
    assert_eq!(t.dos_to_utf8(&[0xa4]), "Ą".as_bytes());

    // An unsupported loaded code page degrades to the default
    let mut t = transcoder_for_host_cp(999);
    assert_eq!(t.utf8_code_page(), 437);

    // Below EGA the character set cannot change, so neither can the
    // code page
    let mut t = Transcoder::new(
        FixedHost::new(resources_root())
            .with_code_page(852)
            .with_charset_switching(false),
    );
    assert_eq!(t.utf8_code_page(), 437);
    assert_eq!(t.utf8_to_dos("é".as_bytes()), (vec![0x82], true));
}
