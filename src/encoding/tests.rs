//! Tests for encoding detection, alias resolution, and conversion

use super::*;
use std::collections::HashSet;

#[test]
fn test_canonical_names() {
    assert_eq!(Encoding::Utf8.canonical_name(), "UTF-8");
    assert_eq!(Encoding::Utf16.canonical_name(), "UTF-16");
    assert_eq!(Encoding::Utf16Be.canonical_name(), "UTF-16BE");
    assert_eq!(Encoding::Utf16Le.canonical_name(), "UTF-16LE");
    assert_eq!(Encoding::UsAscii.canonical_name(), "US-ASCII");
    assert_eq!(Encoding::Latin1.canonical_name(), "ISO-8859-1");
}

#[test]
fn test_alias_sets_are_disjoint() {
    let mut seen = HashSet::new();
    for encoding in Encoding::ALL {
        for name in std::iter::once(encoding.canonical_name())
            .chain(encoding.aliases().iter().copied())
        {
            assert!(
                seen.insert(name.to_ascii_lowercase()),
                "alias {} claimed twice",
                name
            );
        }
    }
}

#[test]
fn test_normalize_canonical_and_aliases() {
    assert_eq!(Encoding::normalize("UTF-8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::normalize("UTF8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::normalize("unicode-1-1-utf-8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::normalize("latin1"), Some(Encoding::Latin1));
    assert_eq!(Encoding::normalize("ASCII"), Some(Encoding::UsAscii));
    assert_eq!(Encoding::normalize("UnicodeBig"), Some(Encoding::Utf16));
    assert_eq!(Encoding::normalize("UnicodeLittleUnmarked"), Some(Encoding::Utf16Le));
}

#[test]
fn test_normalize_is_case_insensitive() {
    assert_eq!(Encoding::normalize("utf-8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::normalize("iso-8859-1"), Some(Encoding::Latin1));
    assert_eq!(Encoding::normalize("LATIN1"), Some(Encoding::Latin1));
}

#[test]
fn test_normalize_is_deterministic() {
    for label in ["UTF8", "latin1", "windows-1252", "KOI8-R"] {
        assert_eq!(Encoding::normalize(label), Encoding::normalize(label));
    }
}

#[test]
fn test_normalize_unknown_label() {
    assert_eq!(Encoding::normalize("windows-1252"), None);
    assert_eq!(Encoding::normalize("Shift_JIS"), None);
    assert_eq!(Encoding::normalize(""), None);
}

#[test]
fn test_encoding_state_from_label() {
    assert_eq!(
        EncodingState::from_label("UTF8"),
        EncodingState::Known(Encoding::Utf8)
    );
    let state = EncodingState::from_label("windows-1252");
    assert_eq!(state, EncodingState::Unsupported("windows-1252".to_string()));
    assert_eq!(state.name(), "windows-1252");
    assert!(!state.is_saveable());
    assert!(state.known().is_none());
}

#[test]
fn test_saveable_iff_canonical() {
    for encoding in Encoding::ALL {
        assert!(EncodingState::Known(encoding).is_saveable());
    }
    assert!(!EncodingState::Unsupported("EBCDIC".to_string()).is_saveable());
}

#[test]
fn test_latin1_detection_promoted_to_utf8() {
    // The documented product heuristic: a detection of ISO-8859-1 loads as UTF-8
    assert_eq!(
        resolve_detected("ISO-8859-1"),
        EncodingState::Known(Encoding::Utf8)
    );
    assert_eq!(
        resolve_detected("iso-8859-1"),
        EncodingState::Known(Encoding::Utf8)
    );
    // Latin-1 aliases are NOT promoted, only the raw detector label
    assert_eq!(
        resolve_detected("latin1"),
        EncodingState::Known(Encoding::Latin1)
    );
}

#[test]
fn test_resolve_detected_passthrough() {
    assert_eq!(
        resolve_detected("UTF-16BE"),
        EncodingState::Known(Encoding::Utf16Be)
    );
    assert_eq!(
        resolve_detected("windows-1252"),
        EncodingState::Unsupported("windows-1252".to_string())
    );
}

#[test]
fn test_detect_bom() {
    assert_eq!(detect(&[0xEF, 0xBB, 0xBF, b'h', b'i']).label, "UTF-8");
    assert_eq!(detect(&[0xFE, 0xFF, 0x00, b'h']).label, "UTF-16BE");
    assert_eq!(detect(&[0xFF, 0xFE, b'h', 0x00]).label, "UTF-16LE");
    assert_eq!(detect(&[0xEF, 0xBB, 0xBF]).confidence, 100);
}

#[test]
fn test_detect_plain_ascii() {
    let d = detect(b"hello world\n");
    assert_eq!(d.label, "US-ASCII");
}

#[test]
fn test_detect_multibyte_utf8() {
    let d = detect("héllo wörld".as_bytes());
    assert_eq!(d.label, "UTF-8");
}

#[test]
fn test_detect_utf16_without_bom() {
    let be: Vec<u8> = "hello there".encode_utf16().flat_map(u16::to_be_bytes).collect();
    assert_eq!(detect(&be).label, "UTF-16BE");

    let le: Vec<u8> = "hello there".encode_utf16().flat_map(u16::to_le_bytes).collect();
    assert_eq!(detect(&le).label, "UTF-16LE");
}

#[test]
fn test_detect_latin_text() {
    // 0xE9 is not valid UTF-8 on its own; no C1 range bytes present
    assert_eq!(detect(b"caf\xE9").label, "ISO-8859-1");
}

#[test]
fn test_detect_windows_codepage() {
    // 0x93/0x94 are smart quotes in cp1252, C1 controls in ISO-8859-1
    assert_eq!(detect(b"\x93quoted\x94").label, "windows-1252");
}

#[test]
fn test_detect_empty() {
    let d = detect(&[]);
    assert_eq!(d.label, "UTF-8");
    assert!(d.confidence < 50);
}

#[test]
fn test_decode_utf8_strips_bom() {
    let bytes = [0xEF, 0xBB, 0xBF, b'o', b'k'];
    assert_eq!(decode(&bytes, &EncodingState::Known(Encoding::Utf8)), "ok");
}

#[test]
fn test_decode_utf16_bom_selects_order() {
    let state = EncodingState::Known(Encoding::Utf16);
    let mut be = vec![0xFE, 0xFF];
    be.extend("hi".encode_utf16().flat_map(u16::to_be_bytes));
    assert_eq!(decode(&be, &state), "hi");

    let mut le = vec![0xFF, 0xFE];
    le.extend("hi".encode_utf16().flat_map(u16::to_le_bytes));
    assert_eq!(decode(&le, &state), "hi");

    // No BOM defaults to big-endian
    let bare: Vec<u8> = "hi".encode_utf16().flat_map(u16::to_be_bytes).collect();
    assert_eq!(decode(&bare, &state), "hi");
}

#[test]
fn test_decode_ascii_replaces_high_bytes() {
    let decoded = decode(b"ok\xFF", &EncodingState::Known(Encoding::UsAscii));
    assert_eq!(decoded, "ok\u{FFFD}");
}

#[test]
fn test_decode_latin1_maps_bytes_directly() {
    let decoded = decode(b"caf\xE9", &EncodingState::Known(Encoding::Latin1));
    assert_eq!(decoded, "café");
}

#[test]
fn test_decode_unsupported_falls_back_lossy() {
    let decoded = decode(b"a\x93b", &EncodingState::Unsupported("windows-1252".into()));
    assert_eq!(decoded, "a\u{FFFD}b");
}

#[test]
fn test_encode_decode_round_trip() {
    let unicode = "Grüße 三";
    let cases: &[(Encoding, &str)] = &[
        (Encoding::Utf8, unicode),
        (Encoding::Utf16, unicode),
        (Encoding::Utf16Be, unicode),
        (Encoding::Utf16Le, unicode),
        (Encoding::UsAscii, "plain ascii text\n"),
        (Encoding::Latin1, "Grüße"),
    ];
    for (encoding, text) in cases {
        let bytes = encode(text, *encoding);
        let decoded = decode(&bytes, &EncodingState::Known(*encoding));
        assert_eq!(&decoded, text, "round trip failed for {}", encoding);
    }
}

#[test]
fn test_encode_utf16_writes_bom() {
    let bytes = encode("a", Encoding::Utf16);
    assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
    // Explicit-endian variants carry no BOM
    assert_eq!(encode("a", Encoding::Utf16Be), vec![0x00, b'a']);
    assert_eq!(encode("a", Encoding::Utf16Le), vec![b'a', 0x00]);
}

#[test]
fn test_encode_unmappable_replacement() {
    assert_eq!(encode("a三b", Encoding::UsAscii), b"a?b".to_vec());
    assert_eq!(encode("a三b", Encoding::Latin1), b"a?b".to_vec());
}

#[test]
fn test_leading_bom_is_framing_not_content() {
    // A byte-order mark at the front decodes away; it is not restored by
    // encode for the BOM-less variants
    let decoded = decode(&[0xEF, 0xBB, 0xBF, b'x'], &EncodingState::Known(Encoding::Utf8));
    assert_eq!(decoded, "x");
    assert_eq!(encode(&decoded, Encoding::Utf8), b"x".to_vec());

    let be = [0xFE, 0xFF, 0x00, b'x'];
    let decoded = decode(&be, &EncodingState::Known(Encoding::Utf16Be));
    assert_eq!(decoded, "x");
    assert_eq!(encode(&decoded, Encoding::Utf16Be), vec![0x00, b'x']);

    // Only plain UTF-16 writes the mark back
    assert_eq!(&encode("x", Encoding::Utf16)[..2], &[0xFE, 0xFF]);
}

#[test]
fn test_decode_utf16_odd_length() {
    let bytes = [0x00, b'a', 0x42];
    let decoded = decode(&bytes, &EncodingState::Known(Encoding::Utf16Be));
    assert_eq!(decoded, "a\u{FFFD}");
}
