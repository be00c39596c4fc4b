//! Character encoding support
//! Canonical encodings, alias resolution, detection, and byte <-> text conversion

use std::fmt;

pub mod detector;

pub use detector::{detect, Detection};

/// The closed set of encodings a document may be saved as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16,
    Utf16Be,
    Utf16Le,
    UsAscii,
    Latin1,
}

/// Alias table entry: canonical member plus every name that resolves to it.
/// Alias sets are disjoint; `tests.rs` enforces this.
struct AliasEntry {
    encoding: Encoding,
    canonical: &'static str,
    aliases: &'static [&'static str],
}

static ALIAS_TABLE: &[AliasEntry] = &[
    AliasEntry {
        encoding: Encoding::Utf8,
        canonical: "UTF-8",
        aliases: &["UTF8", "unicode-1-1-utf-8"],
    },
    AliasEntry {
        encoding: Encoding::Utf16,
        canonical: "UTF-16",
        aliases: &["UTF_16", "utf16", "unicode", "UnicodeBig"],
    },
    AliasEntry {
        encoding: Encoding::Utf16Be,
        canonical: "UTF-16BE",
        aliases: &["UTF_16BE", "X-UTF-16BE", "ISO-10646-UCS-2", "UnicodeBigUnmarked"],
    },
    AliasEntry {
        encoding: Encoding::Utf16Le,
        canonical: "UTF-16LE",
        aliases: &["UTF_16LE", "X-UTF-16LE", "UnicodeLittleUnmarked", "UnicodeLittle"],
    },
    AliasEntry {
        encoding: Encoding::UsAscii,
        canonical: "US-ASCII",
        aliases: &[
            "ASCII",
            "US",
            "ISO646-US",
            "iso-ir-6",
            "646",
            "csASCII",
            "ANSI_X3.4-1968",
            "cp367",
        ],
    },
    AliasEntry {
        encoding: Encoding::Latin1,
        canonical: "ISO-8859-1",
        aliases: &[
            "ISO_8859-1",
            "ISO8859-1",
            "8859_1",
            "latin1",
            "l1",
            "cp819",
            "IBM819",
            "csISOLatin1",
            "iso-ir-100",
        ],
    },
];

impl Encoding {
    /// All canonical members, in display order
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Utf16,
        Encoding::Utf16Be,
        Encoding::Utf16Le,
        Encoding::UsAscii,
        Encoding::Latin1,
    ];

    fn entry(&self) -> &'static AliasEntry {
        ALIAS_TABLE
            .iter()
            .find(|e| e.encoding == *self)
            .unwrap_or(&ALIAS_TABLE[0])
    }

    /// The canonical name persisted alongside documents and shown in the UI
    #[must_use]
    pub fn canonical_name(&self) -> &'static str {
        self.entry().canonical
    }

    /// Known alternate names for this encoding
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.entry().aliases
    }

    /// Resolve a raw charset label to a canonical member.
    ///
    /// Checks the canonical name first, then alias membership. Matching is
    /// ASCII case-insensitive. Returns `None` for labels no canonical
    /// member owns; such labels are a legitimate observable state
    /// (legacy code-page text), not an error.
    #[must_use]
    pub fn normalize(label: &str) -> Option<Encoding> {
        for entry in ALIAS_TABLE {
            if entry.canonical.eq_ignore_ascii_case(label) {
                return Some(entry.encoding);
            }
        }
        for entry in ALIAS_TABLE {
            if entry.aliases.iter().any(|a| a.eq_ignore_ascii_case(label)) {
                return Some(entry.encoding);
            }
        }
        None
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// A document's encoding as observed at load time.
///
/// Files must always open, even when the detector reports a charset outside
/// the canonical set, so the unsupported label is carried for display and
/// blocks saving until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingState {
    /// One of the six canonical encodings
    Known(Encoding),
    /// A raw detected label no canonical member owns
    Unsupported(String),
}

impl EncodingState {
    /// Resolve a raw label into a state, canonical or unsupported
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match Encoding::normalize(label) {
            Some(encoding) => EncodingState::Known(encoding),
            None => EncodingState::Unsupported(label.to_string()),
        }
    }

    /// Name to display for this state
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            EncodingState::Known(e) => e.canonical_name(),
            EncodingState::Unsupported(label) => label,
        }
    }

    /// Whether a save may proceed with this encoding.
    /// True iff the encoding is one of the six canonical members.
    #[must_use]
    pub fn is_saveable(&self) -> bool {
        matches!(self, EncodingState::Known(_))
    }

    /// The canonical encoding, if there is one
    #[must_use]
    pub fn known(&self) -> Option<Encoding> {
        match self {
            EncodingState::Known(e) => Some(*e),
            EncodingState::Unsupported(_) => None,
        }
    }
}

impl Default for EncodingState {
    fn default() -> Self {
        EncodingState::Known(Encoding::Utf8)
    }
}

/// Resolve a freshly detected charset label for a loading document.
///
/// A detection of ISO-8859-1 is promoted to UTF-8 before normalization:
/// most "Latin-1-looking" files are valid UTF-8 the detector under-matched.
/// Known limitation: genuinely Latin-1 text whose high bytes happen to form
/// valid UTF-8 sequences is mis-handled by this promotion; the behavior is
/// kept for compatibility with the shipped product.
#[must_use]
pub fn resolve_detected(label: &str) -> EncodingState {
    if label.eq_ignore_ascii_case("ISO-8859-1") {
        return EncodingState::Known(Encoding::Utf8);
    }
    EncodingState::from_label(label)
}

/// UTF-8 byte-order mark
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decode raw bytes under the given encoding state.
///
/// Never fails: malformed sequences decode to U+FFFD, and an unsupported
/// state falls back to lossy UTF-8 so the file still opens.
///
/// A leading byte-order mark is treated as framing and stripped for UTF-8
/// and both explicit-endian UTF-16 variants. [`encode`] writes a mark only
/// for plain UTF-16, so text whose first character is U+FEFF does not
/// round-trip byte-exactly under the other variants; the mark is absorbed
/// into the encoding name instead of the text.
#[must_use]
pub fn decode(bytes: &[u8], state: &EncodingState) -> String {
    match state {
        EncodingState::Known(Encoding::Utf8) => {
            let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
            String::from_utf8_lossy(body).into_owned()
        }
        EncodingState::Known(Encoding::Utf16) => {
            // BOM selects the byte order, big-endian without one
            if bytes.starts_with(&[0xFF, 0xFE]) {
                decode_utf16_units(&bytes[2..], u16::from_le_bytes)
            } else if bytes.starts_with(&[0xFE, 0xFF]) {
                decode_utf16_units(&bytes[2..], u16::from_be_bytes)
            } else {
                decode_utf16_units(bytes, u16::from_be_bytes)
            }
        }
        EncodingState::Known(Encoding::Utf16Be) => {
            // Detection reports UTF-16BE for BOM-carrying files; the mark
            // is framing, not content
            let body = bytes.strip_prefix(&[0xFE, 0xFF][..]).unwrap_or(bytes);
            decode_utf16_units(body, u16::from_be_bytes)
        }
        EncodingState::Known(Encoding::Utf16Le) => {
            let body = bytes.strip_prefix(&[0xFF, 0xFE][..]).unwrap_or(bytes);
            decode_utf16_units(body, u16::from_le_bytes)
        }
        EncodingState::Known(Encoding::UsAscii) => bytes
            .iter()
            .map(|&b| if b < 0x80 { b as char } else { '\u{FFFD}' })
            .collect(),
        EncodingState::Known(Encoding::Latin1) => bytes.iter().map(|&b| b as char).collect(),
        EncodingState::Unsupported(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16_units(bytes: &[u8], read: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| read([pair[0], pair[1]]))
        .collect();
    let mut text: String = char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or('\u{FFFD}'))
        .collect();
    // Odd trailing byte is malformed input
    if bytes.len() % 2 != 0 {
        text.push('\u{FFFD}');
    }
    text
}

/// Encode text under a canonical encoding.
///
/// Characters the target cannot represent become `?`, matching the
/// replacement the shipped product's encoders used. UTF-16 writes a
/// big-endian byte-order mark; the explicit-endian variants write none.
#[must_use]
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf16 => {
            let mut out = vec![0xFE, 0xFF];
            push_utf16_units(text, u16::to_be_bytes, &mut out);
            out
        }
        Encoding::Utf16Be => {
            let mut out = Vec::with_capacity(text.len() * 2);
            push_utf16_units(text, u16::to_be_bytes, &mut out);
            out
        }
        Encoding::Utf16Le => {
            let mut out = Vec::with_capacity(text.len() * 2);
            push_utf16_units(text, u16::to_le_bytes, &mut out);
            out
        }
        Encoding::UsAscii => text
            .chars()
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect(),
        Encoding::Latin1 => text
            .chars()
            .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
            .collect(),
    }
}

fn push_utf16_units(text: &str, write: fn(u16) -> [u8; 2], out: &mut Vec<u8>) {
    for unit in text.encode_utf16() {
        out.extend_from_slice(&write(unit));
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
