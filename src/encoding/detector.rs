//! Charset detection
//! Byte-order-mark sniffing plus statistical byte-pattern scoring

/// Result of sniffing a raw byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Raw charset label; may or may not resolve to a canonical encoding
    pub label: String,
    /// Rough confidence, 0-100. Opaque to downstream code: only the label
    /// feeds the load pipeline.
    pub confidence: u8,
}

impl Detection {
    fn new(label: &str, confidence: u8) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}

/// Guess the most likely source encoding of a byte buffer.
///
/// Pure and infallible: every input, including empty, produces a label.
#[must_use]
pub fn detect(bytes: &[u8]) -> Detection {
    if bytes.is_empty() {
        return Detection::new("UTF-8", 10);
    }

    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Detection::new("UTF-8", 100);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Detection::new("UTF-16BE", 100);
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Detection::new("UTF-16LE", 100);
    }

    // BOM-less UTF-16 shows up as NUL bytes alternating with ASCII, and
    // NUL is both "ASCII" and valid UTF-8, so this test must come first
    if bytes.contains(&0x00) {
        if let Some(detection) = detect_utf16_without_bom(bytes) {
            return detection;
        }
    }

    if bytes.iter().all(|&b| is_ascii_text(b)) {
        return Detection::new("US-ASCII", 90);
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Detection::new("UTF-8", 80);
    }

    // High bytes that are not UTF-8: a Latin-looking single-byte charset.
    // 0x80-0x9F is the C1 control range, unused by ISO-8859-1 text but
    // heavily used by the Windows code pages.
    if bytes.iter().any(|&b| (0x80..0xA0).contains(&b)) {
        return Detection::new("windows-1252", 30);
    }
    Detection::new("ISO-8859-1", 50)
}

/// Printable ASCII plus the usual text controls; NUL and friends are not
/// ASCII text
fn is_ascii_text(b: u8) -> bool {
    (0x20..0x7F).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn detect_utf16_without_bom(bytes: &[u8]) -> Option<Detection> {
    let sample = &bytes[..bytes.len().min(512)];
    let pairs = sample.len() / 2;
    if pairs == 0 {
        return None;
    }

    let mut zero_even = 0usize;
    let mut zero_odd = 0usize;
    for (i, &b) in sample.iter().enumerate() {
        if b == 0 {
            if i % 2 == 0 {
                zero_even += 1;
            } else {
                zero_odd += 1;
            }
        }
    }

    // ASCII-heavy UTF-16 zeroes the high byte of most units
    if zero_even * 2 >= pairs && zero_even > zero_odd * 2 {
        return Some(Detection::new("UTF-16BE", 70));
    }
    if zero_odd * 2 >= pairs && zero_odd > zero_even * 2 {
        return Some(Detection::new("UTF-16LE", 70));
    }
    None
}
