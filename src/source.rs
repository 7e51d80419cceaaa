//! Byte-level boundary scanning used before tokenizing.
//!
//! Finds where data starts in a raw buffer: past a byte order mark and past a
//! number of leading lines. Line counting is quote-aware and ignores comment
//! lines, but does not interpret escaped or doubled quotes.

use crate::constants::{BOM_UTF8, BOM_UTF16_BE, BOM_UTF16_LE, BOM_UTF32_BE, BOM_UTF32_LE};
use tracing::debug;

/// Unicode byte order marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrderMark {
    Utf32Be,
    Utf32Le,
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl ByteOrderMark {
    /// Marker bytes, longest forms first so that UTF-32LE wins over UTF-16LE
    const CANDIDATES: [(ByteOrderMark, &'static [u8]); 5] = [
        (ByteOrderMark::Utf32Be, BOM_UTF32_BE),
        (ByteOrderMark::Utf32Le, BOM_UTF32_LE),
        (ByteOrderMark::Utf8, BOM_UTF8),
        (ByteOrderMark::Utf16Be, BOM_UTF16_BE),
        (ByteOrderMark::Utf16Le, BOM_UTF16_LE),
    ];

    pub fn bytes(&self) -> &'static [u8] {
        match self {
            ByteOrderMark::Utf32Be => BOM_UTF32_BE,
            ByteOrderMark::Utf32Le => BOM_UTF32_LE,
            ByteOrderMark::Utf8 => BOM_UTF8,
            ByteOrderMark::Utf16Be => BOM_UTF16_BE,
            ByteOrderMark::Utf16Le => BOM_UTF16_LE,
        }
    }

    /// Length of the marker in bytes
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Encoding label accepted by `Transcoder::for_label`; `None` for the
    /// UTF-32 forms, which have no decoder
    pub fn encoding_label(&self) -> Option<&'static str> {
        match self {
            ByteOrderMark::Utf32Be | ByteOrderMark::Utf32Le => None,
            ByteOrderMark::Utf8 => Some("UTF-8"),
            ByteOrderMark::Utf16Be => Some("UTF-16BE"),
            ByteOrderMark::Utf16Le => Some("UTF-16LE"),
        }
    }
}

/// Identify the byte order mark at the start of `data`, if any
pub fn detect_bom(data: &[u8]) -> Option<ByteOrderMark> {
    ByteOrderMark::CANDIDATES
        .iter()
        .find(|(_, marker)| data.starts_with(marker))
        .map(|(bom, _)| *bom)
}

/// Number of leading bytes occupied by a byte order mark (0 if none)
pub fn skip_bom(data: &[u8]) -> usize {
    detect_bom(data).map_or(0, |bom| bom.len())
}

/// Offset just past the `n`-th counted line break of `data`, or `data.len()`
/// if the input runs out first.
///
/// A line break is `\n`, `\r` or `\r\n`. Breaks inside double-quoted spans do
/// not count. Lines starting with `comment` (when non-empty) and blank lines
/// are passed over without counting.
pub fn skip_lines(data: &[u8], n: usize, comment: &str) -> usize {
    let comment = comment.as_bytes();
    let has_comment = !comment.is_empty();

    let mut remaining = n;
    let mut is_comment = false;
    let mut line_start = true;
    let mut in_quote = false;
    let mut cur = 0;

    while remaining > 0 && cur < data.len() {
        if line_start {
            is_comment = has_comment && data[cur..].starts_with(comment);
        }

        let byte = data[cur];

        if byte == b'"' {
            in_quote = !in_quote;
            line_start = false;
            cur += 1;
            continue;
        }

        if in_quote {
            cur += 1;
            continue;
        }

        match byte {
            b'\r' | b'\n' => {
                if byte == b'\r' && data.get(cur + 1) == Some(&b'\n') {
                    cur += 1;
                }
                if !(is_comment || line_start) {
                    remaining -= 1;
                }
                line_start = true;
            }
            _ if line_start => line_start = false,
            _ => {}
        }

        cur += 1;
    }

    cur
}

/// Offset of the first data byte: past any byte order mark, then past `skip`
/// counted lines.
pub fn data_start(data: &[u8], skip: usize, comment: &str) -> usize {
    let bom = skip_bom(data);
    let start = bom + skip_lines(&data[bom..], skip, comment);
    debug!(
        "Data starts at byte {} (bom={} bytes, skipped {} lines)",
        start, bom, skip
    );
    start
}
