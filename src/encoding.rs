//! Source encoding to UTF-8 transcoding.
//!
//! String-producing collectors share one `Transcoder`. Bytes after an
//! embedded NUL are dropped, which keeps the readable prefix of the value.

use crate::error::{ReadError, Result};
use encoding_rs::{Encoding, UTF_8};

/// Converts raw token bytes into canonical UTF-8 text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoder {
    encoding: &'static Encoding,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}

impl Transcoder {
    /// Look up a transcoder by WHATWG encoding label (`UTF-8`, `latin1`, `windows-1252`, ...)
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| ReadError::configuration(format!("unknown encoding '{}'", label)))
    }

    /// Canonical name of the source encoding
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode `bytes` into a `String`.
    ///
    /// When `has_null` is set the value is cut at the first NUL byte.
    /// Malformed sequences are replaced with U+FFFD.
    pub fn make_string(&self, bytes: &[u8], has_null: bool) -> String {
        let bytes = if has_null {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            &bytes[..end]
        } else {
            bytes
        };

        let (text, _had_errors) = self.encoding.decode_without_bom_handling(bytes);
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let t = Transcoder::default();
        assert_eq!(t.make_string("héllo".as_bytes(), false), "héllo");
        assert_eq!(t.name(), "UTF-8");
    }

    #[test]
    fn test_latin1_decoding() {
        let t = Transcoder::for_label("latin1").unwrap();
        assert_eq!(t.make_string(&[0x63, 0x61, 0x66, 0xE9], false), "café");
    }

    #[test]
    fn test_embedded_null_truncates() {
        let t = Transcoder::default();
        assert_eq!(t.make_string(b"ab\0cd", true), "ab");
    }

    #[test]
    fn test_unknown_label() {
        assert!(Transcoder::for_label("klingon").is_err());
    }
}
