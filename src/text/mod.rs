//! Indexed text
//!
//! A [`Text`] is an immutable byte sequence whose final byte is a sentinel
//! that occurs nowhere else. The sentinel guarantees that no suffix is a
//! prefix of another suffix, so every suffix ends in its own leaf.
//!
//! ## Sources
//!
//! - [`random_text`] - uniformly random symbols over `[1, alphabet_size]`
//! - [`load_text`] - file contents with line terminators removed

pub mod source;

pub use source::{load_text, random_text};

use anyhow::{bail, ensure, Result};
use std::fmt;

/// Sentinel byte appended to generated and loaded texts
pub const DEFAULT_SENTINEL: u8 = 0x00;

/// Immutable text terminated by a unique sentinel
#[derive(Clone, PartialEq, Eq)]
pub struct Text {
    bytes: Vec<u8>,
}

impl Text {
    /// Wrap bytes whose last byte is the sentinel.
    ///
    /// Fails if the last byte appears anywhere else in the sequence.
    /// An empty sequence is accepted and yields the empty text.
    pub fn from_terminated(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if let Some((&sentinel, body)) = bytes.split_last() {
            if let Some(pos) = memchr::memchr(sentinel, body) {
                bail!(
                    "sentinel {:#04x} also occurs at position {} of {}",
                    sentinel,
                    pos,
                    bytes.len()
                );
            }
        }
        Ok(Self { bytes })
    }

    /// Append `sentinel` to `body`.
    pub fn with_sentinel(body: impl Into<Vec<u8>>, sentinel: u8) -> Result<Self> {
        let mut bytes = body.into();
        ensure!(
            memchr::memchr(sentinel, &bytes).is_none(),
            "text body contains the sentinel byte {:#04x}",
            sentinel
        );
        bytes.push(sentinel);
        Ok(Self { bytes })
    }

    /// Number of symbols including the sentinel
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The terminating symbol, `None` for the empty text
    pub fn sentinel(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    /// Suffix starting at `start`
    #[inline]
    pub fn suffix(&self, start: usize) -> &[u8] {
        &self.bytes[start..]
    }

    /// Bytes of `[location, location + length)`
    #[inline]
    pub fn slice(&self, location: usize, length: usize) -> &[u8] {
        &self.bytes[location..location + length]
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("len", &self.len())
            .field("bytes", &escape_bytes(&self.bytes))
            .finish()
    }
}

/// Render bytes for diagnostics: printable ASCII as-is, everything else escaped
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{:02x}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terminated() {
        let text = Text::from_terminated(b"banana$".to_vec()).unwrap();
        assert_eq!(text.len(), 7);
        assert_eq!(text.sentinel(), Some(b'$'));
        assert_eq!(text.suffix(3), b"ana$");
        assert_eq!(text.slice(1, 3), b"ana");
    }

    #[test]
    fn test_repeated_sentinel_rejected() {
        assert!(Text::from_terminated(b"ba$nana$".to_vec()).is_err());
    }

    #[test]
    fn test_with_sentinel() {
        let text = Text::with_sentinel(b"abc".to_vec(), DEFAULT_SENTINEL).unwrap();
        assert_eq!(text.as_bytes(), b"abc\x00");
        assert!(Text::with_sentinel(b"a\x00c".to_vec(), DEFAULT_SENTINEL).is_err());
    }

    #[test]
    fn test_empty_text() {
        let text = Text::from_terminated(Vec::new()).unwrap();
        assert!(text.is_empty());
        assert_eq!(text.sentinel(), None);
    }

    #[test]
    fn test_escape_bytes() {
        assert_eq!(escape_bytes(b"ab\x00"), "ab\\x00");
        assert_eq!(escape_bytes(b"a b"), "a b");
    }
}
