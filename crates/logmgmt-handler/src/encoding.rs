//! Output character encodings

use crate::error::UnsupportedEncoding;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Character set used to encode formatted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8 (platform default)
    #[default]
    Utf8,
    /// 7-bit ASCII
    UsAscii,
    /// Latin-1
    Iso8859_1,
    /// UTF-16, big endian
    Utf16Be,
    /// UTF-16, little endian
    Utf16Le,
}

impl Charset {
    const ALIASES: [(Charset, &'static [&'static str]); 5] = [
        (Charset::Utf8, &["utf-8", "utf8", "unicode-1-1-utf-8"]),
        (
            Charset::UsAscii,
            &["us-ascii", "ascii", "iso646-us", "ansi_x3.4-1968", "646"],
        ),
        (
            Charset::Iso8859_1,
            &["iso-8859-1", "iso8859-1", "iso8859_1", "latin1", "l1", "cp819"],
        ),
        (Charset::Utf16Be, &["utf-16be", "utf_16be", "x-utf-16be", "unicodebigunmarked"]),
        (Charset::Utf16Le, &["utf-16le", "utf_16le", "x-utf-16le", "unicodelittleunmarked"]),
    ];

    /// Look up a charset by canonical name or alias (case-insensitive)
    ///
    /// # Errors
    /// Returns [`UnsupportedEncoding`] for unknown names.
    pub fn for_name(name: &str) -> Result<Self, UnsupportedEncoding> {
        let wanted = name.trim();
        Self::ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted)))
            .map(|(charset, _)| *charset)
            .ok_or_else(|| UnsupportedEncoding {
                name: name.to_string(),
            })
    }

    /// Canonical name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::UsAscii => "US-ASCII",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    /// Encode text; characters the charset cannot represent become `?`
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

impl Display for Charset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = UnsupportedEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_aliases() {
        assert_eq!(Charset::for_name("UTF-8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::for_name("utf8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::for_name("Latin1").unwrap(), Charset::Iso8859_1);
        assert_eq!(Charset::for_name("ASCII").unwrap(), Charset::UsAscii);
    }

    #[test]
    fn lookup_rejects_unknown() {
        let err = Charset::for_name("not-a-real-encoding").unwrap_err();
        assert_eq!(err.name, "not-a-real-encoding");
    }

    #[test]
    fn encode_replaces_unmappable() {
        assert_eq!(Charset::UsAscii.encode("caf\u{e9}"), b"caf?".to_vec());
        assert_eq!(Charset::Iso8859_1.encode("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(Charset::Iso8859_1.encode("\u{20ac}"), b"?".to_vec());
    }

    #[test]
    fn encode_utf16() {
        assert_eq!(Charset::Utf16Be.encode("A"), vec![0x00, 0x41]);
        assert_eq!(Charset::Utf16Le.encode("A"), vec![0x41, 0x00]);
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Charset::for_name("l1").unwrap().to_string(), "ISO-8859-1");
    }
}
