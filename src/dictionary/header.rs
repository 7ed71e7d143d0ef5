//! Dictionary header parsing (§3.1).

use crate::constants::magic;
use crate::dictionary::reader::ByteReader;
use crate::error::{EngineError, Result};

/// Parsed v1/v2 dictionary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub option_flags: u16,
    /// Byte offset of the root PtNode array, i.e. end of the header.
    pub body_offset: usize,
}

impl Header {
    /// True if the dictionary requires German-umlaut digraph expansion.
    #[must_use]
    pub fn requires_german_umlaut(&self) -> bool {
        self.option_flags & crate::constants::header_flags::REQUIRES_GERMAN_UMLAUT_PROCESSING != 0
    }

    /// True if the dictionary requires French-ligature digraph expansion.
    #[must_use]
    pub fn requires_french_ligatures(&self) -> bool {
        self.option_flags & crate::constants::header_flags::REQUIRES_FRENCH_LIGATURES_PROCESSING
            != 0
    }
}

/// Parses the 4-byte magic plus whichever of the v1/v2 header shapes
/// follows it.
pub fn parse(buf: &[u8]) -> Result<Header> {
    let mut r = ByteReader::new(buf, 0);
    let magic_bytes = r.take_checked(4)?;
    let magic_arr: [u8; 4] = magic_bytes.try_into().expect("took exactly 4 bytes");

    if magic_arr == magic::DICT_V1 {
        // v1: 5-byte header total, no flags, no stored length.
        r.take_checked(1)?;
        Ok(Header {
            version: 1,
            option_flags: 0,
            body_offset: r.pos(),
        })
    } else if magic_arr == magic::DICT_V2 {
        let version = r.read_u16_be_checked()?;
        let option_flags = r.read_u16_be_checked()?;
        let header_length = r.read_u32_be_checked()? as usize;
        if header_length < r.pos() {
            return Err(EngineError::TruncatedHeader {
                expected: r.pos(),
                actual: header_length,
            });
        }
        if header_length > buf.len() {
            return Err(EngineError::TruncatedHeader {
                expected: header_length,
                actual: buf.len(),
            });
        }
        Ok(Header {
            version,
            option_flags,
            body_offset: header_length,
        })
    } else {
        Err(EngineError::UnknownMagic { magic: magic_arr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_v1() {
        let mut buf = magic::DICT_V1.to_vec();
        buf.push(0x00); // single reserved byte
        let h = parse(&buf).unwrap();
        assert_eq!(h.version, 1);
        assert_eq!(h.body_offset, 5);
        assert_eq!(h.option_flags, 0);
    }

    #[test]
    fn test_parse_v2() {
        let mut buf = magic::DICT_V2.to_vec();
        buf.extend_from_slice(&[0x00, 0x02]); // version
        buf.extend_from_slice(&[0x00, 0x01]); // german umlaut flag
        let header_len: u32 = 12;
        buf.extend_from_slice(&header_len.to_be_bytes());
        let h = parse(&buf).unwrap();
        assert_eq!(h.version, 2);
        assert!(h.requires_german_umlaut());
        assert!(!h.requires_french_ligatures());
        assert_eq!(h.body_offset, 12);
    }

    #[test]
    fn test_unknown_magic_rejected() {
        let buf = [0u8, 1, 2, 3];
        assert!(matches!(
            parse(&buf),
            Err(EngineError::UnknownMagic { .. })
        ));
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        let buf = [0x78u8, 0xB1];
        assert!(matches!(
            parse(&buf),
            Err(EngineError::TruncatedHeader { .. })
        ));
    }
}
