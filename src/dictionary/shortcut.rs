//! Shortcut list decoding (§3.3).

use crate::constants::{shortcut_flags, NOT_A_CHARACTER};
use crate::dictionary::reader::ByteReader;

/// One whitelist/shortcut target attached to a PtNode.
#[derive(Debug, Clone)]
pub struct ShortcutEntry {
    pub target: Vec<u16>,
    pub probability: u8,
    pub is_whitelist: bool,
}

/// Decodes the shortcut list starting at `pos` (the position returned as
/// `shortcuts_pos` by [`crate::dictionary::trie::next_entry`]). The first
/// two bytes are the total byte length of the whole list (including
/// itself); entries follow until one lacks `HAS_NEXT`.
#[must_use]
pub fn read_shortcut_list(buf: &[u8], pos: usize) -> Vec<ShortcutEntry> {
    let mut r = ByteReader::new(buf, pos);
    let Some(_total_len) = r.read_u16_be() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    loop {
        let Some(flags) = r.read_u8() else { break };
        let mut target = Vec::new();
        loop {
            match r.read_code_point() {
                Some(c) if c != NOT_A_CHARACTER => target.push(u16::try_from(c).unwrap_or(0xFFFD)),
                _ => break,
            }
        }
        out.push(ShortcutEntry {
            target,
            probability: flags & shortcut_flags::PROBABILITY_MASK,
            is_whitelist: (flags & shortcut_flags::PROBABILITY_MASK) as u8
                == shortcut_flags::WHITELIST as u8,
        });
        if flags & shortcut_flags::HAS_NEXT == 0 {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_whitelist_shortcut() {
        let mut buf = vec![0u8, 0u8]; // total_len placeholder
        let flags = shortcut_flags::WHITELIST as u8; // no HAS_NEXT
        buf.push(flags);
        buf.extend_from_slice(b"ok");
        buf.push(0x1F);
        let total_len = buf.len() as u16;
        buf[0..2].copy_from_slice(&total_len.to_be_bytes());

        let entries = read_shortcut_list(&buf, 0);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_whitelist);
        assert_eq!(entries[0].target, vec![u16::from(b'o'), u16::from(b'k')]);
    }
}
