//! PtNode array traversal primitives (C3, §3.1, §4.1).
//!
//! A PtNode array is a sequence of sibling entries sharing one parent.
//! [`next_entry`] decodes one entry and advances a [`ByteReader`] past it
//! (including any shortcut/bigram lists attached to it), so callers can
//! walk a whole array with a simple loop, or jump straight to a known
//! array position and decode just the entries they need.

use crate::constants::{bigram_flags, node_flags, shortcut_flags, NOT_A_CHARACTER, NOT_VALID_WORD};
use crate::dictionary::reader::ByteReader;

/// One decoded PtNode array entry (a single edge out of the parent).
#[derive(Debug, Clone)]
pub struct PtNodeEntry {
    /// Position of this entry's flags byte — the "terminal position"
    /// used by bigram targets and shortcut/bigram reverse lookup.
    pub start_pos: usize,
    pub flags: u8,
    /// The 1+ code points labelling this edge.
    pub chars: Vec<u16>,
    pub frequency: Option<u8>,
    /// Byte position of this entry's first child PtNode array, if any.
    pub children_pos: Option<usize>,
    /// Byte position of the shortcut list, if `HAS_SHORTCUT_TARGETS`.
    pub shortcuts_pos: Option<usize>,
    /// Byte position of the bigram list, if `HAS_BIGRAMS`.
    pub bigrams_pos: Option<usize>,
    /// Position immediately after this entry (start of the next sibling).
    pub end_pos: usize,
}

impl PtNodeEntry {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.flags & node_flags::IS_TERMINAL != 0
    }

    #[must_use]
    pub fn is_not_a_word(&self) -> bool {
        self.flags & node_flags::IS_NOT_A_WORD != 0
    }

    #[must_use]
    pub fn is_blacklisted(&self) -> bool {
        self.flags & node_flags::IS_BLACKLISTED != 0
    }
}

/// Reads the group-count-prefixed header of a PtNode array and returns
/// the count plus the position of the first entry. `None` on truncation.
pub fn read_group_header(buf: &[u8], pos: usize) -> Option<(u16, usize)> {
    let mut r = ByteReader::new(buf, pos);
    let count = r.read_group_count()?;
    Some((count, r.pos()))
}

fn read_children_offset(r: &mut ByteReader, flags: u8) -> Option<usize> {
    let origin = r.pos();
    match flags & node_flags::ADDRESS_TYPE_MASK {
        node_flags::ADDRESS_TYPE_NONE => None,
        node_flags::ADDRESS_TYPE_ONEBYTE => {
            let b0 = r.read_u8()?;
            Some(origin + usize::from(b0))
        }
        node_flags::ADDRESS_TYPE_TWOBYTES => {
            let b0 = r.read_u8()?;
            let b1 = r.read_u8()?;
            Some(origin + ((usize::from(b0) << 8) | usize::from(b1)))
        }
        _ => {
            // THREEBYTES (0xC0) is the only remaining case.
            let b0 = r.read_u8()?;
            let b1 = r.read_u8()?;
            let b2 = r.read_u8()?;
            Some(origin + ((usize::from(b0) << 16) | (usize::from(b1) << 8) | usize::from(b2)))
        }
    }
}

/// `readBigramAttributeAddress`: like [`read_children_offset`] but signed
/// via the `OFFSET_NEGATIVE` bit, and sized from the bigram entry's own
/// 2-bit address-type field.
fn read_bigram_offset(r: &mut ByteReader, entry_flags: u8) -> Option<i64> {
    let origin = r.pos() as i64;
    let size = match entry_flags & bigram_flags::ADDRESS_TYPE_MASK {
        0x10 => 1,
        0x20 => 2,
        0x30 => 3,
        _ => 0,
    };
    let mut magnitude: i64 = 0;
    for _ in 0..size {
        magnitude = (magnitude << 8) | i64::from(r.read_u8()?);
    }
    if entry_flags & bigram_flags::OFFSET_NEGATIVE != 0 {
        Some(origin - magnitude)
    } else {
        Some(origin + magnitude)
    }
}

fn skip_shortcuts(r: &mut ByteReader) -> Option<usize> {
    let start = r.pos();
    let total_len = r.read_u16_be()?;
    r.seek(start + usize::from(total_len));
    Some(start)
}

fn skip_bigrams(r: &mut ByteReader) -> Option<usize> {
    let start = r.pos();
    loop {
        let flags = r.read_u8()?;
        let _ = read_bigram_offset(r, flags)?;
        if flags & bigram_flags::HAS_NEXT == 0 {
            break;
        }
    }
    Some(start)
}

/// Decodes one PtNode array entry starting at `pos`, advancing past its
/// shortcut/bigram lists. Returns `None` on truncation (malformed
/// interior node — caller treats this as "stop descending here", never
/// an error per §7).
pub fn next_entry(buf: &[u8], pos: usize) -> Option<PtNodeEntry> {
    let mut r = ByteReader::new(buf, pos);
    let start_pos = r.pos();
    let flags = r.read_u8()?;

    let mut chars = Vec::new();
    if flags & node_flags::HAS_MULTIPLE_CHARS != 0 {
        loop {
            let c = r.read_code_point()?;
            if c == NOT_A_CHARACTER {
                break;
            }
            chars.push(truncate_cp(c));
        }
    } else {
        let c = r.read_code_point()?;
        chars.push(truncate_cp(c));
    }

    let frequency = if flags & node_flags::IS_TERMINAL != 0 {
        Some(r.read_u8()?)
    } else {
        None
    };

    let children_pos = read_children_offset(&mut r, flags);

    let shortcuts_pos = if flags & node_flags::HAS_SHORTCUT_TARGETS != 0 {
        skip_shortcuts(&mut r)
    } else {
        None
    };

    let bigrams_pos = if flags & node_flags::HAS_BIGRAMS != 0 {
        skip_bigrams(&mut r)
    } else {
        None
    };

    Some(PtNodeEntry {
        start_pos,
        flags,
        chars,
        frequency,
        children_pos,
        shortcuts_pos,
        bigrams_pos,
        end_pos: r.pos(),
    })
}

fn truncate_cp(c: i32) -> u16 {
    u16::try_from(c).unwrap_or(0xFFFD)
}

/// Decodes every entry of the PtNode array at `array_pos`. Stops early
/// (returning fewer than `group_count` entries) on truncation.
#[must_use]
pub fn read_group(buf: &[u8], array_pos: usize) -> Vec<PtNodeEntry> {
    let Some((count, mut pos)) = read_group_header(buf, array_pos) else {
        return Vec::new();
    };
    let mut entries = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let Some(entry) = next_entry(buf, pos) else {
            break;
        };
        pos = entry.end_pos;
        entries.push(entry);
    }
    entries
}

/// `getTerminalPosition`: walks the trie literally matching `word`,
/// returning the byte position of the matching terminal's flags byte,
/// or `NOT_VALID_WORD` if absent.
#[must_use]
pub fn get_terminal_position(buf: &[u8], root_pos: usize, word: &[u16]) -> i32 {
    let mut array_pos = root_pos;
    let mut remaining = word;

    loop {
        let entries = read_group(buf, array_pos);
        let mut matched: Option<&PtNodeEntry> = None;
        for entry in &entries {
            if remaining.len() >= entry.chars.len() && remaining[..entry.chars.len()] == entry.chars[..] {
                matched = Some(entry);
                break;
            }
        }
        let Some(entry) = matched else {
            return NOT_VALID_WORD;
        };
        remaining = &remaining[entry.chars.len()..];
        if remaining.is_empty() {
            return if entry.is_terminal() {
                i32::try_from(entry.start_pos).unwrap_or(NOT_VALID_WORD)
            } else {
                NOT_VALID_WORD
            };
        }
        match entry.children_pos {
            Some(p) => array_pos = p,
            None => return NOT_VALID_WORD,
        }
    }
}

/// `getWordAtAddress`: reverse lookup by the breadth-first-ordered
/// layout described in §4.1/§10.6. At each array, finds the *last*
/// sibling whose children address is still `<= target`, descending into
/// only that one remembered sibling once the array is exhausted, rather
/// than scanning every subtree. Returns the reconstructed word (possibly
/// truncated, never panicking, on a malformed dictionary) and the
/// terminal's stored frequency, or `(empty, NOT_A_PROBABILITY)` if
/// `target` could not be reached within `max_depth` arrays.
#[must_use]
pub fn get_word_at_address(
    buf: &[u8],
    root_pos: usize,
    target: usize,
    max_depth: usize,
) -> (Vec<u16>, i32) {
    let mut word = Vec::new();
    let mut array_pos = root_pos;

    for _ in 0..max_depth {
        let entries = read_group(buf, array_pos);
        if let Some(hit) = entries.iter().find(|e| e.start_pos == target) {
            word.extend_from_slice(&hit.chars);
            let freq = hit.frequency.map_or(crate::constants::NOT_A_PROBABILITY, i32::from);
            return (word, freq);
        }

        let mut best: Option<&PtNodeEntry> = None;
        for entry in &entries {
            if let Some(children) = entry.children_pos {
                if children <= target {
                    best = Some(entry);
                }
            }
        }

        match best {
            Some(entry) => {
                word.extend_from_slice(&entry.chars);
                array_pos = entry.children_pos.expect("filtered above");
            }
            None => break,
        }
    }

    (word, crate::constants::NOT_A_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_single_entry_array(chars: &[u8], freq: Option<u8>) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(1); // group count
        let mut flags = 0u8;
        if chars.len() > 1 {
            flags |= node_flags::HAS_MULTIPLE_CHARS;
        }
        if freq.is_some() {
            flags |= node_flags::IS_TERMINAL;
        }
        buf.push(flags);
        if chars.len() > 1 {
            for &c in chars {
                buf.push(c);
            }
            buf.push(0x1F); // terminator
        } else {
            buf.push(chars[0]);
        }
        if let Some(f) = freq {
            buf.push(f);
        }
        buf
    }

    #[test]
    fn test_single_char_terminal_roundtrip() {
        let buf = build_single_entry_array(b"x", Some(200));
        let pos = get_terminal_position(&buf, 0, &[u16::from(b'x')]);
        assert!(pos >= 0);
        let (word, freq) = get_word_at_address(&buf, 0, pos as usize, 8);
        assert_eq!(word, vec![u16::from(b'x')]);
        assert_eq!(freq, 200);
    }

    #[test]
    fn test_multi_char_terminal_roundtrip() {
        let buf = build_single_entry_array(b"cat", Some(150));
        let word_u16: Vec<u16> = "cat".encode_utf16().collect();
        let pos = get_terminal_position(&buf, 0, &word_u16);
        assert!(pos >= 0);
        let (word, freq) = get_word_at_address(&buf, 0, pos as usize, 8);
        assert_eq!(word, word_u16);
        assert_eq!(freq, 150);
    }

    #[test]
    fn test_unknown_word_not_valid() {
        let buf = build_single_entry_array(b"cat", Some(150));
        let word_u16: Vec<u16> = "dog".encode_utf16().collect();
        assert_eq!(get_terminal_position(&buf, 0, &word_u16), NOT_VALID_WORD);
    }
}
