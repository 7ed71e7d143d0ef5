//! Bigram list decoding (§3.4).

use crate::constants::bigram_flags;
use crate::dictionary::reader::ByteReader;

/// One decoded bigram attribute: a target PtNode position and its 4-bit
/// probability.
#[derive(Debug, Clone, Copy)]
pub struct BigramEntry {
    pub target_pos: usize,
    pub probability: u8,
}

/// Decodes the bigram list starting at `pos` (the position returned as
/// `bigrams_pos` by [`crate::dictionary::trie::next_entry`]). Stops early
/// on truncation.
#[must_use]
pub fn read_bigram_list(buf: &[u8], pos: usize) -> Vec<BigramEntry> {
    let mut r = ByteReader::new(buf, pos);
    let mut out = Vec::new();
    loop {
        let Some(flags) = r.read_u8() else { break };
        let origin = r.pos() as i64;
        let size = match flags & bigram_flags::ADDRESS_TYPE_MASK {
            0x10 => 1,
            0x20 => 2,
            0x30 => 3,
            _ => 0,
        };
        let mut magnitude: i64 = 0;
        let mut truncated = false;
        for _ in 0..size {
            match r.read_u8() {
                Some(b) => magnitude = (magnitude << 8) | i64::from(b),
                None => {
                    truncated = true;
                    break;
                }
            }
        }
        if truncated {
            break;
        }
        let target = if flags & bigram_flags::OFFSET_NEGATIVE != 0 {
            origin - magnitude
        } else {
            origin + magnitude
        };
        if let Ok(target_pos) = usize::try_from(target) {
            out.push(BigramEntry {
                target_pos,
                probability: flags & bigram_flags::PROBABILITY_MASK,
            });
        }
        if flags & bigram_flags::HAS_NEXT == 0 {
            break;
        }
    }
    out
}
