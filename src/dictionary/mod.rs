//! Binary dictionary decoding (§3, §4.1). Zero-copy view over an
//! immutable byte buffer supplied by the caller (memory-mapping, if any,
//! happens on the caller's side — see `Session`'s `!Send` note, §9).

pub mod bigram;
pub mod bloom;
pub mod header;
pub mod reader;
pub mod shortcut;
pub mod trie;

use crate::constants::{MAX_WORD_LENGTH_INTERNAL, NOT_A_PROBABILITY, NOT_VALID_WORD};
use crate::digraph::{self, Digraph};
use crate::error::Result;

/// An opened dictionary: header plus a borrowed view of the byte buffer.
/// Immutable and shareable across sessions.
#[derive(Debug)]
pub struct Dictionary<'a> {
    buf: &'a [u8],
    header: header::Header,
}

impl<'a> Dictionary<'a> {
    /// Parses the header and validates the magic number. The body is not
    /// eagerly walked — PtNode arrays are decoded lazily on lookup.
    pub fn open(buf: &'a [u8]) -> Result<Self> {
        let header = header::parse(buf)?;
        Ok(Self { buf, header })
    }

    #[must_use]
    pub fn root_pos(&self) -> usize {
        self.header.body_offset
    }

    #[must_use]
    pub fn header(&self) -> &header::Header {
        &self.header
    }

    /// Digraph table selected by this dictionary's header flags, or an
    /// empty slice when digraph processing isn't required (the common
    /// case, §10.6).
    #[must_use]
    pub fn digraph_table(&self) -> &'static [Digraph] {
        digraph::digraphs_for_flags(self.header.option_flags)
    }

    /// `getFrequency`: unigram frequency of an exact word, or `None` if
    /// the word isn't present (mirrors `NOT_A_PROBABILITY`/`NOT_VALID_WORD`
    /// collapsing to `None` at the Rust boundary, §10.1).
    #[must_use]
    pub fn get_frequency(&self, word: &[u16]) -> Option<i32> {
        let pos = trie::get_terminal_position(self.buf, self.root_pos(), word);
        if pos == NOT_VALID_WORD {
            return None;
        }
        let entry = trie::next_entry(self.buf, pos as usize)?;
        entry.frequency.map(i32::from)
    }

    /// Byte position of `word`'s terminal flags byte, or `NOT_VALID_WORD`.
    #[must_use]
    pub fn terminal_position(&self, word: &[u16]) -> i32 {
        trie::get_terminal_position(self.buf, self.root_pos(), word)
    }

    /// Reconstructs the word stored at a terminal position discovered via
    /// a bigram target offset (§4.1, §10.6).
    #[must_use]
    pub fn word_at(&self, pos: usize) -> (Vec<u16>, i32) {
        trie::get_word_at_address(
            self.buf,
            self.root_pos(),
            pos,
            MAX_WORD_LENGTH_INTERNAL * crate::constants::MAX_DEPTH_MULTIPLIER,
        )
    }

    /// All bigram targets for `prev_word`, reconstructed to `(word, freq)`
    /// pairs ordered as stored. Empty if `prev_word` isn't in the
    /// dictionary or carries no bigrams.
    #[must_use]
    pub fn bigrams_for(&self, prev_word: &[u16]) -> Vec<(Vec<u16>, i32)> {
        let pos = trie::get_terminal_position(self.buf, self.root_pos(), prev_word);
        if pos == NOT_VALID_WORD {
            return Vec::new();
        }
        let Some(entry) = trie::next_entry(self.buf, pos as usize) else {
            return Vec::new();
        };
        let Some(bigrams_pos) = entry.bigrams_pos else {
            return Vec::new();
        };
        bigram::read_bigram_list(self.buf, bigrams_pos)
            .into_iter()
            .map(|b| {
                let (word, unigram_freq) = self.word_at(b.target_pos);
                let freq = if unigram_freq == NOT_A_PROBABILITY {
                    0
                } else {
                    bloom::compute_frequency_for_bigram(unigram_freq, i32::from(b.probability))
                };
                (word, freq)
            })
            .collect()
    }

    /// `isValidBigram`: true if `w2` appears in `w1`'s bigram list.
    #[must_use]
    pub fn is_valid_bigram(&self, w1: &[u16], w2: &[u16]) -> bool {
        self.bigrams_for(w1).iter().any(|(w, _)| w == w2)
    }

    /// Decodes the PtNode array at `pos`. Exposed crate-internally for
    /// the correction traverser, which needs to walk arrays the trie
    /// helpers above don't visit (sibling entries of a partial match).
    #[must_use]
    pub(crate) fn entries_at(&self, pos: usize) -> Vec<trie::PtNodeEntry> {
        trie::read_group(self.buf, pos)
    }

    /// Shortcut/whitelist targets attached to `word`'s terminal entry.
    #[must_use]
    pub fn shortcuts_for(&self, word: &[u16]) -> Vec<shortcut::ShortcutEntry> {
        let pos = trie::get_terminal_position(self.buf, self.root_pos(), word);
        if pos == NOT_VALID_WORD {
            return Vec::new();
        }
        let Some(entry) = trie::next_entry(self.buf, pos as usize) else {
            return Vec::new();
        };
        match entry.shortcuts_pos {
            Some(p) => shortcut::read_shortcut_list(self.buf, p),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::magic;

    fn build_test_dict() -> Vec<u8> {
        let mut body = Vec::new();
        body.push(1u8); // group count
        body.push(crate::constants::node_flags::IS_TERMINAL); // single char, terminal
        body.push(b'a');
        body.push(200); // frequency

        let mut buf = magic::DICT_V1.to_vec();
        buf.push(0);
        buf.extend_from_slice(&body);
        buf
    }

    #[test]
    fn test_open_and_lookup() {
        let buf = build_test_dict();
        let dict = Dictionary::open(&buf).unwrap();
        assert_eq!(dict.get_frequency(&[u16::from(b'a')]), Some(200));
        assert_eq!(dict.get_frequency(&[u16::from(b'z')]), None);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let buf = [0u8, 1, 2, 3, 4];
        assert!(Dictionary::open(&buf).is_err());
    }
}
