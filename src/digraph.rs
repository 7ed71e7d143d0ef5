//! German umlaut / French ligature digraph expansion (§4.2).
//!
//! Grounded on `digraph_utils.cpp`: a dictionary opts into exactly one of
//! the two digraph tables via its header flags (§3 `REQUIRES_GERMAN_UMLAUT_PROCESSING`
//! / `REQUIRES_FRENCH_LIGATURES_PROCESSING`); the two are mutually exclusive,
//! matching the source's `if/else if`.

use crate::constants::header_flags;

/// One (first, second) ASCII pair and the combined code point it expands to.
pub struct Digraph {
    pub first: u8,
    pub second: u8,
    pub combined: u16,
}

const GERMAN_UMLAUT_DIGRAPHS: &[Digraph] = &[
    Digraph { first: b'a', second: b'e', combined: 0x00E4 }, // ä
    Digraph { first: b'o', second: b'e', combined: 0x00F6 }, // ö
    Digraph { first: b'u', second: b'e', combined: 0x00FC }, // ü
];

const FRENCH_LIGATURE_DIGRAPHS: &[Digraph] = &[
    Digraph { first: b'a', second: b'e', combined: 0x00E6 }, // æ
    Digraph { first: b'o', second: b'e', combined: 0x0153 }, // œ
];

/// Returns the digraph table applicable to a dictionary's header flags, or
/// an empty slice when neither flag is set (mirrors
/// `getAllDigraphsForDictionaryAndReturnSize` returning a size of 0).
#[must_use]
pub fn digraphs_for_flags(header_option_flags: u16) -> &'static [Digraph] {
    if header_option_flags & header_flags::REQUIRES_GERMAN_UMLAUT_PROCESSING != 0 {
        GERMAN_UMLAUT_DIGRAPHS
    } else if header_option_flags & header_flags::REQUIRES_FRENCH_LIGATURES_PROCESSING != 0 {
        FRENCH_LIGATURE_DIGRAPHS
    } else {
        &[]
    }
}

/// `hasDigraphForCodePoint`: does this table have an entry whose first
/// letter is `c`?
#[must_use]
pub fn has_digraph_for_code_point(table: &[Digraph], c: u16) -> bool {
    table.iter().any(|d| u16::from(d.first) == c)
}

/// `getDigraphForCodePoint`: combined code point produced by `first`
/// followed by `second`, if the table has such an entry.
#[must_use]
pub fn digraph_for_code_points(table: &[Digraph], first: u16, second: u16) -> Option<u16> {
    table
        .iter()
        .find(|d| u16::from(d.first) == first && u16::from(d.second) == second)
        .map(|d| d.combined)
}

/// Every digraph expansion of `word`, up to `max_depth` substitutions,
/// for trying alongside the literal input during trie traversal. A word
/// with no eligible digits under `table` yields no expansions.
///
/// Mirrors the source's recursive depth-first substitution: at each
/// position where the table has a two-letter match, branch into a copy
/// with the combined character substituted and recurse past it, as well
/// as continuing past the unexpanded pair.
#[must_use]
pub fn expand_digraphs(word: &[u16], table: &[Digraph], max_depth: u32) -> Vec<Vec<u16>> {
    let mut out = Vec::new();
    if table.is_empty() || max_depth == 0 {
        return out;
    }
    expand_from(word, 0, table, max_depth, &mut Vec::new(), &mut out);
    out
}

fn expand_from(
    word: &[u16],
    pos: usize,
    table: &[Digraph],
    depth_remaining: u32,
    prefix: &mut Vec<u16>,
    out: &mut Vec<Vec<u16>>,
) {
    if pos >= word.len() {
        return;
    }
    if pos + 1 < word.len() && depth_remaining > 0 {
        if let Some(combined) = digraph_for_code_points(table, word[pos], word[pos + 1]) {
            let mut candidate = prefix.clone();
            candidate.push(combined);
            candidate.extend_from_slice(&word[pos + 2..]);
            out.push(candidate.clone());

            let mut next_prefix = prefix.clone();
            next_prefix.push(combined);
            expand_from(
                word,
                pos + 2,
                table,
                depth_remaining - 1,
                &mut next_prefix,
                out,
            );
        }
    }
    prefix.push(word[pos]);
    expand_from(word, pos + 1, table, depth_remaining, prefix, out);
    prefix.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_digraphs_for_flags_mutually_exclusive() {
        assert_eq!(
            digraphs_for_flags(header_flags::REQUIRES_GERMAN_UMLAUT_PROCESSING).len(),
            3
        );
        assert_eq!(
            digraphs_for_flags(header_flags::REQUIRES_FRENCH_LIGATURES_PROCESSING).len(),
            2
        );
        assert!(digraphs_for_flags(0).is_empty());
    }

    #[test]
    fn test_expand_umlaut() {
        let table = digraphs_for_flags(header_flags::REQUIRES_GERMAN_UMLAUT_PROCESSING);
        let expansions = expand_digraphs(&w("baeck"), table, 5);
        assert!(expansions.iter().any(|e| e == &w("b\u{00E4}ck")));
    }

    #[test]
    fn test_no_expansion_without_flag() {
        let expansions = expand_digraphs(&w("baeck"), &[], 5);
        assert!(expansions.is_empty());
    }

    #[test]
    fn test_has_digraph_for_code_point() {
        let table = digraphs_for_flags(header_flags::REQUIRES_FRENCH_LIGATURES_PROCESSING);
        assert!(has_digraph_for_code_point(table, u16::from(b'a')));
        assert!(!has_digraph_for_code_point(table, u16::from(b'u')));
    }
}
