//! Case-folding and accent-stripping (C2).
//!
//! Grounded on `char_utils.h`: ASCII case rules plus a fixed lookup table
//! mapping combined Latin characters to their base letter. The upstream
//! `BASE_CHARS` table (U+0000..U+04FF) ships as compiled data in the
//! source tree and isn't part of the retrieved reference sources, so the
//! Latin-1 Supplement and the common Latin Extended-A accented letters
//! are reproduced directly from the Unicode decomposition mappings below;
//! anything outside that explicit table falls back to identity, same as
//! the source's behaviour for code points the table doesn't cover.

/// `c >= 'A' && c <= 'Z'`.
#[inline]
#[must_use]
pub fn is_ascii_upper(c: u16) -> bool {
    (b'A' as u16..=b'Z' as u16).contains(&c)
}

#[inline]
#[must_use]
pub fn to_ascii_lower(c: u16) -> u16 {
    c - b'A' as u16 + b'a' as u16
}

#[inline]
#[must_use]
pub fn is_ascii(c: u16) -> bool {
    c <= 127
}

/// Strip accents/diacritics, mapping a combined character to its base
/// letter. Identity for anything not in the table.
#[must_use]
pub fn to_base_char(c: u16) -> u16 {
    base_char_table(c).unwrap_or(c)
}

/// `toBaseLowerCase`: accent-strip then lower-case.
#[must_use]
pub fn to_base_lower_case(c: u16) -> u16 {
    let base = to_base_char(c);
    if is_ascii_upper(base) {
        to_ascii_lower(base)
    } else if is_ascii(base) {
        base
    } else {
        latin_to_lower(base)
    }
}

/// Lower-cases code points outside the ASCII range that the base-char
/// table didn't already fold to a base letter (e.g. Cyrillic, Greek).
/// Covers the ranges actually reachable by `base_char_table`'s fallthrough;
/// anything else is returned unchanged, matching `latin_tolower`'s
/// documented behaviour of being a no-op outside its known ranges.
fn latin_to_lower(c: u16) -> u16 {
    match c {
        // Greek (U+0391..U+03A9 upper -> +0x20 lower, with the final
        // sigma/stigma gaps the source table also leaves alone).
        0x0391..=0x03A9 => c + 0x20,
        // Cyrillic (U+0410..U+042F upper -> +0x20 lower).
        0x0410..=0x042F => c + 0x20,
        0x0400..=0x040F => c + 0x50,
        _ => c,
    }
}

/// Latin-1 Supplement and common Latin Extended-A accented letters mapped
/// to their plain ASCII base, plus the digraph composite letters used by
/// [`crate::digraph`] mapped to the base of their *first* constituent
/// letter (matching how the source's equivalence check treats `ä`/`ö`/`ü`
/// as accented variants of `a`/`o`/`u` for edit-distance purposes).
fn base_char_table(c: u16) -> Option<u16> {
    let base = match c {
        0x00C0..=0x00C5 | 0x0100 | 0x0102 | 0x0104 => b'A',
        0x00E0..=0x00E5 | 0x0101 | 0x0103 | 0x0105 => b'a',
        0x00C7 | 0x0106 | 0x0108 | 0x010A | 0x010C => b'C',
        0x00E7 | 0x0107 | 0x0109 | 0x010B | 0x010D => b'c',
        0x010E | 0x0110 => b'D',
        0x010F | 0x0111 => b'd',
        0x00C8..=0x00CB | 0x0112 | 0x0114 | 0x0116 | 0x0118 | 0x011A => b'E',
        0x00E8..=0x00EB | 0x0113 | 0x0115 | 0x0117 | 0x0119 | 0x011B => b'e',
        0x011C | 0x011E | 0x0120 | 0x0122 => b'G',
        0x011D | 0x011F | 0x0121 | 0x0123 => b'g',
        0x0124 | 0x0126 => b'H',
        0x0125 | 0x0127 => b'h',
        0x00CC..=0x00CF | 0x0128 | 0x012A | 0x012C | 0x012E | 0x0130 => b'I',
        0x00EC..=0x00EF | 0x0129 | 0x012B | 0x012D | 0x012F | 0x0131 => b'i',
        0x0134 => b'J',
        0x0135 => b'j',
        0x0136 => b'K',
        0x0137 => b'k',
        0x0139 | 0x013B | 0x013D | 0x013F | 0x0141 => b'L',
        0x013A | 0x013C | 0x013E | 0x0140 | 0x0142 => b'l',
        0x00D1 | 0x0143 | 0x0145 | 0x0147 => b'N',
        0x00F1 | 0x0144 | 0x0146 | 0x0148 => b'n',
        0x00D2..=0x00D6 | 0x00D8 | 0x014C | 0x014E | 0x0150 => b'O',
        0x00F2..=0x00F6 | 0x00F8 | 0x014D | 0x014F | 0x0151 => b'o',
        0x0154 | 0x0156 | 0x0158 => b'R',
        0x0155 | 0x0157 | 0x0159 => b'r',
        0x015A | 0x015C | 0x015E | 0x0160 => b'S',
        0x015B | 0x015D | 0x015F | 0x0161 => b's',
        0x0162 | 0x0164 | 0x0166 => b'T',
        0x0163 | 0x0165 | 0x0167 => b't',
        0x00D9..=0x00DC | 0x0168 | 0x016A | 0x016C | 0x016E | 0x0170 | 0x0172 => b'U',
        0x00F9..=0x00FC | 0x0169 | 0x016B | 0x016D | 0x016F | 0x0171 | 0x0173 => b'u',
        0x0174 => b'W',
        0x0175 => b'w',
        0x00DD | 0x0176 | 0x0178 => b'Y',
        0x00FD | 0x00FF | 0x0177 => b'y',
        0x0179 | 0x017B | 0x017D => b'Z',
        0x017A | 0x017C | 0x017E => b'z',
        0x00C6 => b'A', // AE ligature -> A
        0x00E6 => b'a', // ae ligature -> a
        0x0152 => b'O', // OE ligature -> O
        0x0153 => b'o', // oe ligature -> o
        _ => return None,
    };
    Some(u16::from(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_case() {
        assert!(is_ascii_upper(b'A' as u16));
        assert!(!is_ascii_upper(b'a' as u16));
        assert_eq!(to_ascii_lower(b'Z' as u16), b'z' as u16);
    }

    #[test]
    fn test_to_base_lower_case_accented() {
        assert_eq!(to_base_lower_case(0x00E9), b'e' as u16); // e-acute
        assert_eq!(to_base_lower_case(0x00C9), b'e' as u16); // E-acute
        assert_eq!(to_base_lower_case(0x00FC), b'u' as u16); // u-umlaut
        assert_eq!(to_base_lower_case(0x00E4), b'a' as u16); // a-umlaut
    }

    #[test]
    fn test_to_base_lower_case_identity_for_plain_ascii() {
        assert_eq!(to_base_lower_case(b'q' as u16), b'q' as u16);
        assert_eq!(to_base_lower_case(b'Q' as u16), b'q' as u16);
    }

    #[test]
    fn test_unmapped_passes_through() {
        // Han ideograph, well outside any table entry.
        assert_eq!(to_base_lower_case(0x4E2D), 0x4E2D);
    }
}
