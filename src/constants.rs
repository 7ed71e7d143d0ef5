//! Magic numbers, flag bits, and tuning constants lifted directly from the
//! source engine's `defines.h`, grouped into per-concern submodules.

/// Dictionary header magics (32-bit, big-endian).
pub mod magic {
    /// Version 1 dictionary magic: no header flags, 5-byte header.
    pub const DICT_V1: [u8; 4] = [0x78, 0xB1, 0x01, 0x00];
    /// Version 2 dictionary magic: versioned header with option flags.
    pub const DICT_V2: [u8; 4] = [0x9B, 0xC1, 0x3A, 0xFE];
}

/// PtNode flag bits (§3.1).
pub mod node_flags {
    pub const HAS_MULTIPLE_CHARS: u8 = 0x20;
    pub const IS_TERMINAL: u8 = 0x10;
    pub const HAS_SHORTCUT_TARGETS: u8 = 0x08;
    pub const HAS_BIGRAMS: u8 = 0x04;
    pub const IS_NOT_A_WORD: u8 = 0x02;
    pub const IS_BLACKLISTED: u8 = 0x01;
    /// Bits 7..6: address type for the children-offset field.
    pub const ADDRESS_TYPE_MASK: u8 = 0xC0;
    pub const ADDRESS_TYPE_NONE: u8 = 0x00;
    pub const ADDRESS_TYPE_ONEBYTE: u8 = 0x40;
    pub const ADDRESS_TYPE_TWOBYTES: u8 = 0x80;
    pub const ADDRESS_TYPE_THREEBYTES: u8 = 0xC0;
}

/// Bigram-entry flag bits (§3.4).
pub mod bigram_flags {
    pub const HAS_NEXT: u8 = 0x80;
    pub const OFFSET_NEGATIVE: u8 = 0x40;
    pub const ADDRESS_TYPE_MASK: u8 = 0x30;
    pub const PROBABILITY_MASK: u8 = 0x0F;
}

/// Shortcut-entry flag bits (§3.3).
pub mod shortcut_flags {
    pub const HAS_NEXT: u8 = 0x80;
    pub const PROBABILITY_MASK: u8 = 0x0F;
    pub const WHITELIST: u8 = 15;
}

/// v2 header option flags.
pub mod header_flags {
    pub const REQUIRES_GERMAN_UMLAUT_PROCESSING: u16 = 0x1;
    pub const REQUIRES_FRENCH_LIGATURES_PROCESSING: u16 = 0x4;
}

/// Multi-char code-point terminator / 24-bit escape threshold (§3.2).
pub const CHAR_TERMINATOR: u8 = 0x1F;
pub const CHAR_ESCAPE_THRESHOLD: u8 = 0x20;

/// Sentinel values (§6.3).
pub const NOT_VALID_WORD: i32 = -99;
pub const NOT_A_CHARACTER: i32 = -1;
pub const NOT_A_DISTANCE: i32 = -1;
pub const NOT_A_COORDINATE: i32 = -1;
pub const NOT_AN_INDEX: i32 = -1;
pub const NOT_A_PROBABILITY: i32 = -1;
pub const EQUIVALENT_CHAR_WITHOUT_DISTANCE_INFO: i32 = -2;
pub const PROXIMITY_CHAR_WITHOUT_DISTANCE_INFO: i32 = -3;

pub const KEYCODE_SPACE: i32 = b' ' as i32;

/// Suggestion "kind" tags (§6.3).
pub const KIND_CORRECTION: i32 = 1;
pub const KIND_WHITELIST: i32 = 3;
pub const KIND_PREDICTION: i32 = 8;
pub const KIND_FLAG_EXACT_MATCH: i32 = 0x4000_0000;

/// Ranking multipliers (§4.6), all "percent" unless noted.
pub const TYPED_LETTER_MULTIPLIER: i32 = 2;
pub const FULL_WORD_MULTIPLIER: i32 = 2;
pub const MAX_FREQ: i32 = 255;
pub const MAX_BIGRAM_FREQ: i32 = 15;

pub const WORDS_WITH_MISSING_CHARACTER_DEMOTION_RATE: i32 = 80;
pub const WORDS_WITH_MISSING_CHARACTER_DEMOTION_START_POS_10X: i32 = 12;
pub const WORDS_WITH_MISSING_SPACE_CHARACTER_DEMOTION_RATE: i32 = 58;
pub const WORDS_WITH_MISTYPED_SPACE_DEMOTION_RATE: i32 = 50;
pub const WORDS_WITH_EXCESSIVE_CHARACTER_DEMOTION_RATE: i32 = 75;
pub const WORDS_WITH_EXCESSIVE_CHARACTER_OUT_OF_PROXIMITY_DEMOTION_RATE: i32 = 75;
pub const WORDS_WITH_TRANSPOSED_CHARACTERS_DEMOTION_RATE: i32 = 70;
pub const FULL_MATCHED_WORDS_PROMOTION_RATE: i32 = 120;
pub const WORDS_WITH_PROXIMITY_CHARACTER_DEMOTION_RATE: i32 = 90;
pub const WORDS_WITH_ADDITIONAL_PROXIMITY_CHARACTER_DEMOTION_RATE: i32 = 70;
pub const WORDS_WITH_MATCH_SKIP_PROMOTION_RATE: i32 = 105;
pub const WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_RATE: i32 = 148;
pub const WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_MULTIPLIER: i32 = 3;
pub const INPUT_EXCEEDS_OUTPUT_DEMOTION_RATE: i32 = 70;
pub const FIRST_CHAR_DIFFERENT_DEMOTION_RATE: i32 = 96;
pub const TWO_WORDS_CAPITALIZED_DEMOTION_RATE: i32 = 50;
pub const TWO_WORDS_CORRECTION_DEMOTION_BASE: i32 = 80;

pub const NEUTRAL_AREA_RADIUS_SQUARED: f32 = 8.0;
pub const HALF_SCORE_SQUARED_RADIUS: f32 = 32.0;
pub const TOUCH_FACTOR_A: f32 = 1.10;
pub const TOUCH_FACTOR_B: f32 = 1.00;
pub const TOUCH_FACTOR_C: f32 = 0.50;
pub const TOUCH_FACTOR_FLOOR: f32 = 0.3;

/// Structural bounds.
pub const MAX_WORD_LENGTH_INTERNAL: usize = 48;
pub const MAX_DEPTH_MULTIPLIER: usize = 3;
pub const ADDITIONAL_PROXIMITY_CHAR_DELIMITER: i32 = 2;
pub const BIGRAM_FILTER_BYTE_SIZE: usize = 128;
pub const BIGRAM_FILTER_MODULO: usize = 1021;
pub const DEFAULT_MAX_DIGRAPH_SEARCH_DEPTH: u32 = 5;
/// Per-grid-bin proximity char capacity (§4.3).
pub const MAX_PROXIMITY_CHARS_SIZE: usize = 16;

/// Multi-word split budgets (§5).
pub const MULTIPLE_WORDS_SUGGESTION_MAX_WORDS: usize = 5;
pub const MULTIPLE_WORDS_SUGGESTION_MAX_TOTAL_TRAVERSE_COUNT: u32 = 45;
pub const MULTIPLE_WORDS_DEMOTION_RATE: i32 = 80;
pub const MIN_USER_TYPED_LENGTH_FOR_MULTIPLE_WORD_SUGGESTION: usize = 3;
pub const MIN_INPUT_LENGTH_FOR_THREE_OR_MORE_WORDS_CORRECTION: usize = 6;
pub const SUB_QUEUE_MAX_COUNT: usize = 10;
pub const SUPPRESS_SHORT_MULTIPLE_WORDS_THRESHOLD_FREQ: i32 = MAX_FREQ * 58 / 100;
pub const START_TWO_WORDS_CORRECTION_THRESHOLD: f32 = 0.185;

/// Default/strict maximum correction-error budget (§3.5 invariant).
pub const DEFAULT_MAX_ERRORS: i32 = 2;
pub const STRICT_MAX_ERRORS: i32 = 1;
