//! Shared runtime types: suggestions, engine configuration, per-request
//! input state, and keyboard geometry description.

use serde::{Deserialize, Serialize};

use crate::constants;

/// What produced a [`Suggestion`]: an edit-distance correction, a
/// dictionary whitelist entry, or a next-word prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    /// Reached via the correction traverser.
    Correction,
    /// A shortcut-list whitelist entry attached to a PtNode.
    Whitelist,
    /// Produced by the bigram pass given a previous word.
    Prediction,
}

/// A single ranked candidate word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The candidate word.
    pub word: String,
    /// Final ranked frequency (§4.6), in `0..=i32::MAX`.
    pub frequency: i32,
    /// What pass produced this candidate.
    pub kind: SuggestionKind,
    /// `calcNormalizedScore` output, `0.0..=1.0`.
    pub normalized_score: f32,
    /// Whether the candidate was an exact (zero-error) match.
    pub exact_match: bool,
}

/// Per-session tuning knobs. Mirrors the engine API's `max_word_len` /
/// `max_words` / `use_full_edit_distance` parameters plus a strict-mode
/// switch for the correction error budget (§3.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Maximum code points the engine will consider for a candidate word.
    pub max_word_len: usize,
    /// Maximum number of suggestions retained per request.
    pub max_words: usize,
    /// When true, do not cap correction depth at the input length.
    pub use_full_edit_distance: bool,
    /// When true, at most 1 simultaneous error is allowed per traversal
    /// instead of the default 2 (§3.5).
    pub strict_max_errors: bool,
}

impl EngineOptions {
    /// Default tuning: up to 18 suggestions, default (non-strict) error
    /// budget, partial edit-distance mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_word_len: constants::MAX_WORD_LENGTH_INTERNAL,
            max_words: 18,
            use_full_edit_distance: false,
            strict_max_errors: false,
        }
    }

    /// Disables autocorrection-style leniency: strict error budget, no
    /// completion beyond the typed length.
    #[must_use]
    pub fn autocorrect_disabled() -> Self {
        Self {
            strict_max_errors: true,
            ..Self::new()
        }
    }

    /// Exhaustive mode: full edit distance, default error budget, more
    /// candidates retained.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            use_full_edit_distance: true,
            max_words: 32,
            ..Self::new()
        }
    }

    /// `1` under strict mode, else `DEFAULT_MAX_ERRORS` (§3.5).
    #[must_use]
    pub fn max_errors(&self) -> i32 {
        if self.strict_max_errors {
            constants::STRICT_MAX_ERRORS
        } else {
            constants::DEFAULT_MAX_ERRORS
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-request typed input: code points plus, for each position, the
/// touch coordinates and the expanded proximity-char list used for
/// fat-finger matching.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Typed code points, primary (exact) interpretation per position.
    pub codes: Vec<u16>,
    /// Touch X per position (device pixels, or `-1` if unknown).
    pub xs: Vec<i32>,
    /// Touch Y per position (device pixels, or `-1` if unknown).
    pub ys: Vec<i32>,
    /// Per-position proximity-char candidates, primary code first,
    /// followed by near-proximity chars, a `ADDITIONAL_PROXIMITY_CHAR_DELIMITER`
    /// sentinel, then additional-proximity chars.
    pub proximities: Vec<Vec<i32>>,
}

impl InputState {
    /// Builds an `InputState` for typed code points with no touch
    /// coordinates (proximity list is just the primary code, unexpanded).
    #[must_use]
    pub fn from_codes(codes: &[u16]) -> Self {
        let proximities = codes.iter().map(|&c| vec![i32::from(c)]).collect();
        Self {
            codes: codes.to_vec(),
            xs: vec![constants::NOT_A_COORDINATE; codes.len()],
            ys: vec![constants::NOT_A_COORDINATE; codes.len()],
            proximities,
        }
    }

    /// Number of typed positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if no positions were typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A single key's rectangle and optional calibrated touch "sweet spot".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Key-code (Unicode code point) produced when this key is tapped.
    pub code: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Calibrated centre-of-touch X, if known (`NOT_A_COORDINATE` else).
    pub sweet_spot_x: f32,
    pub sweet_spot_y: f32,
    /// Calibrated touch radius, if known.
    pub sweet_spot_radius: f32,
}

/// Keyboard layout description used to construct a [`crate::proximity::ProximityInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardGeometry {
    pub keyboard_width: i32,
    pub keyboard_height: i32,
    /// Coarse spatial-bin grid used for proximity lookup (§4.3).
    pub grid_width: i32,
    pub grid_height: i32,
    /// Most common key width/height, used as the proximity admission
    /// radius.
    pub common_key_width: i32,
    pub common_key_height: i32,
    pub keys: Vec<KeyDescriptor>,
}
