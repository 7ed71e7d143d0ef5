//! Candidate ranking (C10, §4.6).
//!
//! `calculate_final_probability` is the single largest formula in the
//! engine: a unigram frequency run through a sequence of percent
//! multipliers keyed on which kinds of error the traversal used to reach
//! this candidate. All intermediate arithmetic saturates at `i32::MAX`
//! (the source's "31-bit" headroom, since frequencies and scores are
//! always non-negative) rather than wrapping or panicking on overflow.

use crate::constants::{
    FIRST_CHAR_DIFFERENT_DEMOTION_RATE, FULL_MATCHED_WORDS_PROMOTION_RATE, FULL_WORD_MULTIPLIER,
    INPUT_EXCEEDS_OUTPUT_DEMOTION_RATE, MAX_FREQ, TWO_WORDS_CAPITALIZED_DEMOTION_RATE,
    TWO_WORDS_CORRECTION_DEMOTION_BASE, TYPED_LETTER_MULTIPLIER,
    WORDS_WITH_ADDITIONAL_PROXIMITY_CHARACTER_DEMOTION_RATE,
    WORDS_WITH_EXCESSIVE_CHARACTER_DEMOTION_RATE,
    WORDS_WITH_EXCESSIVE_CHARACTER_OUT_OF_PROXIMITY_DEMOTION_RATE,
    WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_MULTIPLIER,
    WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_RATE, WORDS_WITH_MATCH_SKIP_PROMOTION_RATE,
    WORDS_WITH_MISSING_CHARACTER_DEMOTION_RATE,
    WORDS_WITH_MISSING_CHARACTER_DEMOTION_START_POS_10X,
    WORDS_WITH_MISSING_SPACE_CHARACTER_DEMOTION_RATE, WORDS_WITH_MISTYPED_SPACE_DEMOTION_RATE,
    WORDS_WITH_PROXIMITY_CHARACTER_DEMOTION_RATE,
    WORDS_WITH_TRANSPOSED_CHARACTERS_DEMOTION_RATE,
};
use crate::correction::edit_distance::edit_distance;

const MAX_INITIAL_SCORE: i32 = 255;

fn saturate(score: i64) -> i32 {
    score.clamp(0, i64::from(i32::MAX)) as i32
}

fn pct(score: i64, percent: i32) -> i64 {
    (score.max(0) * i64::from(percent)) / 100
}

fn ipow(base: i32, exp: u32) -> i64 {
    let mut acc: i64 = 1;
    for _ in 0..exp {
        acc = acc.saturating_mul(i64::from(base));
        if acc > i64::from(i32::MAX) * 4 {
            break;
        }
    }
    acc
}

/// Aggregate facts about one completed traversal pass, enough to drive
/// the ranking formula without threading the whole `CorrectionState`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalOutcome {
    pub input_length: usize,
    pub output_length: usize,
    pub proximity_count: i32,
    pub additional_proximity_count: i32,
    pub excessive_count: i32,
    pub transposed_count: i32,
    pub skipped_count: i32,
    pub quote_diff: i32,
    pub last_char_exceeded: bool,
    pub first_char_unrelated: bool,
    pub excessive_pos_has_adjacent_proximity: bool,
    pub full_edit_distance: bool,
    /// Sum of `normalized_squared_distance` over proximity-matched
    /// positions that had calibrated sweet-spot data, `None` if none did.
    pub touch_position_factor: Option<f32>,
    /// Genuine Damerau-Levenshtein distance read from the traverser's
    /// `EditDistanceTable` at the point this candidate was recorded, minus
    /// the number of transpositions used (`getCurrentEditDistance(...) -
    /// transposedCount`) — not fabricated from the error counters.
    pub edit_distance: i32,
}

impl TraversalOutcome {
    fn has_any_error(&self) -> bool {
        self.proximity_count > 0
            || self.additional_proximity_count > 0
            || self.excessive_count > 0
            || self.transposed_count > 0
            || self.skipped_count > 0
    }
}

/// `calculateFinalProbability`.
#[must_use]
pub fn calculate_final_probability(unigram_freq: i32, outcome: &TraversalOutcome) -> i32 {
    let input_length = outcome.input_length as i32;
    let output_length = outcome.output_length as i32;
    let mut score = i64::from(unigram_freq);

    let ed = (outcome.edit_distance - outcome.quote_diff).max(0);

    let match_count = (input_length - outcome.proximity_count - outcome.excessive_count).max(0);

    if outcome.has_any_error() {
        let len_for_pow = input_length.max(output_length) - ed;
        score = score.saturating_mul(ipow(TYPED_LETTER_MULTIPLIER, len_for_pow.max(0) as u32).min(i64::from(i32::MAX)));
        if input_length > output_length {
            score = pct(score, INPUT_EXCEEDS_OUTPUT_DEMOTION_RATE);
        }
        if ed == 1 && (input_length - output_length).abs() == 1 {
            score = pct(
                score,
                WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_RATE
                    * WORDS_WITH_JUST_ONE_CORRECTION_PROMOTION_MULTIPLIER
                    + 3 * output_length,
            );
        } else if ed == 0 {
            score = score.saturating_mul(i64::from(TYPED_LETTER_MULTIPLIER));
        }
    } else {
        score = score.saturating_mul(ipow(TYPED_LETTER_MULTIPLIER, match_count.max(0) as u32).min(i64::from(i32::MAX)));
    }

    if outcome.first_char_unrelated {
        score = pct(score, FIRST_CHAR_DIFFERENT_DEMOTION_RATE);
    }

    if outcome.skipped_count > 0 {
        let rate = (WORDS_WITH_MISSING_CHARACTER_DEMOTION_RATE
            * (10 * input_length - WORDS_WITH_MISSING_CHARACTER_DEMOTION_START_POS_10X))
            / (10 * input_length - 2).max(1);
        score = pct(score, rate);
    }

    if outcome.transposed_count > 0 {
        score = pct(score, WORDS_WITH_TRANSPOSED_CHARACTERS_DEMOTION_RATE);
    }

    if outcome.excessive_count > 0 {
        score = pct(score, WORDS_WITH_EXCESSIVE_CHARACTER_DEMOTION_RATE);
        if !outcome.last_char_exceeded && !outcome.excessive_pos_has_adjacent_proximity {
            score = pct(score, WORDS_WITH_EXCESSIVE_CHARACTER_OUT_OF_PROXIMITY_DEMOTION_RATE);
        }
    }

    if let Some(factor) = outcome.touch_position_factor {
        score = saturate((score as f64 * f64::from(factor)).round() as i64);
    } else if outcome.proximity_count > 0 {
        score = pct(score, WORDS_WITH_PROXIMITY_CHARACTER_DEMOTION_RATE);
        score = score.saturating_mul(i64::from(TYPED_LETTER_MULTIPLIER));
    }

    if outcome.additional_proximity_count > 0 {
        score = pct(score, WORDS_WITH_ADDITIONAL_PROXIMITY_CHARACTER_DEMOTION_RATE);
    }

    if !outcome.has_any_error() {
        score = pct(score, FULL_MATCHED_WORDS_PROMOTION_RATE);
    } else if outcome.skipped_count > 0 && outcome.proximity_count == 0 && outcome.excessive_count == 0 {
        score = pct(score, WORDS_WITH_MATCH_SKIP_PROMOTION_RATE);
    }

    let same_length = input_length == output_length
        || (outcome.last_char_exceeded && input_length == output_length - 1);
    if same_length && outcome.additional_proximity_count == 0 {
        score = score.saturating_mul(i64::from(FULL_WORD_MULTIPLIER));
    }

    if outcome.full_edit_distance && output_length > input_length + 1 {
        let shift = (output_length - input_length - 1).max(0);
        score = (score >> shift.min(30)).max(1);
    }

    saturate(score)
}

/// `calcFreqForSplitMultipleWords`.
#[must_use]
pub fn calc_freq_for_split_multiple_words(
    freqs: &[i32],
    lengths: &[usize],
    is_space_proximity: bool,
    first_word_capitalized: bool,
    second_word_capitalized: bool,
) -> i32 {
    if freqs.is_empty() || freqs.len() != lengths.len() {
        return 0;
    }
    let n = freqs.len();
    let total_len: usize = lengths.iter().sum();

    let mut total: i64 = 0;
    for (&f, &len) in freqs.iter().zip(lengths.iter()) {
        let demotion = 100 - 80 / (len as i64 + 1);
        total += i64::from(f) * demotion / 100;
    }
    let mut score = (total * 2) / n as i64;

    if n >= 3 {
        // Demote (not reject) weak short words: a categorical reject of any
        // adjacent (1,2)-length pair would also catch common short openers
        // like "i"+"am", so only the aggregate short-word-count check below
        // guards against degenerate splits; per-word weak-frequency demotion
        // still penalizes low-frequency short words without zeroing strong
        // ones.
        let mut singles = 0usize;
        let mut twos = 0usize;
        let threshold = i64::from(MAX_FREQ) * 58 / 100;
        for (&f, &len) in freqs.iter().zip(lengths.iter()) {
            if len <= 4 && i64::from(f) <= threshold {
                score = pct(score, (100 * i64::from(f) / i64::from(MAX_FREQ)) as i32);
            }
            if len == 1 {
                singles += 1;
            } else if len == 2 {
                twos += 1;
            }
            if singles >= 2 || (singles + twos) >= 4 {
                return 0;
            }
        }
        score = pct(score, 80);
    }

    let l = total_len as i64;
    if l > 0 {
        score = pct(score, (100 - 100 / (l * l)).max(0) as i32);
        score = pct(score, (100 + 100 / l) as i32);
    }
    score = score.saturating_mul(ipow(TYPED_LETTER_MULTIPLIER, total_len as u32).min(i64::from(i32::MAX)));

    if is_space_proximity {
        score = pct(score, WORDS_WITH_PROXIMITY_CHARACTER_DEMOTION_RATE);
        score = pct(score, WORDS_WITH_MISTYPED_SPACE_DEMOTION_RATE);
    } else {
        score = pct(score, WORDS_WITH_MISSING_SPACE_CHARACTER_DEMOTION_RATE);
    }

    if first_word_capitalized != second_word_capitalized {
        score = pct(score, TWO_WORDS_CAPITALIZED_DEMOTION_RATE);
    }

    let _ = TWO_WORDS_CORRECTION_DEMOTION_BASE; // reserved for 3+-word chains, not modelled here.
    saturate(score)
}

/// `calcNormalizedScore`: `0.0` when `after` is all spaces.
#[must_use]
pub fn calc_normalized_score(before: &[u16], after: &[u16], raw_score: i32) -> f32 {
    if after.iter().all(|&c| c == u16::from(b' ')) {
        return 0.0;
    }
    let spaces = after.iter().filter(|&&c| c == u16::from(b' ')).count();
    let after_len_no_spaces = after.len().saturating_sub(spaces);
    let min_len = before.len().min(after_len_no_spaces);

    let max_score = f64::from(MAX_INITIAL_SCORE)
        * ipow(TYPED_LETTER_MULTIPLIER, min_len as u32) as f64
        * f64::from(FULL_WORD_MULTIPLIER);
    if max_score <= 0.0 {
        return 0.0;
    }

    let ed = edit_distance(before, after);
    let weight = if after.is_empty() {
        0.0
    } else {
        1.0 - f64::from(ed) / after.len() as f64
    };

    ((f64::from(raw_score) / max_score) * weight).max(0.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_exact_match_promotes() {
        let outcome = TraversalOutcome {
            input_length: 5,
            output_length: 5,
            ..Default::default()
        };
        let score = calculate_final_probability(150, &outcome);
        assert!(score > 150, "exact match should promote frequency, got {score}");
    }

    #[test]
    fn test_first_char_unrelated_demotes() {
        let base = TraversalOutcome {
            input_length: 5,
            output_length: 5,
            ..Default::default()
        };
        let mut demoted = base;
        demoted.first_char_unrelated = true;
        demoted.proximity_count = 0;

        let exact = calculate_final_probability(100, &base);
        let unrelated = calculate_final_probability(100, &demoted);
        assert!(unrelated < exact);
    }

    #[test]
    fn test_normalized_score_all_spaces_is_zero() {
        assert_eq!(calc_normalized_score(&w("hi"), &w("  "), 100), 0.0);
    }

    #[test]
    fn test_normalized_score_in_range() {
        let score = calc_normalized_score(&w("helo"), &w("hello"), 150);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_split_rejects_too_many_short_words() {
        let freqs = [200, 200, 200, 200];
        let lengths = [1usize, 1, 2, 4];
        assert_eq!(
            calc_freq_for_split_multiple_words(&freqs, &lengths, false, false, false),
            0
        );
    }

    #[test]
    fn test_split_allows_strong_leading_single_letter_word() {
        // "i" (1) followed by "am" (2) is a single adjacent (1,2) pair, but
        // both words are high-frequency, so the split should survive with
        // just the usual 3+-word demotion applied, not be zeroed outright.
        let freqs = [255, 200, 150];
        let lengths = [1usize, 2, 5];
        assert!(calc_freq_for_split_multiple_words(&freqs, &lengths, false, false, false) > 0);
    }

    #[test]
    fn test_skip_only_candidate_is_not_treated_as_exact() {
        // A candidate reached purely by skipping one dictionary char
        // (e.g. typing "cat" for "chat") has a real edit distance of 1,
        // not 0 — it must not receive the near-exact `ed == 0` bonus.
        let exact = TraversalOutcome {
            input_length: 3,
            output_length: 3,
            edit_distance: 0,
            ..Default::default()
        };
        let skip_only = TraversalOutcome {
            input_length: 3,
            output_length: 4,
            skipped_count: 1,
            edit_distance: 1,
            ..Default::default()
        };
        let exact_score = calculate_final_probability(150, &exact);
        let skip_score = calculate_final_probability(150, &skip_only);
        assert!(
            skip_score < exact_score,
            "skip-only candidate ({skip_score}) should be demoted relative to an exact match ({exact_score})"
        );
    }
}
