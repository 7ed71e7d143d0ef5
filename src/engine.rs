//! Per-request session orchestration (C11, §4.8).

use crate::constants::{
    MIN_INPUT_LENGTH_FOR_THREE_OR_MORE_WORDS_CORRECTION,
    MIN_USER_TYPED_LENGTH_FOR_MULTIPLE_WORD_SUGGESTION,
    MULTIPLE_WORDS_SUGGESTION_MAX_TOTAL_TRAVERSE_COUNT, MULTIPLE_WORDS_SUGGESTION_MAX_WORDS,
    START_TWO_WORDS_CORRECTION_THRESHOLD,
};
use crate::correction::ranking::{calc_freq_for_split_multiple_words, calculate_final_probability};
use crate::correction::traversal;
use crate::digraph;
use crate::dictionary::Dictionary;
use crate::proximity::ProximityInfo;
use crate::queue::CandidateQueue;
use crate::types::{EngineOptions, InputState, Suggestion, SuggestionKind};

/// Owns the per-request working state (queue, correction scratch space)
/// for one dictionary + keyboard pairing. Borrows both, so it is cheap
/// to construct per call site; construct one per concurrent caller
/// rather than sharing across threads (§5, `Session` is effectively
/// `!Send` by holding borrowed state plus owned scratch buffers).
pub struct Session<'a> {
    dictionary: &'a Dictionary<'a>,
    proximity: Option<&'a ProximityInfo>,
    options: EngineOptions,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(
        dictionary: &'a Dictionary<'a>,
        proximity: Option<&'a ProximityInfo>,
        options: EngineOptions,
    ) -> Self {
        Self {
            dictionary,
            proximity,
            options,
        }
    }

    /// `getSuggestions`.
    #[must_use]
    pub fn get_suggestions(&mut self, input: &InputState) -> Vec<Suggestion> {
        if input.is_empty() || input.len() > self.options.max_word_len {
            return Vec::new();
        }

        let mut queue = CandidateQueue::new(self.options.max_words);

        self.run_single_word_pass(input, &mut queue);

        let has_autocorrect_candidate = queue
            .output_suggestions(&input.codes)
            .first()
            .is_some_and(|s| s.normalized_score > START_TWO_WORDS_CORRECTION_THRESHOLD);
        let _ = has_autocorrect_candidate; // informs future gesture/auto-accept wiring.

        if input.len() >= MIN_USER_TYPED_LENGTH_FOR_MULTIPLE_WORD_SUGGESTION {
            self.run_multi_word_pass(input, &mut queue);
        }

        queue.output_suggestions(&input.codes)
    }

    fn run_single_word_pass(&self, input: &InputState, queue: &mut CandidateQueue) {
        let table = self.dictionary.digraph_table();
        let variants = if table.is_empty() {
            vec![input.codes.clone()]
        } else {
            let mut v = digraph::expand_digraphs(
                &input.codes,
                table,
                crate::constants::DEFAULT_MAX_DIGRAPH_SEARCH_DEPTH,
            );
            v.push(input.codes.clone());
            v
        };

        for variant in variants {
            let variant_input = if variant == input.codes {
                input.clone()
            } else {
                InputState::from_codes(&variant)
            };
            let candidates = traversal::find_candidates(
                self.dictionary,
                self.proximity,
                &variant_input,
                self.options.max_errors(),
                self.options.use_full_edit_distance,
            );
            for c in candidates {
                let score = calculate_final_probability(c.unigram_freq, &c.outcome);
                let exact_match = c.outcome.proximity_count == 0
                    && c.outcome.excessive_count == 0
                    && c.outcome.transposed_count == 0
                    && c.outcome.skipped_count == 0
                    && c.outcome.additional_proximity_count == 0;
                queue.push(score, c.word, SuggestionKind::Correction, exact_match);
            }
        }
    }

    /// Recursively splits `input` into up to `MULTIPLE_WORDS_SUGGESTION_MAX_WORDS`
    /// dictionary words, bounded by a total traversal budget
    /// (`MULTIPLE_WORDS_SUGGESTION_MAX_TOTAL_TRAVERSE_COUNT`), scoring and
    /// queuing every complete split that covers the whole input.
    fn run_multi_word_pass(&self, input: &InputState, queue: &mut CandidateQueue) {
        let mut budget = MULTIPLE_WORDS_SUGGESTION_MAX_TOTAL_TRAVERSE_COUNT;
        let mut segments: Vec<(Vec<u16>, i32, usize)> = Vec::new();
        let mut space_flags: Vec<bool> = Vec::new();
        self.collect_word_splits(input, 0, &mut segments, &mut space_flags, &mut budget, queue);
    }

    #[allow(clippy::too_many_arguments)]
    fn collect_word_splits(
        &self,
        input: &InputState,
        start: usize,
        segments: &mut Vec<(Vec<u16>, i32, usize)>,
        space_flags: &mut Vec<bool>,
        budget: &mut u32,
        queue: &mut CandidateQueue,
    ) {
        if segments.len() + 1 > MULTIPLE_WORDS_SUGGESTION_MAX_WORDS {
            return;
        }
        if segments.len() + 1 >= 3
            && input.len() < MIN_INPUT_LENGTH_FOR_THREE_OR_MORE_WORDS_CORRECTION
        {
            return;
        }

        for end in (start + 1)..=input.len() {
            if *budget == 0 {
                return;
            }
            *budget -= 1;

            let slice = InputState::from_codes(&input.codes[start..end]);
            let hits = traversal::find_candidates(
                self.dictionary,
                self.proximity,
                &slice,
                self.options.max_errors(),
                false,
            );
            let Some(best) = hits.iter().max_by_key(|c| c.unigram_freq) else {
                continue;
            };

            segments.push((best.word.clone(), best.unigram_freq, best.word.len()));
            let is_space_proximity = self
                .proximity
                .zip(
                    input
                        .xs
                        .get(end.saturating_sub(1))
                        .copied()
                        .zip(input.ys.get(end.saturating_sub(1)).copied()),
                )
                .is_some_and(|(p, (x, y))| p.has_space_proximity(x, y));
            space_flags.push(is_space_proximity);

            if end == input.len() {
                if segments.len() >= 2 {
                    self.emit_split_candidate(segments, space_flags, queue);
                }
            } else {
                self.collect_word_splits(input, end, segments, space_flags, budget, queue);
            }

            space_flags.pop();
            segments.pop();
        }
    }

    fn emit_split_candidate(
        &self,
        segments: &[(Vec<u16>, i32, usize)],
        space_flags: &[bool],
        queue: &mut CandidateQueue,
    ) {
        let freqs: Vec<i32> = segments.iter().map(|s| s.1).collect();
        let lengths: Vec<usize> = segments.iter().map(|s| s.2).collect();
        let is_space_proximity = !space_flags.is_empty() && space_flags.iter().all(|&b| b);

        let split_score =
            calc_freq_for_split_multiple_words(&freqs, &lengths, is_space_proximity, false, false);
        if split_score <= 0 {
            return;
        }

        let mut combined = segments[0].0.clone();
        for (word, _, _) in &segments[1..] {
            combined.push(u16::from(b' '));
            combined.extend_from_slice(word);
        }
        queue.push(split_score, combined, SuggestionKind::Correction, false);
    }

    /// `getBigrams`.
    #[must_use]
    pub fn get_bigrams(&self, prev_word: &[u16], input: &InputState) -> Vec<Suggestion> {
        let mut hits = self.dictionary.bigrams_for(prev_word);
        if !input.is_empty() {
            let first_primary = input.codes[0];
            let first_prox = &input.proximities[0];
            hits.retain(|(w, _)| {
                w.first().is_some_and(|&c| {
                    c == first_primary || first_prox.contains(&i32::from(c))
                })
            });
        }
        hits.sort_by(|a, b| b.1.cmp(&a.1));
        hits.truncate(self.options.max_words);
        hits.into_iter()
            .map(|(word, freq)| Suggestion {
                word: String::from_utf16_lossy(&word),
                frequency: freq,
                kind: SuggestionKind::Prediction,
                normalized_score: 0.0,
                exact_match: false,
            })
            .collect()
    }

    /// `getFrequency`.
    #[must_use]
    pub fn get_frequency(&self, word: &[u16]) -> Option<i32> {
        self.dictionary.get_frequency(word)
    }

    /// `isValidBigram`.
    #[must_use]
    pub fn is_valid_bigram(&self, w1: &[u16], w2: &[u16]) -> bool {
        self.dictionary.is_valid_bigram(w1, w2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::magic;

    fn build_dict(words: &[(&str, u8)]) -> Vec<u8> {
        let mut body = Vec::new();
        body.push(words.len() as u8);
        for (word, freq) in words {
            let chars: Vec<u16> = word.encode_utf16().collect();
            let mut flags = crate::constants::node_flags::IS_TERMINAL;
            if chars.len() > 1 {
                flags |= crate::constants::node_flags::HAS_MULTIPLE_CHARS;
            }
            body.push(flags);
            if chars.len() > 1 {
                for &c in &chars {
                    body.push(c as u8);
                }
                body.push(0x1F);
            } else {
                body.push(chars[0] as u8);
            }
            body.push(*freq);
        }
        let mut buf = magic::DICT_V1.to_vec();
        buf.push(0);
        buf.extend_from_slice(&body);
        buf
    }

    #[test]
    fn test_get_suggestions_exact_word_present() {
        let buf = build_dict(&[("hello", 150), ("help", 140), ("held", 100)]);
        let dict = Dictionary::open(&buf).unwrap();
        let mut session = Session::new(&dict, None, EngineOptions::new());
        let input = InputState::from_codes(&"hello".encode_utf16().collect::<Vec<_>>());
        let suggestions = session.get_suggestions(&input);
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].word, "hello");
    }

    #[test]
    fn test_get_suggestions_caps_length() {
        let buf = build_dict(&[("hi", 10)]);
        let dict = Dictionary::open(&buf).unwrap();
        let mut opts = EngineOptions::new();
        opts.max_word_len = 3;
        let mut session = Session::new(&dict, None, opts);
        let too_long: Vec<u16> = "abcdefghij".encode_utf16().collect();
        let input = InputState::from_codes(&too_long);
        assert!(session.get_suggestions(&input).is_empty());
    }

    #[test]
    fn test_get_frequency_roundtrip() {
        let buf = build_dict(&[("cat", 99)]);
        let dict = Dictionary::open(&buf).unwrap();
        let session = Session::new(&dict, None, EngineOptions::new());
        let word: Vec<u16> = "cat".encode_utf16().collect();
        assert_eq!(session.get_frequency(&word), Some(99));
    }

    #[test]
    fn test_three_way_split_surfaces_missing_spaces() {
        let buf = build_dict(&[("i", 255), ("am", 200), ("happy", 150)]);
        let dict = Dictionary::open(&buf).unwrap();
        let mut session = Session::new(&dict, None, EngineOptions::new());
        let input = InputState::from_codes(&"iamhappy".encode_utf16().collect::<Vec<_>>());
        let suggestions = session.get_suggestions(&input);
        assert!(
            suggestions.iter().any(|s| s.word == "i am happy"),
            "expected \"i am happy\" among {suggestions:?}"
        );
    }
}
