//! Trie traverser (C9, §4.5).
//!
//! Walks the dictionary depth-first, maintaining one [`CorrectionState`]
//! frame per output depth in `state_stack` (an explicit, pre-sized
//! array rather than a per-call local, per the design note against deep
//! native recursion, §9). Control flow itself still uses Rust's call
//! stack: depth is hard-capped at `max_depth` (itself bounded by
//! `MAX_DEPTH_MULTIPLIER * input_length`, at most a few hundred), which
//! is far below any realistic stack limit, so the safety concern the
//! source's note is about — unbounded native recursion on an adversarial
//! dictionary — doesn't apply here regardless of which loop shape is
//! used for the walk itself.
//!
//! An [`EditDistanceTable`] is threaded alongside `output`: every branch
//! that pushes an output character advances the table's DP row, and rolls
//! it back to match on backtrack, so the real Damerau-Levenshtein distance
//! is available at each terminal for ranking (`getCurrentEditDistance`),
//! rather than one reconstructed from the error counters.

use crate::constants::{MAX_DEPTH_MULTIPLIER, NOT_A_CHARACTER};
use crate::correction::edit_distance::EditDistanceTable;
use crate::correction::ranking::TraversalOutcome;
use crate::correction::CorrectionState;
use crate::dictionary::Dictionary;
use crate::proximity::{ProximityInfo, ProximityMatch};
use crate::types::InputState;

/// One candidate discovered by the traverser: its reconstructed word,
/// unigram frequency, and the error-tracking outcome ranking needs.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub word: Vec<u16>,
    pub unigram_freq: i32,
    pub outcome: TraversalOutcome,
}

/// Safety bound against pathological branching on adversarial
/// dictionaries; not named in the source, which relies on native stack
/// exhaustion as an (unintentional) backstop instead.
const MAX_TRAVERSE_STEPS: u32 = 200_000;

struct Ctx<'a> {
    dict: &'a Dictionary<'a>,
    proximity: Option<&'a ProximityInfo>,
    input: &'a InputState,
    max_errors: i32,
    max_edit_distance: i32,
    max_depth: usize,
    use_full_edit_distance: bool,
    steps: u32,
}

/// Runs a single-word correction pass and returns every terminal reached
/// within the error budget.
#[must_use]
pub fn find_candidates(
    dict: &Dictionary<'_>,
    proximity: Option<&ProximityInfo>,
    input: &InputState,
    max_errors: i32,
    use_full_edit_distance: bool,
) -> Vec<Candidate> {
    if input.is_empty() {
        return Vec::new();
    }
    let input_length = input.len();
    let max_edit_distance = if input_length < 5 {
        2
    } else {
        (input_length / 2) as i32
    };
    let max_depth = input_length * MAX_DEPTH_MULTIPLIER;

    let mut ctx = Ctx {
        dict,
        proximity,
        input,
        max_errors,
        max_edit_distance,
        max_depth,
        use_full_edit_distance,
        steps: 0,
    };
    let mut state_stack = vec![CorrectionState::default(); max_depth + 1];
    let mut output = Vec::with_capacity(max_depth);
    let mut table = EditDistanceTable::new(&input.codes);
    let mut out = Vec::new();

    walk_array(
        &mut ctx,
        dict.root_pos(),
        0,
        0,
        CorrectionState::default(),
        &mut state_stack,
        &mut output,
        &mut table,
        &mut out,
    );
    out
}

#[allow(clippy::too_many_arguments)]
fn walk_array(
    ctx: &mut Ctx<'_>,
    array_pos: usize,
    depth: usize,
    input_index: usize,
    state: CorrectionState,
    state_stack: &mut Vec<CorrectionState>,
    output: &mut Vec<u16>,
    table: &mut EditDistanceTable,
    out: &mut Vec<Candidate>,
) {
    if ctx.steps >= MAX_TRAVERSE_STEPS || depth >= ctx.max_depth {
        return;
    }
    let entries = ctx.dict.entries_at(array_pos);
    for entry in entries {
        ctx.steps += 1;
        if ctx.steps >= MAX_TRAVERSE_STEPS {
            return;
        }
        walk_entry(
            ctx,
            &entry,
            0,
            depth,
            input_index,
            state,
            state_stack,
            output,
            table,
            out,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_entry(
    ctx: &mut Ctx<'_>,
    entry: &crate::dictionary::trie::PtNodeEntry,
    char_idx: usize,
    depth: usize,
    input_index: usize,
    state: CorrectionState,
    state_stack: &mut Vec<CorrectionState>,
    output: &mut Vec<u16>,
    table: &mut EditDistanceTable,
    out: &mut Vec<Candidate>,
) {
    if depth >= ctx.max_depth || state.errors_used() > ctx.max_errors {
        return;
    }
    if state.proximity_count > ctx.max_edit_distance {
        return;
    }

    if char_idx >= entry.chars.len() {
        if entry.is_terminal() && !entry.is_not_a_word() && !entry.is_blacklisted() {
            let fully_typed = input_index >= ctx.input.len();
            let completion_ok = ctx.use_full_edit_distance || fully_typed;
            if fully_typed || completion_ok {
                let ed = (table.current_distance() - state.transposed_count / 2).max(0);
                let outcome = TraversalOutcome {
                    input_length: ctx.input.len(),
                    output_length: output.len(),
                    proximity_count: state.proximity_count,
                    additional_proximity_count: state.additional_proximity_count,
                    excessive_count: state.excessive_count,
                    transposed_count: state.transposed_count,
                    skipped_count: state.skipped_count,
                    quote_diff: 0,
                    last_char_exceeded: state.last_char_exceeded,
                    first_char_unrelated: false,
                    excessive_pos_has_adjacent_proximity: false,
                    full_edit_distance: ctx.use_full_edit_distance,
                    touch_position_factor: None,
                    edit_distance: ed,
                };
                out.push(Candidate {
                    word: output.clone(),
                    unigram_freq: i32::from(entry.frequency.unwrap_or(0)),
                    outcome,
                });
            }
        }
        if let Some(children) = entry.children_pos {
            walk_array(ctx, children, depth, input_index, state, state_stack, output, table, out);
        }
        return;
    }

    let c = entry.chars[char_idx];
    let next_char_idx = char_idx + 1;

    if input_index < ctx.input.len() {
        let typed = ctx.input.codes[input_index];
        let primary = i32::from(typed);
        let prox_list = &ctx.input.proximities[input_index];
        let m = match ctx.proximity {
            Some(p) => p.matched_proximity_id(primary, c, prox_list, true),
            None if i32::from(c) == primary => ProximityMatch::EquivalentChar,
            None => ProximityMatch::UnrelatedChar,
        };

        match m {
            ProximityMatch::EquivalentChar => {
                let mut next_state = state;
                next_state.equivalent_count += 1;
                output.push(c);
                table.advance_row(c);
                record_and_recurse(
                    ctx, entry, next_char_idx, depth + 1, input_index + 1, next_state,
                    state_stack, output, table, out,
                );
                table.truncate(output.len() - 1);
                output.pop();
            }
            ProximityMatch::NearProximityChar => {
                let mut next_state = state;
                next_state.proximity_count += 1;
                output.push(c);
                table.advance_row(c);
                record_and_recurse(
                    ctx, entry, next_char_idx, depth + 1, input_index + 1, next_state,
                    state_stack, output, table, out,
                );
                table.truncate(output.len() - 1);
                output.pop();
            }
            ProximityMatch::AdditionalProximityChar => {
                let mut next_state = state;
                next_state.additional_proximity_count += 1;
                output.push(c);
                table.advance_row(c);
                record_and_recurse(
                    ctx, entry, next_char_idx, depth + 1, input_index + 1, next_state,
                    state_stack, output, table, out,
                );
                table.truncate(output.len() - 1);
                output.pop();
            }
            ProximityMatch::UnrelatedChar => {
                // Hypothesis 1: this dictionary char was skipped by the
                // typist (advance output only).
                if state.errors_used() + 1 <= ctx.max_errors {
                    let mut skip_state = state;
                    skip_state.skipped_count += 1;
                    output.push(c);
                    table.advance_row(c);
                    record_and_recurse(
                        ctx, entry, next_char_idx, depth + 1, input_index, skip_state,
                        state_stack, output, table, out,
                    );
                    table.truncate(output.len() - 1);
                    output.pop();
                }
                // Hypothesis 2: the typed char was an excessive/spurious
                // keystroke (advance input only, retry this dict char).
                if state.errors_used() + 1 <= ctx.max_errors && input_index + 1 < ctx.input.len() {
                    let mut excess_state = state;
                    excess_state.excessive_count += 1;
                    walk_entry(
                        ctx, entry, char_idx, depth, input_index + 1, excess_state,
                        state_stack, output, table, out,
                    );
                }
                // Hypothesis 3: transposition of the next two typed chars.
                if state.errors_used() + 1 <= ctx.max_errors
                    && char_idx + 1 < entry.chars.len()
                    && input_index + 1 < ctx.input.len()
                    && entry.chars[char_idx + 1] == typed
                    && c == ctx.input.codes[input_index + 1]
                {
                    let mut t_state = state;
                    t_state.transposed_count += 2;
                    output.push(c);
                    table.advance_row(c);
                    output.push(entry.chars[char_idx + 1]);
                    table.advance_row(entry.chars[char_idx + 1]);
                    walk_entry(
                        ctx, entry, char_idx + 2, depth + 2, input_index + 2, t_state,
                        state_stack, output, table, out,
                    );
                    table.truncate(output.len() - 2);
                    output.pop();
                    output.pop();
                }
            }
        }
    } else if ctx.use_full_edit_distance {
        // Completion beyond the typed length.
        let mut next_state = state;
        next_state.last_char_exceeded = true;
        output.push(c);
        table.advance_row(c);
        record_and_recurse(
            ctx, entry, next_char_idx, depth + 1, input_index, next_state, state_stack, output,
            table, out,
        );
        table.truncate(output.len() - 1);
        output.pop();
    }
    let _ = NOT_A_CHARACTER;
}

#[allow(clippy::too_many_arguments)]
fn record_and_recurse(
    ctx: &mut Ctx<'_>,
    entry: &crate::dictionary::trie::PtNodeEntry,
    char_idx: usize,
    depth: usize,
    input_index: usize,
    state: CorrectionState,
    state_stack: &mut Vec<CorrectionState>,
    output: &mut Vec<u16>,
    table: &mut EditDistanceTable,
    out: &mut Vec<Candidate>,
) {
    state.check_single_error_position();
    if depth < state_stack.len() {
        state_stack[depth] = state;
    }
    walk_entry(ctx, entry, char_idx, depth, input_index, state, state_stack, output, table, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::magic;

    fn build_dict(words: &[(&str, u8)]) -> Vec<u8> {
        // Single flat group at the root containing one entry per word;
        // good enough for traversal unit tests without nested arrays.
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
    fn test_exact_match_found() {
        let buf = build_dict(&[("hello", 150), ("help", 140)]);
        let dict = Dictionary::open(&buf).unwrap();
        let input = InputState::from_codes(&"hello".encode_utf16().collect::<Vec<_>>());
        let candidates = find_candidates(&dict, None, &input, 2, false);
        assert!(candidates.iter().any(|c| c.word == "hello".encode_utf16().collect::<Vec<_>>()));
    }

    #[test]
    fn test_no_match_beyond_budget() {
        let buf = build_dict(&[("hello", 150)]);
        let dict = Dictionary::open(&buf).unwrap();
        let input = InputState::from_codes(&"xyzzy".encode_utf16().collect::<Vec<_>>());
        let candidates = find_candidates(&dict, None, &input, 2, false);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_transposition_recovers_word() {
        let buf = build_dict(&[("the", 255)]);
        let dict = Dictionary::open(&buf).unwrap();
        let input = InputState::from_codes(&"teh".encode_utf16().collect::<Vec<_>>());
        let candidates = find_candidates(&dict, None, &input, 2, false);
        assert!(candidates.iter().any(|c| c.word == "the".encode_utf16().collect::<Vec<_>>()));
    }

    #[test]
    fn test_exact_match_has_zero_edit_distance() {
        let buf = build_dict(&[("hello", 150)]);
        let dict = Dictionary::open(&buf).unwrap();
        let input = InputState::from_codes(&"hello".encode_utf16().collect::<Vec<_>>());
        let candidates = find_candidates(&dict, None, &input, 2, false);
        let hit = candidates
            .iter()
            .find(|c| c.word == "hello".encode_utf16().collect::<Vec<_>>())
            .expect("exact match should be found");
        assert_eq!(hit.outcome.edit_distance, 0);
    }

    #[test]
    fn test_skip_candidate_has_nonzero_edit_distance() {
        // Typing "ct" should reach "cat" only via a skip of the 'a'.
        let buf = build_dict(&[("cat", 200)]);
        let dict = Dictionary::open(&buf).unwrap();
        let input = InputState::from_codes(&"ct".encode_utf16().collect::<Vec<_>>());
        let candidates = find_candidates(&dict, None, &input, 2, true);
        let hit = candidates
            .iter()
            .find(|c| c.word == "cat".encode_utf16().collect::<Vec<_>>())
            .expect("skip-recovered match should be found");
        assert!(hit.outcome.skipped_count > 0);
        assert!(
            hit.outcome.edit_distance > 0,
            "skip-only candidate must not report a fabricated zero edit distance"
        );
    }
}
