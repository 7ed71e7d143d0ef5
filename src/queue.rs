//! Bounded candidate min-heap (C6, §4.7).
//!
//! Kept as a sorted `Vec` rather than a binary heap: capacities are small
//! (tens of entries), so a linear insert is simpler to reason about than
//! heap-index bookkeeping, and it makes `outputSuggestions`'s descending
//! drain and normalized-score hoist trivial. The reference implementation
//! sizes its reusable-slot slab to `MAX_WORD_LENGTH` rather than
//! `MAX_WORDS` (`words_priority_queue.h`); we size ours to the caller's
//! requested capacity instead (§10.6) — externally identical behaviour,
//! just not carrying the same internal sizing mismatch.

use crate::correction::ranking::calc_normalized_score;
use crate::types::{Suggestion, SuggestionKind};

#[derive(Debug, Clone)]
struct QueueItem {
    score: i32,
    word: Vec<u16>,
    kind: SuggestionKind,
    exact_match: bool,
    insertion_order: usize,
}

/// Fixed-capacity priority queue ordered by `score`, min at index 0.
#[derive(Debug)]
pub struct CandidateQueue {
    capacity: usize,
    items: Vec<QueueItem>,
    highest_score: i32,
    next_insertion_order: usize,
}

impl CandidateQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            items: Vec::new(),
            highest_score: 0,
            next_insertion_order: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn highest_score(&self) -> i32 {
        self.highest_score
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.highest_score = 0;
        self.next_insertion_order = 0;
    }

    /// `push`: insert if under capacity; otherwise evict the current
    /// minimum if `score` beats it; otherwise drop `word` silently
    /// (§7 "queue saturation" — never an error).
    pub fn push(&mut self, score: i32, word: Vec<u16>, kind: SuggestionKind, exact_match: bool) {
        self.highest_score = self.highest_score.max(score);
        let order = self.next_insertion_order;
        self.next_insertion_order += 1;
        let item = QueueItem {
            score,
            word,
            kind,
            exact_match,
            insertion_order: order,
        };

        if self.items.len() < self.capacity {
            let pos = self.items.partition_point(|it| it.score < score);
            self.items.insert(pos, item);
            return;
        }
        if self.items.is_empty() || score <= self.items[0].score {
            return;
        }
        self.items.remove(0);
        let pos = self.items.partition_point(|it| it.score < score);
        self.items.insert(pos, item);
    }

    /// `outputSuggestions`: descending-score drain, with the candidate
    /// carrying the highest *normalized* score (recomputed against
    /// `before`) hoisted to index 0.
    #[must_use]
    pub fn output_suggestions(&self, before: &[u16]) -> Vec<Suggestion> {
        let mut ranked: Vec<&QueueItem> = self.items.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.insertion_order.cmp(&b.insertion_order)));

        let mut out: Vec<Suggestion> = ranked
            .iter()
            .map(|it| {
                let normalized_score = calc_normalized_score(before, &it.word, it.score);
                Suggestion {
                    word: String::from_utf16_lossy(&it.word),
                    frequency: it.score,
                    kind: it.kind,
                    normalized_score,
                    exact_match: it.exact_match,
                }
            })
            .collect();

        if let Some((best_idx, _)) = out
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.normalized_score.total_cmp(&b.normalized_score))
        {
            if best_idx != 0 {
                out.swap(0, best_idx);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_capacity_bound() {
        let mut q = CandidateQueue::new(2);
        q.push(10, w("a"), SuggestionKind::Correction, false);
        q.push(20, w("b"), SuggestionKind::Correction, false);
        q.push(5, w("c"), SuggestionKind::Correction, false); // dropped, below min
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_eviction_of_minimum() {
        let mut q = CandidateQueue::new(2);
        q.push(10, w("a"), SuggestionKind::Correction, false);
        q.push(20, w("b"), SuggestionKind::Correction, false);
        q.push(30, w("c"), SuggestionKind::Correction, false);
        let out = q.output_suggestions(&w("a"));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.word != "a"));
    }

    #[test]
    fn test_output_is_descending_except_hoist() {
        let mut q = CandidateQueue::new(4);
        q.push(50, w("same"), SuggestionKind::Correction, true);
        q.push(10, w("other"), SuggestionKind::Correction, false);
        let out = q.output_suggestions(&w("same"));
        assert!(out[0].frequency >= out.last().unwrap().frequency || out.len() == 1);
    }
}
