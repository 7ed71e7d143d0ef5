//! Benchmarks the single-word suggestion path against a synthetic
//! dictionary, varying input length and error count.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use keytap_engine::{constants, Dictionary, EngineOptions, InputState, Session};

/// Builds a flat v1 dictionary of `count` distinct words, each a random
/// walk over `a`..`z` of `word_len` characters, frequencies descending.
fn build_dictionary(count: usize, word_len: usize) -> Vec<u8> {
    let mut body = Vec::new();
    body.push(count.min(255) as u8);
    for i in 0..count {
        let mut word = Vec::with_capacity(word_len);
        let mut seed = i as u32 + 1;
        for _ in 0..word_len {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            word.push(b'a' + (seed % 26) as u8);
        }
        let mut flags = constants::node_flags::IS_TERMINAL;
        if word.len() > 1 {
            flags |= constants::node_flags::HAS_MULTIPLE_CHARS;
        }
        body.push(flags);
        if word.len() > 1 {
            body.extend_from_slice(&word);
            body.push(constants::CHAR_TERMINATOR);
        } else {
            body.push(word[0]);
        }
        body.push((255 - (i % 255)) as u8);
    }
    let mut buf = constants::magic::DICT_V1.to_vec();
    buf.push(0);
    buf.extend_from_slice(&body);
    buf
}

fn bench_single_word(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_suggestions");
    for word_len in [4usize, 8, 12] {
        let buf = build_dictionary(200, word_len);
        let dict = Dictionary::open(&buf).expect("synthetic dictionary should parse");
        let typed: Vec<u16> = (0..word_len).map(|i| u16::from(b'a' + (i % 26) as u8)).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(word_len),
            &typed,
            |b, typed| {
                let mut session = Session::new(&dict, None, EngineOptions::new());
                let input = InputState::from_codes(typed);
                b.iter(|| session.get_suggestions(&input));
            },
        );
    }
    group.finish();
}

fn bench_strict_vs_default(c: &mut Criterion) {
    let buf = build_dictionary(200, 8);
    let dict = Dictionary::open(&buf).expect("synthetic dictionary should parse");
    let typed: Vec<u16> = "abcdefgh".encode_utf16().collect();

    let mut group = c.benchmark_group("error_budget");
    group.bench_function("default_2_errors", |b| {
        let mut session = Session::new(&dict, None, EngineOptions::new());
        let input = InputState::from_codes(&typed);
        b.iter(|| session.get_suggestions(&input));
    });
    group.bench_function("strict_1_error", |b| {
        let mut session = Session::new(&dict, None, EngineOptions::autocorrect_disabled());
        let input = InputState::from_codes(&typed);
        b.iter(|| session.get_suggestions(&input));
    });
    group.finish();
}

criterion_group!(benches, bench_single_word, bench_strict_vs_default);
criterion_main!(benches);
