//! keytap-engine — native soft-keyboard suggestion engine
//!
//! Decodes a binary patricia-trie word dictionary, expands a typed touch
//! sequence against a keyboard's proximity geometry, corrects it against
//! the dictionary via a bounded edit-distance traversal, and ranks the
//! resulting candidates.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use keytap_engine::{Dictionary, EngineOptions, InputState, Session};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("dictionary.dict")?;
//!     let dict = Dictionary::open(&bytes)?;
//!     let mut session = Session::new(&dict, None, EngineOptions::new());
//!     let input = InputState::from_codes(&"helo".encode_utf16().collect::<Vec<_>>());
//!     for suggestion in session.get_suggestions(&input) {
//!         println!("{} ({})", suggestion.word, suggestion.frequency);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Scope
//!
//! The core (dictionary decoding, correction, ranking) never allocates a
//! logging backend, performs no I/O, and never panics on malformed or
//! adversarial dictionary bytes — per-request failures resolve to empty
//! results rather than `Err` (see [`error`]). Construction-time failures
//! (bad magic, truncated header, invalid keyboard geometry) do return
//! `Err`.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]

pub mod char_utils;
pub mod constants;
pub mod correction;
pub mod dictionary;
pub mod digraph;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod proximity;
pub mod queue;
pub mod types;

pub use dictionary::Dictionary;
pub use engine::Session;
pub use error::{EngineError, Result};
pub use formatter::{Formatter, HumanFormatter, JsonFormatter, ShortFormatter};
pub use proximity::ProximityInfo;
pub use types::{
    EngineOptions, InputState, KeyDescriptor, KeyboardGeometry, Suggestion, SuggestionKind,
};

/// Crate version, for diagnostics and the CLI's `inspect` subcommand.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_nonempty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_end_to_end_suggestion() {
        // E1-style scenario: an exact dictionary word should come back
        // as the top suggestion for its own exact input.
        let mut body = vec![1u8, crate::constants::node_flags::IS_TERMINAL];
        body.push(b'h');
        body.push(200);
        let mut buf = constants::magic::DICT_V1.to_vec();
        buf.push(0);
        buf.extend_from_slice(&body);

        let dict = Dictionary::open(&buf).unwrap();
        let mut session = Session::new(&dict, None, EngineOptions::new());
        let input = InputState::from_codes(&[u16::from(b'h')]);
        let suggestions = session.get_suggestions(&input);
        assert_eq!(suggestions[0].word, "h");
    }
}
