//! Error types for the keytap suggestion engine.
//!
//! Only *construction-time* failures are represented here (opening a
//! dictionary, building a keyboard's proximity geometry). Per-request
//! decoding and traversal never fail: malformed interior trie nodes,
//! saturated queues, and out-of-range coordinates all resolve to sentinel
//! values or empty output, matching the source engine's "never panics on
//! adversarial input" contract.

use thiserror::Error;

/// Primary error type for the keytap engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// IO error while reading a dictionary or keyboard layout file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dictionary buffer doesn't carry a recognised v1/v2 magic.
    #[error("unknown dictionary magic: {magic:02X?}")]
    UnknownMagic { magic: [u8; 4] },

    /// The header claims more bytes than the buffer actually has.
    #[error("truncated dictionary header: expected at least {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// Keyboard geometry failed validation (zero keys, mismatched array
    /// lengths, non-positive grid dimensions).
    #[error("invalid keyboard geometry: {reason}")]
    InvalidKeyboardGeometry { reason: String },

    /// A typed word exceeds the engine's internal length bound.
    #[error("word too long: {length} code points, maximum is {max}")]
    WordTooLong { length: usize, max: usize },

    /// A keyboard layout file failed to parse as JSON.
    #[error("keyboard layout parse error: {message}")]
    LayoutParseError { message: String },
}

/// Result type alias for engine construction operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Extension trait for adding context to a construction-time error.
pub trait ResultExt<T> {
    /// Wrap a failure with additional context, preserving the original
    /// message as a suffix.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| EngineError::LayoutParseError {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::TruncatedHeader {
            expected: 16,
            actual: 4,
        };
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains('4'));
    }

    #[test]
    fn test_unknown_magic() {
        let err = EngineError::UnknownMagic {
            magic: [0xDE, 0xAD, 0xBE, 0xEF],
        };
        let msg = err.to_string();
        assert!(msg.contains("DE"));
    }
}
