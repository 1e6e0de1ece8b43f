//! Reader trait and its error type.

use crate::ir::{File, Pos};

/// Error that can occur when reading source code into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{pos}: unsupported syntax: {kind}")]
    Unsupported { kind: String, pos: Pos },

    #[error("{pos}: expected {expected}, got {got}")]
    UnexpectedNode {
        expected: String,
        got: String,
        pos: Pos,
    },

    #[error("{pos}: nesting deeper than {limit} levels")]
    TooDeep { limit: usize, pos: Pos },
}

/// A reader parses source code into a Go syntax tree.
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "go").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["go"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source code into a syntax tree.
    fn read(&self, source: &str) -> Result<File, ReadError>;
}
