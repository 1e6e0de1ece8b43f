//! Input readers - parse source code into a syntax tree.

#[cfg(feature = "read-go")]
pub mod go;

#[cfg(feature = "read-go")]
pub use go::{DEFAULT_MAX_DEPTH, GO_READER, GoReader, read_go, read_go_with_limit};
