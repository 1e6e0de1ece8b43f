//! Go syntax tree and reader for jenjen.
//!
//! `jenjen-syntax` turns Go source into an owned, serializable syntax tree
//! shaped after Go's own `go/ast` package. The tree is the input of
//! `jenjen-synth`, which rewrites it as jennifer builder calls.
//!
//! # Architecture
//!
//! ```text
//! Go source ──> tree-sitter ──> ReadContext ──> File (ir)
//!                (arborium-go)   (input/go.rs)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use jenjen_syntax::read_go;
//!
//! let file = read_go("package main\n\nfunc main() {}\n")?;
//! assert_eq!(file.package.name, "main");
//! ```
//!
//! Generics are outside the supported grammar and are rejected with
//! [`ReadError::Unsupported`].

pub mod ir;
pub mod traits;

pub mod input;

// Re-exports: syntax tree types
pub use ir::{
    BasicLit, Block, BranchTok, ChanDir, Decl, DeclToken, Expr, ExprKind, Field, FieldList, File,
    FuncDecl, FuncType, GenDecl, Ident, ImportName, ImportSpec, IncDec, LitKind, Pos, Spec, Stmt,
    StmtKind, StructureEq, TypeSpec, ValueSpec,
};

// Re-exports: Traits
pub use traits::{ReadError, Reader};

// Re-exports: Built-in readers
#[cfg(feature = "read-go")]
pub use input::{DEFAULT_MAX_DEPTH, GO_READER, GoReader, read_go, read_go_with_limit};
