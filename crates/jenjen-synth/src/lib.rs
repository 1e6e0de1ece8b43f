//! Go to jennifer synthesis.
//!
//! `jenjen-synth` takes a Go syntax tree and produces a Go program that, when
//! run, rebuilds the same file through the jennifer builder library
//! (`jen.Func().Id("main").Params().Block()`).
//!
//! # Architecture
//!
//! ```text
//! File ──> SymbolTable ──┐
//!   │                    ▼
//!   └── decls ──> Synth (decl → stmt → expr/type) ──> Unit*
//!                                                       │
//!                         ProgramUnit <── assemble ─────┘
//!                              │
//!                              ▼
//!                          GoWriter ──> Go source
//! ```
//!
//! Every syntax node kind has exactly one rule; anything the rules cannot
//! express fails the whole pass with [`SynthError`].
//!
//! # Example
//!
//! ```ignore
//! use jenjen_synth::{AssembleOptions, GoWriter, Layout, assemble};
//!
//! let file = jenjen_syntax::read_go("package main\n\nfunc main() {}\n")?;
//! let program = assemble(&file, &AssembleOptions::new("main").with_entry_point(true))?;
//! let source = GoWriter::emit(&program, Layout::Pretty)?;
//! ```

pub mod assemble;
pub mod chain;
pub mod decl;
pub mod error;
pub mod render;
pub mod symbols;
pub mod synth;

mod expr;
mod stmt;
mod types;

pub use assemble::{AssembleOptions, ProgramUnit, assemble};
pub use chain::{Arg, Chain, Lit, Step, list};
pub use decl::{Unit, unit_name};
pub use error::{RenderError, SynthError};
pub use render::{GoWriter, JEN_PATH, Layout};
pub use symbols::SymbolTable;
pub use synth::{Limits, Synth};
