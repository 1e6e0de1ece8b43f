//! Command line front end for jenjen.
//!
//! ```text
//! Go source ── jenjen-syntax ──► File ── jenjen-synth ──► ProgramUnit ──► Go program
//! ```
//!
//! `verify` closes the loop by running the program and comparing what it
//! prints with the input.

pub mod commands;
pub mod config;
pub mod run;

pub use config::JenjenConfig;
