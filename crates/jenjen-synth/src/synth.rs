//! Synthesis context shared by the expression, type, statement and
//! declaration rules.

use crate::error::SynthError;
use crate::symbols::SymbolTable;
use jenjen_syntax::Pos;

/// Resource limits for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest syntax nesting synthesized before giving up.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Walks syntax trees and produces builder-call chains.
///
/// Holds only the read-only symbol table and a depth counter, so one
/// `Synth` per declaration is enough to synthesize declarations on
/// separate threads.
pub struct Synth<'a> {
    pub(crate) table: &'a SymbolTable,
    limits: Limits,
    depth: usize,
}

impl<'a> Synth<'a> {
    pub fn new(table: &'a SymbolTable, limits: Limits) -> Self {
        Self {
            table,
            limits,
            depth: 0,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        self.table
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        pos: Pos,
        f: impl FnOnce(&mut Self) -> Result<T, SynthError>,
    ) -> Result<T, SynthError> {
        if self.depth >= self.limits.max_depth {
            tracing::warn!(limit = self.limits.max_depth, %pos, "synthesis depth limit reached");
            return Err(SynthError::TooDeep {
                limit: self.limits.max_depth,
                pos,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
