//! Structural equality for syntax trees.
//!
//! `structure_eq` compares trees ignoring source positions, so a tree read
//! from a file compares equal to the same tree read back after the file was
//! regenerated (and reformatted) elsewhere.
//!
//! # Ignored fields
//!
//! - every `pos` field (offset, line, column)
//!
//! # Compared fields
//!
//! - all names, literal text and operators
//! - `grouped` on declarations, since it changes the generated output

use super::{Decl, Expr, File, Stmt};
use serde::Serialize;
use serde_json::Value;

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores where each node was in the source.
pub trait StructureEq {
    /// Compare two values for structural equality.
    fn structure_eq(&self, other: &Self) -> bool;
}

impl StructureEq for File {
    fn structure_eq(&self, other: &Self) -> bool {
        self.package.name == other.package.name
            && position_free_eq(&self.imports, &other.imports)
            && vec_structure_eq(&self.decls, &other.decls)
    }
}

impl StructureEq for Decl {
    fn structure_eq(&self, other: &Self) -> bool {
        position_free_eq(self, other)
    }
}

impl StructureEq for Stmt {
    fn structure_eq(&self, other: &Self) -> bool {
        position_free_eq(self, other)
    }
}

impl StructureEq for Expr {
    fn structure_eq(&self, other: &Self) -> bool {
        position_free_eq(self, other)
    }
}

/// Helper for comparing slices of structurally comparable items.
pub(crate) fn vec_structure_eq<T: StructureEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y))
}

fn position_free_eq<T: Serialize + ?Sized>(a: &T, b: &T) -> bool {
    match (serde_json::to_value(a), serde_json::to_value(b)) {
        (Ok(mut a), Ok(mut b)) => {
            strip_positions(&mut a);
            strip_positions(&mut b);
            a == b
        }
        _ => false,
    }
}

fn strip_positions(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("pos");
            map.values_mut().for_each(strip_positions);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_positions),
        _ => {}
    }
}
