//! Import alias table.

use crate::error::SynthError;
use jenjen_syntax::{ImportName, ImportSpec};
use std::collections::HashMap;

/// Local import alias to package path, built once per file.
///
/// Selector synthesis consults the table to decide between a qualified
/// reference (`Qual(path, name)`) and plain member access.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    paths: HashMap<String, String>,
    /// Explicitly aliased imports as `(path, alias)`, in source order.
    explicit: Vec<(String, String)>,
    /// Blank (`_`) imports, in source order.
    anonymous: Vec<String>,
}

impl SymbolTable {
    /// Build the table from a file's import specs.
    ///
    /// Dot imports and two imports sharing one local name are rejected.
    pub fn build(imports: &[ImportSpec]) -> Result<Self, SynthError> {
        let mut table = SymbolTable::default();
        for spec in imports {
            let alias = match &spec.name {
                Some(ImportName::Dot) => {
                    return Err(SynthError::DotImport {
                        path: spec.path.clone(),
                        pos: spec.pos,
                    });
                }
                Some(ImportName::Blank) => {
                    table.anonymous.push(spec.path.clone());
                    continue;
                }
                Some(ImportName::Alias(alias)) => {
                    table.explicit.push((spec.path.clone(), alias.clone()));
                    alias.clone()
                }
                None => default_alias(&spec.path).to_string(),
            };

            if let Some(first) = table.paths.get(&alias) {
                return Err(SynthError::DuplicateAlias {
                    alias,
                    first: first.clone(),
                    second: spec.path.clone(),
                    pos: spec.pos,
                });
            }
            table.paths.insert(alias, spec.path.clone());
        }
        tracing::debug!(
            aliases = table.paths.len(),
            anonymous = table.anonymous.len(),
            "built symbol table"
        );
        Ok(table)
    }

    /// Package path for a local name, if it names an import.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.paths.get(alias).map(String::as_str)
    }

    pub fn anonymous(&self) -> &[String] {
        &self.anonymous
    }

    /// `(path, alias)` pairs for imports written with an explicit name.
    pub fn explicit_aliases(&self) -> &[(String, String)] {
        &self.explicit
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Last path segment, skipping a major version: `foo/v2` and `yaml.v3`
/// both name their package without the version.
fn default_alias(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    let segment = match segments.next() {
        Some(parent) if major_version(last).is_some_and(|n| n >= 2) => parent,
        _ => last,
    };
    match segment.rsplit_once('.') {
        Some((name, version)) if !name.is_empty() && major_version(version).is_some() => name,
        _ => segment,
    }
}

/// `N` of a `vN` version element. Module paths start their `/vN` suffix at
/// `v2`; gopkg.in style `.vN` suffixes start at `v0`.
fn major_version(segment: &str) -> Option<u64> {
    segment.strip_prefix('v')?.parse().ok()
}
