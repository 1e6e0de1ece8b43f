//! Program assembly: one generator unit per declaration plus the `genFile`
//! build step.

use crate::decl::Unit;
use crate::error::SynthError;
use crate::symbols::SymbolTable;
use crate::synth::{Limits, Synth};
use jenjen_syntax::File;
use rayon::prelude::*;
use std::collections::HashSet;

/// Options for [`assemble`].
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Package clause of the emitted program.
    pub package: String,
    /// Append a `main` that builds the file and prints it.
    pub entry_point: bool,
    /// Synthesize declarations on the rayon pool.
    pub parallel: bool,
    pub limits: Limits,
}

impl AssembleOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            entry_point: false,
            parallel: false,
            limits: Limits::default(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: bool) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

/// Everything needed to write the generator program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramUnit {
    /// Package clause of the emitted program.
    pub package: String,
    /// Package name of the file being rebuilt (`jen.NewFile(name)`).
    pub name: String,
    /// Blank-imported paths, registered with `ret.Anon`.
    pub anon_imports: Vec<String>,
    /// `(path, alias)` pairs registered with `ret.ImportAlias`.
    pub aliases: Vec<(String, String)>,
    /// Generator units in source order.
    pub units: Vec<Unit>,
    pub entry_point: bool,
}

/// Build the generator program for `file`.
///
/// Fails before any synthesis when the program name is empty or the imports
/// are ambiguous; otherwise fails only if a declaration fails.
#[tracing::instrument(skip_all, fields(package = %options.package, decls = file.decls.len()))]
pub fn assemble(file: &File, options: &AssembleOptions) -> Result<ProgramUnit, SynthError> {
    if options.package.trim().is_empty() {
        return Err(SynthError::EmptyProgramName);
    }
    let table = SymbolTable::build(&file.imports)?;

    let synthesized: Vec<Option<Unit>> = if options.parallel {
        file.decls
            .par_iter()
            .map(|decl| Synth::new(&table, options.limits).synthesize_declaration(decl))
            .collect::<Result<_, _>>()?
    } else {
        let mut synth = Synth::new(&table, options.limits);
        file.decls
            .iter()
            .map(|decl| synth.synthesize_declaration(decl))
            .collect::<Result<_, _>>()?
    };

    let units = dedup_names(synthesized.into_iter().flatten().collect());
    tracing::debug!(units = units.len(), "assembled program");

    Ok(ProgramUnit {
        package: options.package.clone(),
        name: file.package.name.clone(),
        anon_imports: table.anonymous().to_vec(),
        aliases: table.explicit_aliases().to_vec(),
        units,
        entry_point: options.entry_point,
    })
}

/// Rename units whose derived name is already taken to `<name>At<offset>`.
fn dedup_names(mut units: Vec<Unit>) -> Vec<Unit> {
    let mut taken: HashSet<String> = HashSet::with_capacity(units.len());
    for unit in &mut units {
        if taken.contains(&unit.name) {
            let base = format!("{}At{}", unit.name, unit.pos.offset);
            let mut name = base.clone();
            let mut n = 1;
            while taken.contains(&name) {
                n += 1;
                name = format!("{base}_{n}");
            }
            tracing::debug!(from = %unit.name, to = %name, "renamed colliding unit");
            unit.name = name;
        }
        taken.insert(unit.name.clone());
    }
    units
}
