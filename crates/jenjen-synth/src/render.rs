//! Go writer for program units.
//!
//! Writes the generator program: one `func <unit>() jen.Code` per
//! declaration, `genFile` to assemble them and an optional `main`.

use crate::assemble::ProgramUnit;
use crate::chain::{Arg, Chain, go_quote};
use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;

/// Import path of the builder library.
pub const JEN_PATH: &str = "github.com/dave/jennifer/jen";

/// How chains are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Each chain on one line.
    #[default]
    Compact,
    /// Group-like calls broken one argument per line.
    Pretty,
}

/// Writes a [`ProgramUnit`] as Go source.
pub struct GoWriter {
    output: String,
    indent: usize,
    layout: Layout,
}

impl GoWriter {
    pub fn new(layout: Layout) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            layout,
        }
    }

    /// Render a program unit to a string.
    pub fn emit(program: &ProgramUnit, layout: Layout) -> Result<String, RenderError> {
        let mut writer = Self::new(layout);
        writer.write_program(program)?;
        Ok(writer.output)
    }

    /// Render a program unit into `out`.
    pub fn write_to(
        program: &ProgramUnit,
        layout: Layout,
        out: &mut impl io::Write,
    ) -> Result<(), RenderError> {
        let text = Self::emit(program, layout)?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Render a single chain, rooted at `jen`.
    pub fn emit_chain(chain: &Chain, layout: Layout) -> String {
        let mut writer = Self::new(layout);
        writer.write_chain(chain);
        writer.output
    }

    fn write_program(&mut self, program: &ProgramUnit) -> Result<(), RenderError> {
        let mut seen = HashSet::with_capacity(program.units.len());
        for unit in &program.units {
            if !seen.insert(unit.name.as_str()) || unit.name == "genFile" {
                return Err(RenderError::DuplicateUnit(unit.name.clone()));
            }
        }

        self.line(&format!("package {}", program.package));
        self.output.push('\n');
        if program.entry_point {
            self.line("import (");
            self.line("\t\"fmt\"");
            self.output.push('\n');
            self.line(&format!("\tjen {}", go_quote(JEN_PATH)));
            self.line(")");
        } else {
            self.line(&format!("import jen {}", go_quote(JEN_PATH)));
        }

        for unit in &program.units {
            self.output.push('\n');
            self.line(&format!("func {}() jen.Code {{", unit.name));
            self.indent += 1;
            self.write_indent();
            self.output.push_str("return ");
            self.write_chain(&unit.chain);
            self.output.push('\n');
            self.indent -= 1;
            self.line("}");
        }

        self.output.push('\n');
        self.line("func genFile() *jen.File {");
        self.indent += 1;
        self.line(&format!("ret := jen.NewFile({})", go_quote(&program.name)));
        if !program.anon_imports.is_empty() {
            let paths: Vec<String> = program.anon_imports.iter().map(|p| go_quote(p)).collect();
            self.line(&format!("ret.Anon({})", paths.join(", ")));
        }
        for (path, alias) in &program.aliases {
            self.line(&format!("ret.ImportAlias({}, {})", go_quote(path), go_quote(alias)));
        }
        for unit in &program.units {
            self.line(&format!("ret.Add({}())", unit.name));
        }
        self.line("return ret");
        self.indent -= 1;
        self.line("}");

        if program.entry_point {
            self.output.push('\n');
            self.line("func main() {");
            self.indent += 1;
            self.line("ret := genFile()");
            self.line("fmt.Printf(\"%#v\", ret)");
            self.indent -= 1;
            self.line("}");
        }
        Ok(())
    }

    fn line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push('\t');
        }
    }

    fn write_chain(&mut self, chain: &Chain) {
        if chain.is_empty() {
            self.output.push_str("jen.Null()");
            return;
        }
        self.output.push_str("jen");
        for step in chain.steps() {
            self.output.push('.');
            self.output.push_str(step.method);
            self.output.push('(');
            if self.breaks(step.method, step.args.len()) {
                self.output.push('\n');
                self.indent += 1;
                for arg in &step.args {
                    self.write_indent();
                    self.write_arg(arg);
                    self.output.push_str(",\n");
                }
                self.indent -= 1;
                self.write_indent();
            } else {
                for (i, arg) in step.args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.write_arg(arg);
                }
            }
            self.output.push(')');
        }
    }

    fn write_arg(&mut self, arg: &Arg) {
        match arg {
            Arg::Code(chain) => self.write_chain(chain),
            Arg::Lit(lit) => self.output.push_str(&lit.to_string()),
        }
    }

    fn breaks(&self, method: &str, args: usize) -> bool {
        if self.layout == Layout::Compact || args == 0 {
            return false;
        }
        match method {
            "Block" | "Defs" | "Struct" | "Interface" | "Values" => true,
            "Params" => args >= 2,
            _ => false,
        }
    }
}
