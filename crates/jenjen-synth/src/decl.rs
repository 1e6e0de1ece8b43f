//! Declaration rules and declaration generator units.

use crate::chain::{Chain, id, list};
use crate::error::SynthError;
use crate::synth::Synth;
use jenjen_syntax::{Decl, DeclToken, FuncDecl, GenDecl, Pos, Spec};

/// One top-level declaration, rendered as a zero-argument Go function that
/// returns its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub chain: Chain,
    /// Position of the declaration, used to rename colliding units.
    pub pos: Pos,
}

/// Name of the generator unit for `decl`.
///
/// Functions are `genFunc<Name>`, methods `genFunc<Receiver><Name>`, and
/// value or type declarations `genDeclAt<offset>`.
pub fn unit_name(decl: &Decl) -> String {
    match decl {
        Decl::Gen(g) => format!("genDeclAt{}", g.pos.offset),
        Decl::Func(f) => match f.receiver_type_name() {
            Some(recv) => format!("genFunc{recv}{}", f.name.name),
            None => format!("genFunc{}", f.name.name),
        },
    }
}

impl Synth<'_> {
    /// Generator unit for a top-level declaration.
    ///
    /// Import declarations yield `None`: they only feed the symbol table.
    pub fn synthesize_declaration(&mut self, decl: &Decl) -> Result<Option<Unit>, SynthError> {
        let chain = match decl {
            Decl::Gen(g) if g.tok == DeclToken::Import => return Ok(None),
            Decl::Gen(g) => self.synthesize_gen_decl(g)?,
            Decl::Func(f) => self.synthesize_func_decl(f)?,
        };
        let unit = Unit {
            name: unit_name(decl),
            chain,
            pos: decl.pos(),
        };
        tracing::debug!(unit = %unit.name, steps = unit.chain.steps().len(), "synthesized declaration");
        Ok(Some(unit))
    }

    /// `const`, `var` or `type` declaration, at top level or inside a block.
    pub fn synthesize_gen_decl(&mut self, decl: &GenDecl) -> Result<Chain, SynthError> {
        self.nested(decl.pos, |s| {
            let keyword = match decl.tok {
                DeclToken::Const => "Const",
                DeclToken::Var => "Var",
                DeclToken::Type => "Type",
                DeclToken::Import => {
                    return Err(SynthError::unsupported("nested import declaration", decl.pos));
                }
            };
            let mut specs = decl
                .specs
                .iter()
                .map(|spec| s.spec(spec, decl.pos))
                .collect::<Result<Vec<_>, _>>()?;

            let chain = Chain::new().keyword(keyword);
            if !decl.grouped && specs.len() == 1 {
                Ok(chain.add(specs.remove(0)))
            } else {
                Ok(chain.call_code("Defs", specs))
            }
        })
    }

    fn spec(&mut self, spec: &Spec, pos: Pos) -> Result<Chain, SynthError> {
        match spec {
            Spec::Value(v) => {
                let names = list(v.names.iter().map(|n| id(n.name.as_str())).collect());
                let mut chain = match &v.ty {
                    Some(ty) => names.add(self.synthesize_type(ty)?),
                    None => names,
                };
                if !v.values.is_empty() {
                    chain = chain.op("=").add(self.synthesize_list(&v.values)?);
                }
                Ok(chain)
            }
            Spec::Type(t) => {
                let chain = id(t.name.name.as_str());
                let chain = if t.alias { chain.op("=") } else { chain };
                Ok(chain.add(self.synthesize_type(&t.ty)?))
            }
            Spec::Import(import) => Err(SynthError::unsupported(
                format!("import of {:?} outside an import declaration", import.path),
                pos,
            )),
        }
    }

    /// `Func()`, optional receiver, name, signature and body.
    pub fn synthesize_func_decl(&mut self, decl: &FuncDecl) -> Result<Chain, SynthError> {
        self.nested(decl.pos, |s| {
            let mut chain = Chain::new().keyword("Func");
            if let Some(recv) = &decl.recv {
                chain = chain.call_code("Params", s.fields(recv)?);
            }
            chain = chain.id(decl.name.name.as_str()).add(s.signature(&decl.ty)?);
            if let Some(body) = &decl.body {
                chain = chain.add(s.synthesize_block(body)?);
            }
            Ok(chain)
        })
    }
}
