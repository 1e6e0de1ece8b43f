//! Type rules: arrays, structs, signatures, interfaces, maps and channels.
//!
//! Types are expressions in the syntax tree, so these rules are reached from
//! [`Synth::synthesize_expression`] as well as from declarations.

use crate::chain::{Chain, id, list, op};
use crate::error::SynthError;
use crate::synth::Synth;
use jenjen_syntax::{ChanDir, Expr, ExprKind, Field, FieldList, FuncType};

impl Synth<'_> {
    /// Chain that rebuilds the type `ty`.
    pub fn synthesize_type(&mut self, ty: &Expr) -> Result<Chain, SynthError> {
        self.synthesize_expression(ty)
    }

    /// `[N]T`, `[...]T` or `[]T`.
    pub(crate) fn array_type(
        &mut self,
        len: Option<&Expr>,
        elt: &Expr,
    ) -> Result<Chain, SynthError> {
        let index = match len {
            None => Chain::new().keyword("Index"),
            Some(Expr {
                kind: ExprKind::Ellipsis(None),
                ..
            }) => Chain::new().call_code("Index", vec![op("...")]),
            Some(len) => Chain::new().call_code("Index", vec![self.synthesize_expression(len)?]),
        };
        Ok(index.add(self.synthesize_type(elt)?))
    }

    pub(crate) fn struct_type(&mut self, fields: &FieldList) -> Result<Chain, SynthError> {
        Ok(Chain::new().call_code("Struct", self.fields(fields)?))
    }

    pub(crate) fn interface_type(&mut self, methods: &FieldList) -> Result<Chain, SynthError> {
        let mut elems = Vec::with_capacity(methods.fields.len());
        for field in &methods.fields {
            let elem = match (&field.names[..], &field.ty.kind) {
                ([name], ExprKind::FuncType(sig)) => {
                    id(name.name.as_str()).add(self.signature(sig)?)
                }
                ([], _) => self.synthesize_type(&field.ty)?,
                _ => {
                    return Err(SynthError::unsupported("interface element", field.ty.pos));
                }
            };
            elems.push(elem);
        }
        Ok(Chain::new().call_code("Interface", elems))
    }

    pub(crate) fn map_type(&mut self, key: &Expr, value: &Expr) -> Result<Chain, SynthError> {
        let key = self.synthesize_type(key)?;
        Ok(Chain::new().call_code("Map", vec![key]).add(self.synthesize_type(value)?))
    }

    pub(crate) fn chan_type(&mut self, dir: ChanDir, value: &Expr) -> Result<Chain, SynthError> {
        let prefix = match dir {
            ChanDir::Both => Chain::new().keyword("Chan"),
            ChanDir::Send => Chain::new().keyword("Chan").op("<-"),
            ChanDir::Recv => op("<-").keyword("Chan"),
        };
        Ok(prefix.add(self.synthesize_type(value)?))
    }

    /// Parameters and results, without the `func` keyword.
    ///
    /// A single unnamed result is appended bare; any other result list is
    /// wrapped in a second `Params`.
    pub fn signature(&mut self, ty: &FuncType) -> Result<Chain, SynthError> {
        let chain = Chain::new().call_code("Params", self.fields(&ty.params)?);
        match &ty.results {
            None => Ok(chain),
            Some(results) => match &results.fields[..] {
                [single] if single.names.is_empty() => {
                    Ok(chain.add(self.synthesize_type(&single.ty)?))
                }
                _ => Ok(chain.call_code("Params", self.fields(results)?)),
            },
        }
    }

    /// One chain per field: names (0/1/N), type, then tag.
    pub(crate) fn fields(&mut self, field_list: &FieldList) -> Result<Vec<Chain>, SynthError> {
        field_list.fields.iter().map(|f| self.field(f)).collect()
    }

    fn field(&mut self, field: &Field) -> Result<Chain, SynthError> {
        let names = list(field.names.iter().map(|n| id(n.name.as_str())).collect());
        let chain = names.add(self.synthesize_type(&field.ty)?);
        Ok(match &field.tag {
            Some(tag) => chain.id(tag.value.as_str()),
            None => chain,
        })
    }
}
