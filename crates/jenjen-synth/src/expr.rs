//! Expression rules.

use crate::chain::{Arg, Chain, empty, id, list, op};
use crate::error::SynthError;
use crate::synth::Synth;
use jenjen_syntax::{BasicLit, Expr, ExprKind, LitKind, Pos};

impl Synth<'_> {
    /// Chain that rebuilds `expr`.
    pub fn synthesize_expression(&mut self, expr: &Expr) -> Result<Chain, SynthError> {
        self.nested(expr.pos, |s| s.expression(expr))
    }

    /// Synthesize each expression, in order.
    pub fn synthesize_expressions(&mut self, exprs: &[Expr]) -> Result<Vec<Chain>, SynthError> {
        exprs.iter().map(|e| self.synthesize_expression(e)).collect()
    }

    /// Expressions collapsed by the 0/1/N list rule.
    pub fn synthesize_list(&mut self, exprs: &[Expr]) -> Result<Chain, SynthError> {
        Ok(list(self.synthesize_expressions(exprs)?))
    }

    fn expression(&mut self, expr: &Expr) -> Result<Chain, SynthError> {
        match &expr.kind {
            ExprKind::Bad { kind } => Err(SynthError::unsupported(kind.as_str(), expr.pos)),
            ExprKind::Ident(name) => Ok(id(name)),
            ExprKind::BasicLit(lit) => basic_lit(lit, expr.pos),

            ExprKind::Ellipsis(elt) => {
                let chain = op("...");
                match elt {
                    Some(elt) => Ok(chain.add(self.synthesize_type(elt)?)),
                    None => Ok(chain),
                }
            }

            ExprKind::FuncLit { ty, body } => Ok(Chain::new()
                .keyword("Func")
                .add(self.signature(ty)?)
                .add(self.synthesize_block(body)?)),

            ExprKind::CompositeLit { ty, elts } => {
                let prefix = match ty {
                    Some(ty) => self.synthesize_type(ty)?,
                    None => Chain::new(),
                };
                Ok(prefix.call_code("Values", self.synthesize_expressions(elts)?))
            }

            ExprKind::Paren(x) => {
                Ok(Chain::new().call_code("Parens", vec![self.synthesize_expression(x)?]))
            }

            ExprKind::Selector { x, sel } => {
                if let ExprKind::Ident(base) = &x.kind
                    && let Some(path) = self.table.resolve(base)
                {
                    return Ok(Chain::jen(
                        "Qual",
                        [Arg::quoted(path), Arg::quoted(sel.name.as_str())],
                    ));
                }
                Ok(self
                    .synthesize_expression(x)?
                    .call("Dot", [Arg::quoted(sel.name.as_str())]))
            }

            ExprKind::Index { x, index } => {
                let index = self.synthesize_expression(index)?;
                Ok(self.synthesize_expression(x)?.call_code("Index", vec![index]))
            }

            ExprKind::Slice {
                x,
                low,
                high,
                max,
                slice3,
            } => {
                let mut slots = vec![self.slot(low.as_deref())?, self.slot(high.as_deref())?];
                if *slice3 {
                    slots.push(self.slot(max.as_deref())?);
                }
                Ok(self.synthesize_expression(x)?.call_code("Index", slots))
            }

            ExprKind::TypeAssert { x, ty } => {
                let asserted = match ty {
                    Some(ty) => self.synthesize_type(ty)?,
                    None => Chain::new().keyword("Type"),
                };
                Ok(self.synthesize_expression(x)?.call_code("Assert", vec![asserted]))
            }

            ExprKind::Call {
                fun,
                args,
                ellipsis,
            } => {
                let mut args = self.synthesize_expressions(args)?;
                if *ellipsis && let Some(last) = args.pop() {
                    args.push(last.op("..."));
                }
                Ok(self.synthesize_expression(fun)?.call_code("Call", args))
            }

            ExprKind::Star(x) => Ok(op("*").add(self.synthesize_expression(x)?)),
            ExprKind::Unary { op: tok, x } => Ok(op(tok).add(self.synthesize_expression(x)?)),

            ExprKind::Binary { x, op: tok, y } => {
                let lhs = self.synthesize_expression(x)?;
                Ok(lhs.op(tok).add(self.synthesize_expression(y)?))
            }

            ExprKind::KeyValue { key, value } => {
                let key = self.synthesize_expression(key)?;
                Ok(key.op(":").add(self.synthesize_expression(value)?))
            }

            ExprKind::ArrayType { len, elt } => self.array_type(len.as_deref(), elt),
            ExprKind::StructType(fields) => self.struct_type(fields),
            ExprKind::FuncType(ty) => Ok(Chain::new().keyword("Func").add(self.signature(ty)?)),
            ExprKind::InterfaceType(methods) => self.interface_type(methods),
            ExprKind::MapType { key, value } => self.map_type(key, value),
            ExprKind::ChanType { dir, value } => self.chan_type(*dir, value),
        }
    }

    /// A slice index, or an explicit empty slot.
    fn slot(&mut self, expr: Option<&Expr>) -> Result<Chain, SynthError> {
        match expr {
            Some(e) => self.synthesize_expression(e),
            None => Ok(empty()),
        }
    }
}

fn basic_lit(lit: &BasicLit, pos: Pos) -> Result<Chain, SynthError> {
    let text = lit.value.as_str();
    match lit.kind {
        LitKind::Int => match decimal(text) {
            Some(n) => Ok(Chain::jen("Lit", [Arg::int(n)])),
            None => Ok(id(text)),
        },
        LitKind::Imag => Err(SynthError::unsupported("imaginary literal", pos)),
        // `Id` prints the token as written; `Lit` would reformat the value.
        LitKind::Float | LitKind::Char | LitKind::String => Ok(id(text)),
    }
}

/// Plain decimal integer tokens that fit an `i64`.
///
/// A leading `0` means octal (`0755`), so only `0` itself qualifies. Hex,
/// binary, underscores and out-of-range values are `None` too.
fn decimal(text: &str) -> Option<i64> {
    if text != "0" && text.starts_with('0') {
        return None;
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;
    use crate::synth::Limits;
    use jenjen_syntax::{ImportName, ImportSpec};

    fn synth(expr: &Expr) -> String {
        let table = SymbolTable::build(&[
            ImportSpec {
                name: None,
                path: "fmt".into(),
                pos: Pos::default(),
            },
            ImportSpec {
                name: Some(ImportName::Alias("j".into())),
                path: "github.com/dave/jennifer/jen".into(),
                pos: Pos::default(),
            },
        ])
        .unwrap();
        Synth::new(&table, Limits::default())
            .synthesize_expression(expr)
            .unwrap()
            .to_string()
    }

    fn boxed(e: Expr) -> Box<Expr> {
        Box::new(e)
    }

    #[test]
    fn test_ident() {
        assert_eq!(synth(&Expr::ident("x")), r#"jen.Id("x")"#);
    }

    #[test]
    fn test_int_literal_normalized() {
        assert_eq!(synth(&Expr::int(42)), "jen.Lit(42)");
        assert_eq!(
            synth(&Expr::lit(LitKind::Int, "0xff")),
            r#"jen.Id("0xff")"#
        );
        assert_eq!(
            synth(&Expr::lit(LitKind::Int, "18446744073709551615")),
            r#"jen.Id("18446744073709551615")"#
        );
    }

    #[test]
    fn test_legacy_octal_keeps_its_spelling() {
        assert_eq!(synth(&Expr::lit(LitKind::Int, "0755")), r#"jen.Id("0755")"#);
        assert_eq!(synth(&Expr::lit(LitKind::Int, "0")), "jen.Lit(0)");
        assert_eq!(synth(&Expr::lit(LitKind::Int, "0o644")), r#"jen.Id("0o644")"#);
        assert_eq!(synth(&Expr::lit(LitKind::Int, "1_000")), r#"jen.Id("1_000")"#);
    }

    #[test]
    fn test_floats_keep_their_spelling() {
        assert_eq!(synth(&Expr::lit(LitKind::Float, "1.50")), r#"jen.Id("1.50")"#);
        assert_eq!(synth(&Expr::lit(LitKind::Float, "1e3")), r#"jen.Id("1e3")"#);
        assert_eq!(synth(&Expr::lit(LitKind::Float, ".5")), r#"jen.Id(".5")"#);
    }

    #[test]
    fn test_strings_keep_their_escapes() {
        assert_eq!(
            synth(&Expr::lit(LitKind::String, r#""a\tb""#)),
            r#"jen.Id("\"a\\tb\"")"#
        );
        assert_eq!(
            synth(&Expr::lit(LitKind::String, r#""\x41\u00e9""#)),
            r#"jen.Id("\"\\x41\\u00e9\"")"#
        );
    }

    #[test]
    fn test_rune_and_raw_string_through_id() {
        assert_eq!(synth(&Expr::lit(LitKind::Char, "'\\n'")), r#"jen.Id("'\\n'")"#);
        assert_eq!(
            synth(&Expr::lit(LitKind::String, "`a\"b`")),
            r#"jen.Id("`a\"b`")"#
        );
    }

    #[test]
    fn test_imaginary_rejected() {
        let table = SymbolTable::default();
        let err = Synth::new(&table, Limits::default())
            .synthesize_expression(&Expr::lit(LitKind::Imag, "2i"))
            .unwrap_err();
        assert!(matches!(err, SynthError::Unsupported { kind, .. } if kind == "imaginary literal"));
    }

    #[test]
    fn test_qualified_selector() {
        let call = Expr::call(
            Expr::selector(Expr::ident("fmt"), "Println"),
            vec![Expr::string("hi")],
        );
        assert_eq!(synth(&call), r#"jen.Qual("fmt", "Println").Call(jen.Id("\"hi\""))"#);
        assert_eq!(
            synth(&Expr::selector(Expr::ident("j"), "Id")),
            r#"jen.Qual("github.com/dave/jennifer/jen", "Id")"#
        );
    }

    #[test]
    fn test_member_access() {
        let sel = Expr::selector(Expr::selector(Expr::ident("s"), "conf"), "Name");
        assert_eq!(synth(&sel), r#"jen.Id("s").Dot("conf").Dot("Name")"#);
    }

    #[test]
    fn test_variadic_call() {
        let mut call = Expr::call(Expr::ident("f"), vec![Expr::ident("a"), Expr::ident("b")]);
        if let ExprKind::Call { ellipsis, .. } = &mut call.kind {
            *ellipsis = true;
        }
        assert_eq!(
            synth(&call),
            r#"jen.Id("f").Call(jen.Id("a"), jen.Id("b").Op("..."))"#
        );
    }

    #[test]
    fn test_three_index_slice() {
        let slice = Expr::new(
            ExprKind::Slice {
                x: boxed(Expr::ident("a")),
                low: None,
                high: Some(boxed(Expr::int(2))),
                max: Some(boxed(Expr::int(3))),
                slice3: true,
            },
            Pos::default(),
        );
        assert_eq!(
            synth(&slice),
            r#"jen.Id("a").Index(jen.Empty(), jen.Lit(2), jen.Lit(3))"#
        );
    }

    #[test]
    fn test_two_index_slice() {
        let slice = Expr::new(
            ExprKind::Slice {
                x: boxed(Expr::ident("a")),
                low: Some(boxed(Expr::int(1))),
                high: None,
                max: None,
                slice3: false,
            },
            Pos::default(),
        );
        assert_eq!(synth(&slice), r#"jen.Id("a").Index(jen.Lit(1), jen.Empty())"#);
    }

    #[test]
    fn test_type_switch_assert() {
        let assert = Expr::new(
            ExprKind::TypeAssert {
                x: boxed(Expr::ident("v")),
                ty: None,
            },
            Pos::default(),
        );
        assert_eq!(synth(&assert), r#"jen.Id("v").Assert(jen.Type())"#);
    }

    #[test]
    fn test_binary_carries_operator_token() {
        let expr = Expr::binary(Expr::ident("a"), "&^", Expr::ident("b"));
        assert_eq!(synth(&expr), r#"jen.Id("a").Op("&^").Id("b")"#);
    }

    #[test]
    fn test_unary_and_paren() {
        let expr = Expr::unary(
            "!",
            Expr::new(ExprKind::Paren(boxed(Expr::ident("ok"))), Pos::default()),
        );
        assert_eq!(synth(&expr), r#"jen.Op("!").Parens(jen.Id("ok"))"#);
    }

    #[test]
    fn test_composite_literal() {
        let lit = Expr::new(
            ExprKind::CompositeLit {
                ty: Some(boxed(Expr::ident("Point"))),
                elts: vec![Expr::new(
                    ExprKind::KeyValue {
                        key: boxed(Expr::ident("X")),
                        value: boxed(Expr::int(1)),
                    },
                    Pos::default(),
                )],
            },
            Pos::default(),
        );
        assert_eq!(
            synth(&lit),
            r#"jen.Id("Point").Values(jen.Id("X").Op(":").Lit(1))"#
        );
    }

    #[test]
    fn test_bad_expression_rejected() {
        let table = SymbolTable::default();
        let bad = Expr::new(
            ExprKind::Bad {
                kind: "ERROR".into(),
            },
            Pos::new(5, 2, 3),
        );
        let err = Synth::new(&table, Limits::default())
            .synthesize_expression(&bad)
            .unwrap_err();
        assert_eq!(err.to_string(), "2:3: unsupported ERROR");
    }

    #[test]
    fn test_depth_limit() {
        let mut expr = Expr::ident("x");
        for _ in 0..10 {
            expr = Expr::new(ExprKind::Paren(boxed(expr)), Pos::default());
        }
        let table = SymbolTable::default();
        let err = Synth::new(&table, Limits { max_depth: 5 })
            .synthesize_expression(&expr)
            .unwrap_err();
        assert!(matches!(err, SynthError::TooDeep { limit: 5, .. }));
    }
}
