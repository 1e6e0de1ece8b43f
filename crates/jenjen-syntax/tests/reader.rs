//! Reader tests over whole Go files.
//!
//! Trees are compared with `StructureEq` so the expected values can be built
//! without positions; a few small outputs are pinned as inline snapshots.

use jenjen_syntax::{
    Block, Decl, DeclToken, Expr, ExprKind, File, GenDecl, Ident, Pos, ReadError, Reader, Spec,
    Stmt, StmtKind, StructureEq, ValueSpec, GO_READER, read_go,
};

fn parse(code: &str) -> File {
    read_go(code).expect("parse failed")
}

fn only_func_body(file: &File) -> &Block {
    match file.decls.last() {
        Some(Decl::Func(f)) => f.body.as_ref().expect("func without body"),
        other => panic!("expected func, got {other:?}"),
    }
}

#[test]
fn reader_metadata() {
    assert_eq!(GO_READER.language(), "go");
    assert_eq!(GO_READER.extensions(), &["go"]);
    assert_eq!(GO_READER.read("package p\n").unwrap().package.name, "p");
}

#[test]
fn aliased_import_snapshot() {
    let file = parse("package main\n\nimport f \"fmt\"\n");
    insta::assert_json_snapshot!(file.imports, @r###"
    [
      {
        "name": {
          "Alias": "f"
        },
        "path": "fmt",
        "pos": {
          "offset": 21,
          "line": 3,
          "column": 8
        }
      }
    ]
    "###);
}

#[test]
fn value_decl_structure() {
    let file = parse("package p\n\nvar a, b int = 1, x + 2\n");
    let expected = Decl::Gen(GenDecl {
        tok: DeclToken::Var,
        pos: Pos::default(),
        grouped: false,
        specs: vec![Spec::Value(ValueSpec {
            names: vec![Ident::new("a", Pos::default()), Ident::new("b", Pos::default())],
            ty: Some(Expr::ident("int")),
            values: vec![Expr::int(1), Expr::binary(Expr::ident("x"), "+", Expr::int(2))],
        })],
    });
    assert!(file.decls[0].structure_eq(&expected), "{:#?}", file.decls[0]);
}

#[test]
fn grouped_const_decl() {
    let file = parse("package p\n\nconst (\n\tA = iota\n\tB\n)\n");
    let Decl::Gen(g) = &file.decls[0] else {
        panic!("expected const decl");
    };
    assert_eq!(g.tok, DeclToken::Const);
    assert!(g.grouped);
    assert_eq!(g.specs.len(), 2);
    let Spec::Value(b) = &g.specs[1] else {
        panic!("expected value spec");
    };
    assert!(b.values.is_empty());
}

fn value_names(decl: &Decl) -> Vec<Vec<String>> {
    let Decl::Gen(g) = decl else {
        panic!("expected value decl, got {decl:?}");
    };
    g.specs
        .iter()
        .map(|spec| match spec {
            Spec::Value(v) => v.names.iter().map(|n| n.name.clone()).collect(),
            other => panic!("expected value spec, got {other:?}"),
        })
        .collect()
}

#[test]
fn multi_name_const_has_no_separators() {
    let file = parse("package p\n\nconst a, b = 1, 2\n");
    assert_eq!(value_names(&file.decls[0]), vec![vec!["a", "b"]]);
}

#[test]
fn grouped_multi_name_const_has_no_separators() {
    let file = parse("package p\n\nconst (\n\tA, B = iota, iota\n\tC, D, E int = 1, 2, 3\n)\n");
    assert_eq!(
        value_names(&file.decls[0]),
        vec![vec!["A", "B"], vec!["C", "D", "E"]]
    );
}

#[test]
fn multi_name_params_and_fields() {
    let file = parse("package p\n\ntype T struct {\n\tx, y int\n}\n\nfunc f(a, b int) {}\n");
    let Decl::Gen(t) = &file.decls[0] else {
        panic!("expected type decl");
    };
    let Spec::Type(spec) = &t.specs[0] else {
        panic!("expected type spec");
    };
    let ExprKind::StructType(fields) = &spec.ty.kind else {
        panic!("expected struct");
    };
    let names: Vec<_> = fields.fields[0].names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["x", "y"]);

    let Decl::Func(f) = &file.decls[1] else {
        panic!("expected func");
    };
    let names: Vec<_> = f.ty.params.fields[0].names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn type_alias_and_definition() {
    let file = parse("package p\n\ntype A = B\n\ntype C map[string][]int\n");
    let specs: Vec<_> = file
        .decls
        .iter()
        .map(|d| match d {
            Decl::Gen(g) => g.specs[0].clone(),
            other => panic!("expected type decl, got {other:?}"),
        })
        .collect();
    assert!(matches!(&specs[0], Spec::Type(t) if t.alias));
    let Spec::Type(c) = &specs[1] else {
        panic!("expected type spec");
    };
    assert!(!c.alias);
    assert!(matches!(c.ty.kind, ExprKind::MapType { .. }));
}

#[test]
fn call_with_qualified_callee() {
    let file = parse("package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\", 1)\n}\n");
    let body = only_func_body(&file);
    let expected = Stmt::expr(Expr::call(
        Expr::selector(Expr::ident("fmt"), "Println"),
        vec![Expr::string("hi"), Expr::int(1)],
    ));
    assert!(body.stmts[0].structure_eq(&expected), "{:#?}", body.stmts[0]);
}

#[test]
fn switch_with_fallthrough_and_default() {
    let file = parse(
        "package p\n\nfunc f(x int) {\n\tswitch y := x; y {\n\tcase 1, 2:\n\t\tfallthrough\n\tdefault:\n\t}\n}\n",
    );
    let body = only_func_body(&file);
    let StmtKind::Switch { init, tag, body } = &body.stmts[0].kind else {
        panic!("expected switch");
    };
    assert!(init.is_some());
    assert!(tag.is_some());
    assert_eq!(body.stmts.len(), 2);
    let StmtKind::CaseClause { list, body: case_body } = &body.stmts[0].kind else {
        panic!("expected case clause");
    };
    assert_eq!(list.len(), 2);
    assert_eq!(case_body.len(), 1);
    assert!(matches!(&body.stmts[1].kind, StmtKind::CaseClause { list, .. } if list.is_empty()));
}

#[test]
fn type_switch_with_binding() {
    let file = parse(
        "package p\n\nfunc f(x any) {\n\tswitch v := x.(type) {\n\tcase int, string:\n\t\t_ = v\n\t}\n}\n",
    );
    let body = only_func_body(&file);
    let StmtKind::TypeSwitch { assign, body, .. } = &body.stmts[0].kind else {
        panic!("expected type switch");
    };
    let StmtKind::Assign { tok, rhs, .. } = &assign.kind else {
        panic!("expected binding");
    };
    assert_eq!(tok, ":=");
    assert!(matches!(rhs[0].kind, ExprKind::TypeAssert { ty: None, .. }));
    let StmtKind::CaseClause { list, .. } = &body.stmts[0].kind else {
        panic!("expected case clause");
    };
    let expected = [Expr::ident("int"), Expr::ident("string")];
    assert_eq!(list.len(), expected.len());
    assert!(list.iter().zip(&expected).all(|(a, b)| a.structure_eq(b)));
}

#[test]
fn select_clauses() {
    let file = parse(
        "package p\n\nfunc f(c chan int, d chan<- int) {\n\tselect {\n\tcase v := <-c:\n\t\t_ = v\n\tcase d <- 1:\n\tdefault:\n\t}\n}\n",
    );
    let body = only_func_body(&file);
    let StmtKind::Select { body } = &body.stmts[0].kind else {
        panic!("expected select");
    };
    let comms: Vec<_> = body
        .stmts
        .iter()
        .map(|s| match &s.kind {
            StmtKind::CommClause { comm, .. } => comm.as_ref().map(|c| c.kind_name().to_string()),
            other => panic!("expected comm clause, got {other:?}"),
        })
        .collect();
    assert_eq!(
        comms,
        vec![
            Some("assignment".to_string()),
            Some("send statement".to_string()),
            None
        ]
    );
}

#[test]
fn labeled_loop_with_branches() {
    let file = parse(
        "package p\n\nfunc f() {\nouter:\n\tfor {\n\t\tcontinue outer\n\t}\n\tgoto outer\n}\n",
    );
    let body = only_func_body(&file);
    let StmtKind::Labeled { label, stmt } = &body.stmts[0].kind else {
        panic!("expected labeled statement");
    };
    assert_eq!(label.name, "outer");
    assert!(matches!(stmt.kind, StmtKind::For { cond: None, .. }));
    assert!(matches!(
        &body.stmts[1].kind,
        StmtKind::Branch { label: Some(l), .. } if l.name == "outer"
    ));
}

#[test]
fn composite_literal_with_elided_types() {
    let file = parse("package p\n\nvar v = []T{{1, 2}, {X: 3}}\n");
    let Decl::Gen(g) = &file.decls[0] else {
        panic!("expected var decl");
    };
    let Spec::Value(spec) = &g.specs[0] else {
        panic!("expected value spec");
    };
    let ExprKind::CompositeLit { ty: Some(_), elts } = &spec.values[0].kind else {
        panic!("expected composite literal");
    };
    assert!(matches!(&elts[0].kind, ExprKind::CompositeLit { ty: None, elts } if elts.len() == 2));
    let ExprKind::CompositeLit { ty: None, elts: inner } = &elts[1].kind else {
        panic!("expected nested literal");
    };
    assert!(matches!(inner[0].kind, ExprKind::KeyValue { .. }));
}

#[test]
fn channel_directions() {
    let file = parse("package p\n\nvar a chan int\nvar b chan<- int\nvar c <-chan int\n");
    let dirs: Vec<_> = file
        .decls
        .iter()
        .map(|d| match d {
            Decl::Gen(GenDecl { specs, .. }) => match &specs[0] {
                Spec::Value(ValueSpec {
                    ty: Some(Expr {
                        kind: ExprKind::ChanType { dir, .. },
                        ..
                    }),
                    ..
                }) => *dir,
                other => panic!("expected chan var, got {other:?}"),
            },
            other => panic!("expected var decl, got {other:?}"),
        })
        .collect();
    use jenjen_syntax::ChanDir::*;
    assert_eq!(dirs, vec![Both, Send, Recv]);
}

#[test]
fn missing_package_clause_is_parse_error() {
    assert!(matches!(read_go("func f() {}\n"), Err(ReadError::Parse(_))));
}

#[test]
fn else_branch_is_a_statement() {
    let file = parse("package p\n\nfunc f(a bool) {\n\tif a {\n\t\treturn\n\t} else {\n\t}\n}\n");
    let body = only_func_body(&file);
    let StmtKind::If { els: Some(els), .. } = &body.stmts[0].kind else {
        panic!("expected if/else");
    };
    assert!(els.structure_eq(&Stmt::block(vec![])));
}
