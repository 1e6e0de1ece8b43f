//! End-to-end synthesis tests: Go source in, generator program out.

use jenjen_synth::{
    AssembleOptions, GoWriter, Layout, Limits, ProgramUnit, SymbolTable, Synth, SynthError,
    assemble,
};
use jenjen_syntax::read_go;

const DEMO: &str = "package demo

import (
\t\"fmt\"
\t_ \"embed\"
)

var i, x = 1, 2

func main() {
\tfor ; i < 10; i++ {
\t\tfmt.Println(x)
\t}
}
";

fn program(source: &str, options: &AssembleOptions) -> ProgramUnit {
    let file = read_go(source).expect("parse failed");
    assemble(&file, options).expect("synthesis failed")
}

fn unit_chain(program: &ProgramUnit, name: &str) -> String {
    program
        .units
        .iter()
        .find(|u| u.name == name)
        .unwrap_or_else(|| panic!("no unit {name}"))
        .chain
        .to_string()
}

#[test]
fn empty_main() {
    let p = program("package main\n\nfunc main() {\n}\n", &AssembleOptions::new("main"));
    assert_eq!(p.units.len(), 1);
    assert_eq!(
        unit_chain(&p, "genFuncmain"),
        r#"jen.Func().Id("main").Params().Block()"#
    );
}

#[test]
fn aliased_import_renders_qualified_call() {
    let p = program(
        "package main\n\nimport f \"fmt\"\n\nfunc main() {\n\tf.Println(\"hi\")\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncmain"),
        r#"jen.Func().Id("main").Params().Block(jen.Qual("fmt", "Println").Call(jen.Id("\"hi\"")))"#
    );
    assert_eq!(p.aliases, vec![("fmt".to_string(), "f".to_string())]);
}

#[test]
fn selector_on_local_value_is_member_access() {
    let p = program(
        "package main\n\nimport \"strings\"\n\nfunc f(s S) {\n\ts.strings.Trim()\n\tstrings.TrimSpace(\"\")\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params(jen.Id("s").Id("S")).Block(jen.Id("s").Dot("strings").Dot("Trim").Call(), jen.Qual("strings", "TrimSpace").Call(jen.Id("\"\"")))"#
    );
}

#[test]
fn multi_value_short_declaration() {
    let p = program(
        "package main\n\nfunc main() {\n\ti, x := 1, 2\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncmain"),
        r#"jen.Func().Id("main").Params().Block(jen.List(jen.Id("i"), jen.Id("x")).Op(":=").List(jen.Lit(1), jen.Lit(2)))"#
    );
}

#[test]
fn three_index_slice() {
    let p = program(
        "package main\n\nfunc f(a []int) []int {\n\treturn a[1:2:3]\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params(jen.Id("a").Index().Id("int")).Index().Id("int").Block(jen.Return().Id("a").Index(jen.Lit(1), jen.Lit(2), jen.Lit(3)))"#
    );
}

#[test]
fn compact_program_snapshot() {
    let p = program(DEMO, &AssembleOptions::new("main"));
    let text = GoWriter::emit(&p, Layout::Compact).unwrap();
    insta::assert_snapshot!(text, @r###"
    package main

    import jen "github.com/dave/jennifer/jen"

    func genDeclAt44() jen.Code {
    	return jen.Var().List(jen.Id("i"), jen.Id("x")).Op("=").List(jen.Lit(1), jen.Lit(2))
    }

    func genFuncmain() jen.Code {
    	return jen.Func().Id("main").Params().Block(jen.For(jen.Empty(), jen.Id("i").Op("<").Lit(10), jen.Id("i").Op("++")).Block(jen.Qual("fmt", "Println").Call(jen.Id("x"))))
    }

    func genFile() *jen.File {
    	ret := jen.NewFile("demo")
    	ret.Anon("embed")
    	ret.Add(genDeclAt44())
    	ret.Add(genFuncmain())
    	return ret
    }
    "###);
}

#[test]
fn pretty_layout_breaks_nested_blocks() {
    let p = program(DEMO, &AssembleOptions::new("main"));
    let main = p.units.iter().find(|u| u.name == "genFuncmain").unwrap();
    assert_eq!(
        GoWriter::emit_chain(&main.chain, Layout::Pretty),
        "jen.Func().Id(\"main\").Params().Block(\n\
         \tjen.For(jen.Empty(), jen.Id(\"i\").Op(\"<\").Lit(10), jen.Id(\"i\").Op(\"++\")).Block(\n\
         \t\tjen.Qual(\"fmt\", \"Println\").Call(jen.Id(\"x\")),\n\
         \t),\n\
         )"
    );
}

#[test]
fn entry_point_program_imports_fmt() {
    let p = program(DEMO, &AssembleOptions::new("main").with_entry_point(true));
    let text = GoWriter::emit(&p, Layout::Compact).unwrap();
    assert!(text.contains("\t\"fmt\"\n"));
    assert!(text.ends_with("func main() {\n\tret := genFile()\n\tfmt.Printf(\"%#v\", ret)\n}\n"));
}

#[test]
fn declarations_synthesize_in_isolation() {
    let file = read_go(DEMO).unwrap();
    let whole = assemble(&file, &AssembleOptions::new("main")).unwrap();
    let table = SymbolTable::build(&file.imports).unwrap();

    let isolated: Vec<_> = file
        .decls
        .iter()
        .filter_map(|decl| {
            Synth::new(&table, Limits::default())
                .synthesize_declaration(decl)
                .unwrap()
        })
        .collect();
    assert_eq!(isolated, whole.units);
}

#[test]
fn parallel_matches_sequential() {
    let mut source = String::from("package p\n\n");
    for n in 0..64 {
        source.push_str(&format!("func f{n}(x int) int {{\n\treturn x * {n}\n}}\n\n"));
    }
    let sequential = program(&source, &AssembleOptions::new("main"));
    let parallel = program(&source, &AssembleOptions::new("main").with_parallel(true));
    assert_eq!(sequential, parallel);
    assert_eq!(parallel.units[63].name, "genFuncf63");
}

#[test]
fn repeated_init_functions_get_unique_names() {
    let p = program(
        "package p\n\nfunc init() {\n}\n\nfunc init() {\n}\n",
        &AssembleOptions::new("main"),
    );
    let names: Vec<_> = p.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["genFuncinit", "genFuncinitAt28"]);
}

#[test]
fn methods_are_named_after_receiver() {
    let p = program(
        "package p\n\ntype T struct{}\n\nfunc (t T) String() string {\n\treturn \"T\"\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncTString"),
        r#"jen.Func().Params(jen.Id("t").Id("T")).Id("String").Params().Id("string").Block(jen.Return().Id("\"T\""))"#
    );
}

#[test]
fn dot_import_is_fatal() {
    let file = read_go("package p\n\nimport . \"fmt\"\n").unwrap();
    let err = assemble(&file, &AssembleOptions::new("main")).unwrap_err();
    assert!(matches!(err, SynthError::DotImport { .. }));
    assert_eq!(err.to_string(), "3:8: dot import of \"fmt\" is not supported");
}

#[test]
fn imaginary_literal_is_fatal() {
    let file = read_go("package p\n\nvar c = 2i\n").unwrap();
    let err = assemble(&file, &AssembleOptions::new("main")).unwrap_err();
    assert!(matches!(err, SynthError::Unsupported { pos, .. } if pos.line == 3));
}

#[test]
fn else_if_chains_recurse() {
    let p = program(
        "package p\n\nfunc f(a, b bool) {\n\tif a {\n\t} else if b {\n\t} else {\n\t}\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params(jen.List(jen.Id("a"), jen.Id("b")).Id("bool")).Block(jen.If(jen.Id("a")).Block().Else().If(jen.Id("b")).Block().Else().Block())"#
    );
}

#[test]
fn grouped_type_declaration_uses_defs() {
    let p = program(
        "package p\n\ntype (\n\tA int\n\tB = A\n)\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genDeclAt11"),
        r#"jen.Type().Defs(jen.Id("A").Id("int"), jen.Id("B").Op("=").Id("A"))"#
    );
}

#[test]
fn nested_declaration_in_function_body() {
    let p = program(
        "package p\n\nfunc f() {\n\tconst n = 3\n\tvar buf [n]byte\n\t_ = buf\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params().Block(jen.Const().Id("n").Op("=").Lit(3), jen.Var().Id("buf").Index(jen.Id("n")).Id("byte"), jen.Id("_").Op("=").Id("buf"))"#
    );
}

#[test]
fn closures_and_defer() {
    let p = program(
        "package p\n\nfunc f() {\n\tdefer func() {\n\t\trecover()\n\t}()\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params().Block(jen.Defer().Func().Params().Block(jen.Id("recover").Call()).Call())"#
    );
}

#[test]
fn depth_limit_is_reported() {
    let mut expr = String::from("x");
    for _ in 0..20 {
        expr = format!("({expr})");
    }
    let file = read_go(&format!("package p\n\nvar v = {expr}\n")).unwrap();
    let options = AssembleOptions::new("main").with_limits(Limits { max_depth: 8 });
    let err = assemble(&file, &options).unwrap_err();
    assert!(matches!(err, SynthError::TooDeep { limit: 8, .. }));
}

#[test]
fn multi_name_const_lists_names_only() {
    let p = program("package p\n\nconst a, b = 1, 2\n", &AssembleOptions::new("main"));
    assert_eq!(
        unit_chain(&p, "genDeclAt11"),
        r#"jen.Const().List(jen.Id("a"), jen.Id("b")).Op("=").List(jen.Lit(1), jen.Lit(2))"#
    );
}

#[test]
fn grouped_multi_name_const() {
    let p = program(
        "package p\n\nconst (\n\tA, B = iota, iota\n)\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genDeclAt11"),
        r#"jen.Const().Defs(jen.List(jen.Id("A"), jen.Id("B")).Op("=").List(jen.Id("iota"), jen.Id("iota")))"#
    );
}

#[test]
fn type_switch_case_with_several_types() {
    let p = program(
        "package p\n\nfunc f(x any) {\n\tswitch x.(type) {\n\tcase int, string:\n\t}\n}\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genFuncf"),
        r#"jen.Func().Id("f").Params(jen.Id("x").Id("any")).Block(jen.Switch(jen.Id("x").Assert(jen.Type())).Block(jen.Case(jen.Id("int"), jen.Id("string")).Block()))"#
    );
}

#[test]
fn literal_tokens_keep_their_spelling() {
    let p = program(
        "package p\n\nvar (\n\tmode = 0755\n\tf    = 1.50\n\tg    = 1e3\n\ts    = \"\\x41\\u00e9\"\n)\n",
        &AssembleOptions::new("main"),
    );
    assert_eq!(
        unit_chain(&p, "genDeclAt11"),
        r#"jen.Var().Defs(jen.Id("mode").Op("=").Id("0755"), jen.Id("f").Op("=").Id("1.50"), jen.Id("g").Op("=").Id("1e3"), jen.Id("s").Op("=").Id("\"\\x41\\u00e9\""))"#
    );
}

#[test]
fn generated_program_is_valid_go() {
    let source = "package p\n\nimport \"os\"\n\nconst a, b = 1, 2\n\nfunc f(x any) error {\n\tswitch x.(type) {\n\tcase int, string:\n\t}\n\treturn os.WriteFile(\"p\", nil, 0644)\n}\n";
    let p = program(source, &AssembleOptions::new("main").with_entry_point(true));
    for layout in [Layout::Compact, Layout::Pretty] {
        let text = GoWriter::emit(&p, layout).unwrap();
        let rebuilt = read_go(&text).unwrap_or_else(|e| panic!("{e}\n{text}"));
        let names: Vec<_> = rebuilt
            .decls
            .iter()
            .filter_map(|d| match d {
                jenjen_syntax::Decl::Func(f) => Some(f.name.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["genDeclAt24", "genFuncf", "genFile", "main"]);
    }
}
