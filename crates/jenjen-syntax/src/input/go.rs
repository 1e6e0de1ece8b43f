//! Tree-sitter based Go reader.

use crate::ir::*;
use crate::traits::{ReadError, Reader};
use std::cell::Cell;
use tree_sitter::{Node, Parser, Tree};

/// Static instance of the Go reader.
pub static GO_READER: GoReader = GoReader;

/// Nesting ceiling used by [`read_go`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Go reader using tree-sitter.
pub struct GoReader;

impl Reader for GoReader {
    fn language(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn read(&self, source: &str) -> Result<File, ReadError> {
        read_go(source)
    }
}

/// Parse Go source into a syntax tree.
pub fn read_go(source: &str) -> Result<File, ReadError> {
    read_go_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Parse Go source, failing with [`ReadError::TooDeep`] when nesting exceeds
/// `max_depth`.
pub fn read_go_with_limit(source: &str, max_depth: usize) -> Result<File, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_go::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source, max_depth);
    let file = ctx.read_file(&tree)?;
    tracing::debug!(
        package = %file.package.name,
        imports = file.imports.len(),
        decls = file.decls.len(),
        "read go source"
    );
    Ok(file)
}

struct ReadContext<'a> {
    source: &'a str,
    depth: Cell<usize>,
    max_depth: usize,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str, max_depth: usize) -> Self {
        Self {
            source,
            depth: Cell::new(0),
            max_depth,
        }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn pos(&self, node: Node) -> Pos {
        let point = node.start_position();
        Pos::new(
            node.start_byte() as u32,
            point.row as u32 + 1,
            point.column as u32 + 1,
        )
    }

    fn ident(&self, node: Node) -> Ident {
        Ident::new(self.node_text(node), self.pos(node))
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name).ok_or_else(|| {
            ReadError::Parse(format!("{}: {} missing {}", self.pos(node), node.kind(), name))
        })
    }

    /// Named children, comments excluded.
    fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    /// Every named node under field `name`. Comma-separated fields also
    /// yield their `,` tokens, which are dropped here.
    fn field_nodes<'t>(&self, node: Node<'t>, name: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children_by_field_name(name, &mut cursor)
            .filter(|n| n.is_named())
            .collect()
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Result<Node<'t>, ReadError> {
        self.named_children(node).into_iter().next().ok_or_else(|| {
            ReadError::Parse(format!("{}: empty {}", self.pos(node), node.kind()))
        })
    }

    fn has_token(&self, node: Node, token: &str) -> bool {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token)
    }

    fn unsupported(&self, node: Node) -> ReadError {
        ReadError::Unsupported {
            kind: node.kind().to_string(),
            pos: self.pos(node),
        }
    }

    fn reject_generics(&self, node: Node) -> Result<(), ReadError> {
        for name in ["type_parameters", "type_arguments"] {
            if let Some(params) = node.child_by_field_name(name) {
                return Err(self.unsupported(params));
            }
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &self,
        node: Node,
        f: impl FnOnce() -> Result<T, ReadError>,
    ) -> Result<T, ReadError> {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            return Err(ReadError::TooDeep {
                limit: self.max_depth,
                pos: self.pos(node),
            });
        }
        self.depth.set(depth);
        let result = f();
        self.depth.set(depth - 1);
        result
    }

    fn read_file(&self, tree: &Tree) -> Result<File, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let pos = first_error(root).map(|n| self.pos(n)).unwrap_or_default();
            return Err(ReadError::Parse(format!("{pos}: syntax error in source")));
        }

        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();

        for child in self.named_children(root) {
            match child.kind() {
                "package_clause" => package = Some(self.ident(self.first_named(child)?)),
                "import_declaration" => {
                    let decl = self.read_import_decl(child)?;
                    for spec in &decl.specs {
                        if let Spec::Import(import) = spec {
                            imports.push(import.clone());
                        }
                    }
                    decls.push(Decl::Gen(decl));
                }
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.read_func_decl(child)?));
                }
                "const_declaration" | "var_declaration" | "type_declaration" => {
                    decls.push(Decl::Gen(self.read_gen_decl(child)?));
                }
                _ => return Err(self.unsupported(child)),
            }
        }

        let package =
            package.ok_or_else(|| ReadError::Parse("missing package clause".into()))?;
        Ok(File {
            package,
            imports,
            decls,
        })
    }

    // ---- declarations ----

    fn read_import_decl(&self, node: Node) -> Result<GenDecl, ReadError> {
        let mut specs = Vec::new();
        for child in self.named_children(node) {
            match child.kind() {
                "import_spec" => specs.push(Spec::Import(self.read_import_spec(child)?)),
                "import_spec_list" => {
                    for spec in self.named_children(child) {
                        specs.push(Spec::Import(self.read_import_spec(spec)?));
                    }
                }
                _ => return Err(self.unsupported(child)),
            }
        }
        Ok(GenDecl {
            tok: DeclToken::Import,
            pos: self.pos(node),
            grouped: self.named_children(node)
                .iter()
                .any(|c| c.kind() == "import_spec_list"),
            specs,
        })
    }

    fn read_import_spec(&self, node: Node) -> Result<ImportSpec, ReadError> {
        let name = match node.child_by_field_name("name") {
            None => None,
            Some(n) => Some(match n.kind() {
                "dot" => ImportName::Dot,
                "blank_identifier" => ImportName::Blank,
                _ => ImportName::Alias(self.node_text(n).to_string()),
            }),
        };
        let path = self.node_text(self.field(node, "path")?);
        Ok(ImportSpec {
            name,
            path: unquote(path).to_string(),
            pos: self.pos(node),
        })
    }

    fn read_gen_decl(&self, node: Node) -> Result<GenDecl, ReadError> {
        let tok = match node.kind() {
            "const_declaration" => DeclToken::Const,
            "var_declaration" => DeclToken::Var,
            "type_declaration" => DeclToken::Type,
            _ => {
                return Err(ReadError::UnexpectedNode {
                    expected: "declaration".into(),
                    got: node.kind().into(),
                    pos: self.pos(node),
                });
            }
        };

        let mut specs = Vec::new();
        let mut grouped = self.has_token(node, "(");
        for child in self.named_children(node) {
            if child.kind().ends_with("_spec_list") {
                grouped = true;
                for spec in self.named_children(child) {
                    specs.push(self.read_spec(spec)?);
                }
            } else {
                specs.push(self.read_spec(child)?);
            }
        }

        Ok(GenDecl {
            tok,
            pos: self.pos(node),
            grouped,
            specs,
        })
    }

    fn read_spec(&self, node: Node) -> Result<Spec, ReadError> {
        match node.kind() {
            "const_spec" | "var_spec" => {
                let names = self
                    .field_nodes(node, "name")
                    .into_iter()
                    .map(|n| self.ident(n))
                    .collect();
                let ty = node
                    .child_by_field_name("type")
                    .map(|t| self.read_expr(t))
                    .transpose()?;
                let values = match node.child_by_field_name("value") {
                    Some(v) => self.read_expr_list(v)?,
                    None => Vec::new(),
                };
                Ok(Spec::Value(ValueSpec { names, ty, values }))
            }
            "type_spec" | "type_alias" => {
                self.reject_generics(node)?;
                Ok(Spec::Type(TypeSpec {
                    name: self.ident(self.field(node, "name")?),
                    alias: node.kind() == "type_alias",
                    ty: self.read_expr(self.field(node, "type")?)?,
                }))
            }
            _ => Err(self.unsupported(node)),
        }
    }

    fn read_func_decl(&self, node: Node) -> Result<FuncDecl, ReadError> {
        self.reject_generics(node)?;
        let recv = node
            .child_by_field_name("receiver")
            .map(|r| self.read_params(r))
            .transpose()?;
        let body = node
            .child_by_field_name("body")
            .map(|b| self.read_block(b))
            .transpose()?;
        Ok(FuncDecl {
            recv,
            name: self.ident(self.field(node, "name")?),
            ty: self.read_signature(node)?,
            body,
            pos: self.pos(node),
        })
    }

    /// Parameters and result of a function declaration, literal or type.
    fn read_signature(&self, node: Node) -> Result<FuncType, ReadError> {
        let params = self.read_params(self.field(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            None => None,
            Some(r) if r.kind() == "parameter_list" => Some(self.read_params(r)?),
            Some(r) => Some(FieldList::new(vec![Field {
                names: Vec::new(),
                ty: self.read_expr(r)?,
                tag: None,
            }])),
        };
        Ok(FuncType { params, results })
    }

    fn read_params(&self, node: Node) -> Result<FieldList, ReadError> {
        let mut fields = Vec::new();
        for child in self.named_children(node) {
            let names: Vec<Ident> = self
                .field_nodes(child, "name")
                .into_iter()
                .map(|n| self.ident(n))
                .collect();
            let ty = self.read_expr(self.field(child, "type")?)?;
            let ty = match child.kind() {
                "parameter_declaration" => ty,
                "variadic_parameter_declaration" => {
                    Expr::new(ExprKind::Ellipsis(Some(Box::new(ty))), self.pos(child))
                }
                _ => return Err(self.unsupported(child)),
            };
            fields.push(Field {
                names,
                ty,
                tag: None,
            });
        }
        Ok(FieldList::new(fields))
    }

    // ---- statements ----

    fn read_block(&self, node: Node) -> Result<Block, ReadError> {
        Ok(Block {
            stmts: self.read_stmt_list(node, &[])?,
            pos: self.pos(node),
        })
    }

    /// Statements among the named children of `node`, skipping the children
    /// whose ids are in `skip`.
    fn read_stmt_list(&self, node: Node, skip: &[usize]) -> Result<Vec<Stmt>, ReadError> {
        let mut stmts = Vec::new();
        for child in self.named_children(node) {
            if skip.contains(&child.id()) {
                continue;
            }
            if child.kind() == "statement_list" {
                stmts.extend(self.read_stmt_list(child, &[])?);
            } else {
                stmts.push(self.read_stmt(child)?);
            }
        }
        Ok(stmts)
    }

    fn read_stmt(&self, node: Node) -> Result<Stmt, ReadError> {
        self.nested(node, || self.read_stmt_inner(node))
    }

    fn read_stmt_inner(&self, node: Node) -> Result<Stmt, ReadError> {
        let pos = self.pos(node);
        let kind = match node.kind() {
            "const_declaration" | "var_declaration" | "type_declaration" => {
                StmtKind::Decl(self.read_gen_decl(node)?)
            }
            "expression_statement" => StmtKind::Expr(self.read_expr(self.first_named(node)?)?),
            "send_statement" => StmtKind::Send {
                chan: self.read_expr(self.field(node, "channel")?)?,
                value: self.read_expr(self.field(node, "value")?)?,
            },
            "receive_statement" => self.read_receive(node)?,
            "inc_statement" | "dec_statement" => StmtKind::IncDec {
                x: self.read_expr(self.first_named(node)?)?,
                tok: if node.kind() == "inc_statement" {
                    IncDec::Inc
                } else {
                    IncDec::Dec
                },
            },
            "assignment_statement" => StmtKind::Assign {
                lhs: self.read_expr_list(self.field(node, "left")?)?,
                tok: self.node_text(self.field(node, "operator")?).to_string(),
                rhs: self.read_expr_list(self.field(node, "right")?)?,
            },
            "short_var_declaration" => StmtKind::Assign {
                lhs: self.read_expr_list(self.field(node, "left")?)?,
                tok: ":=".into(),
                rhs: self.read_expr_list(self.field(node, "right")?)?,
            },
            "return_statement" => match self.named_children(node).first() {
                Some(list) => StmtKind::Return(self.read_expr_list(*list)?),
                None => StmtKind::Return(Vec::new()),
            },
            "go_statement" => StmtKind::Go(self.read_expr(self.first_named(node)?)?),
            "defer_statement" => StmtKind::Defer(self.read_expr(self.first_named(node)?)?),
            "labeled_statement" | "empty_labeled_statement" => {
                let label = self.field(node, "label")?;
                let inner = self
                    .named_children(node)
                    .into_iter()
                    .find(|c| c.id() != label.id());
                let stmt = match inner {
                    Some(s) => self.read_stmt(s)?,
                    None => Stmt::new(StmtKind::Empty, pos),
                };
                StmtKind::Labeled {
                    label: self.ident(label),
                    stmt: Box::new(stmt),
                }
            }
            "fallthrough_statement" => StmtKind::Branch {
                tok: BranchTok::Fallthrough,
                label: None,
            },
            "break_statement" | "continue_statement" | "goto_statement" => {
                let tok = match node.kind() {
                    "break_statement" => BranchTok::Break,
                    "continue_statement" => BranchTok::Continue,
                    _ => BranchTok::Goto,
                };
                let label = self.named_children(node).first().map(|l| self.ident(*l));
                StmtKind::Branch { tok, label }
            }
            "block" => StmtKind::Block(self.read_block(node)?),
            "empty_statement" => StmtKind::Empty,
            "if_statement" => self.read_if(node)?,
            "for_statement" => self.read_for(node)?,
            "expression_switch_statement" => self.read_switch(node)?,
            "type_switch_statement" => self.read_type_switch(node)?,
            "select_statement" => self.read_select(node)?,
            _ => return Err(self.unsupported(node)),
        };
        Ok(Stmt::new(kind, pos))
    }

    fn read_opt_stmt(&self, node: Node, field: &str) -> Result<Option<Box<Stmt>>, ReadError> {
        node.child_by_field_name(field)
            .map(|s| self.read_stmt(s).map(Box::new))
            .transpose()
    }

    fn read_receive(&self, node: Node) -> Result<StmtKind, ReadError> {
        let right = self.read_expr(self.field(node, "right")?)?;
        match node.child_by_field_name("left") {
            Some(left) => Ok(StmtKind::Assign {
                lhs: self.read_expr_list(left)?,
                tok: if self.has_token(node, ":=") { ":=" } else { "=" }.into(),
                rhs: vec![right],
            }),
            None => Ok(StmtKind::Expr(right)),
        }
    }

    fn read_if(&self, node: Node) -> Result<StmtKind, ReadError> {
        let els = match node.child_by_field_name("alternative") {
            Some(alt) => Some(Box::new(self.read_stmt(alt)?)),
            None => None,
        };
        Ok(StmtKind::If {
            init: self.read_opt_stmt(node, "initializer")?,
            cond: self.read_expr(self.field(node, "condition")?)?,
            body: self.read_block(self.field(node, "consequence")?)?,
            els,
        })
    }

    fn read_for(&self, node: Node) -> Result<StmtKind, ReadError> {
        let body_node = self.field(node, "body")?;
        let body = self.read_block(body_node)?;
        let header = self
            .named_children(node)
            .into_iter()
            .find(|c| c.id() != body_node.id());

        let Some(header) = header else {
            return Ok(StmtKind::For {
                init: None,
                cond: None,
                post: None,
                body,
            });
        };

        match header.kind() {
            "for_clause" => Ok(StmtKind::For {
                init: self.read_opt_stmt(header, "initializer")?,
                cond: header
                    .child_by_field_name("condition")
                    .map(|c| self.read_expr(c))
                    .transpose()?,
                post: self.read_opt_stmt(header, "update")?,
                body,
            }),
            "range_clause" => {
                let (mut key, mut value, mut tok) = (None, None, None);
                if let Some(left) = header.child_by_field_name("left") {
                    let mut names = self.read_expr_list(left)?.into_iter();
                    key = names.next();
                    value = names.next();
                    tok = Some(if self.has_token(header, ":=") { ":=" } else { "=" }.to_string());
                }
                Ok(StmtKind::Range {
                    key,
                    value,
                    tok,
                    x: self.read_expr(self.field(header, "right")?)?,
                    body,
                })
            }
            _ => Ok(StmtKind::For {
                init: None,
                cond: Some(self.read_expr(header)?),
                post: None,
                body,
            }),
        }
    }

    fn read_switch(&self, node: Node) -> Result<StmtKind, ReadError> {
        let mut clauses = Vec::new();
        for child in self.named_children(node) {
            match child.kind() {
                "expression_case" => {
                    let value = self.field(child, "value")?;
                    clauses.push(Stmt::new(
                        StmtKind::CaseClause {
                            list: self.read_expr_list(value)?,
                            body: self.read_stmt_list(child, &[value.id()])?,
                        },
                        self.pos(child),
                    ));
                }
                "default_case" => clauses.push(self.read_default_case(child)?),
                _ => {}
            }
        }
        Ok(StmtKind::Switch {
            init: self.read_opt_stmt(node, "initializer")?,
            tag: node
                .child_by_field_name("value")
                .map(|v| self.read_expr(v))
                .transpose()?,
            body: Block {
                stmts: clauses,
                pos: self.pos(node),
            },
        })
    }

    fn read_default_case(&self, node: Node) -> Result<Stmt, ReadError> {
        Ok(Stmt::new(
            StmtKind::CaseClause {
                list: Vec::new(),
                body: self.read_stmt_list(node, &[])?,
            },
            self.pos(node),
        ))
    }

    fn read_type_switch(&self, node: Node) -> Result<StmtKind, ReadError> {
        let value = self.field(node, "value")?;
        let pos = self.pos(value);
        let assert = Expr::new(
            ExprKind::TypeAssert {
                x: Box::new(self.read_expr(value)?),
                ty: None,
            },
            pos,
        );
        let assign = match node.child_by_field_name("alias") {
            Some(alias) => Stmt::new(
                StmtKind::Assign {
                    lhs: self.read_expr_list(alias)?,
                    tok: ":=".into(),
                    rhs: vec![assert],
                },
                self.pos(alias),
            ),
            None => Stmt::new(StmtKind::Expr(assert), pos),
        };

        let mut clauses = Vec::new();
        for child in self.named_children(node) {
            match child.kind() {
                "type_case" => {
                    let types = self.field_nodes(child, "type");
                    let skip: Vec<usize> = types.iter().map(|t| t.id()).collect();
                    let list = types
                        .iter()
                        .map(|t| self.read_expr(*t))
                        .collect::<Result<_, _>>()?;
                    clauses.push(Stmt::new(
                        StmtKind::CaseClause {
                            list,
                            body: self.read_stmt_list(child, &skip)?,
                        },
                        self.pos(child),
                    ));
                }
                "default_case" => clauses.push(self.read_default_case(child)?),
                _ => {}
            }
        }

        Ok(StmtKind::TypeSwitch {
            init: self.read_opt_stmt(node, "initializer")?,
            assign: Box::new(assign),
            body: Block {
                stmts: clauses,
                pos: self.pos(node),
            },
        })
    }

    fn read_select(&self, node: Node) -> Result<StmtKind, ReadError> {
        let mut clauses = Vec::new();
        for child in self.named_children(node) {
            let (comm, body) = match child.kind() {
                "communication_case" => {
                    let comm = self.field(child, "communication")?;
                    (
                        Some(Box::new(self.read_stmt(comm)?)),
                        self.read_stmt_list(child, &[comm.id()])?,
                    )
                }
                "default_case" => (None, self.read_stmt_list(child, &[])?),
                _ => continue,
            };
            clauses.push(Stmt::new(StmtKind::CommClause { comm, body }, self.pos(child)));
        }
        Ok(StmtKind::Select {
            body: Block {
                stmts: clauses,
                pos: self.pos(node),
            },
        })
    }

    // ---- expressions and types ----

    fn read_expr_list(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        if node.kind() == "expression_list" {
            self.named_children(node)
                .into_iter()
                .map(|n| self.read_expr(n))
                .collect()
        } else {
            Ok(vec![self.read_expr(node)?])
        }
    }

    fn read_boxed(&self, node: Node, field: &str) -> Result<Box<Expr>, ReadError> {
        Ok(Box::new(self.read_expr(self.field(node, field)?)?))
    }

    fn read_opt_boxed(&self, node: Node, field: &str) -> Result<Option<Box<Expr>>, ReadError> {
        node.child_by_field_name(field)
            .map(|n| self.read_expr(n).map(Box::new))
            .transpose()
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        self.nested(node, || {
            Ok(Expr::new(self.read_expr_kind(node)?, self.pos(node)))
        })
    }

    fn read_expr_kind(&self, node: Node) -> Result<ExprKind, ReadError> {
        let kind = match node.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "package_identifier"
            | "label_name" | "blank_identifier" | "nil" | "true" | "false" | "iota" => {
                ExprKind::Ident(self.node_text(node).to_string())
            }

            "int_literal" => self.lit(node, LitKind::Int),
            "float_literal" => self.lit(node, LitKind::Float),
            "imaginary_literal" => self.lit(node, LitKind::Imag),
            "rune_literal" => self.lit(node, LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => {
                self.lit(node, LitKind::String)
            }

            "parenthesized_expression" | "parenthesized_type" => {
                ExprKind::Paren(Box::new(self.read_expr(self.first_named(node)?)?))
            }

            "selector_expression" => ExprKind::Selector {
                x: self.read_boxed(node, "operand")?,
                sel: self.ident(self.field(node, "field")?),
            },
            "qualified_type" => ExprKind::Selector {
                x: self.read_boxed(node, "package")?,
                sel: self.ident(self.field(node, "name")?),
            },

            "index_expression" => ExprKind::Index {
                x: self.read_boxed(node, "operand")?,
                index: self.read_boxed(node, "index")?,
            },

            "slice_expression" => {
                let mut cursor = node.walk();
                let colons = node.children(&mut cursor).filter(|c| c.kind() == ":").count();
                ExprKind::Slice {
                    x: self.read_boxed(node, "operand")?,
                    low: self.read_opt_boxed(node, "start")?,
                    high: self.read_opt_boxed(node, "end")?,
                    max: self.read_opt_boxed(node, "capacity")?,
                    slice3: colons == 2,
                }
            }

            "type_assertion_expression" => ExprKind::TypeAssert {
                x: self.read_boxed(node, "operand")?,
                ty: Some(self.read_boxed(node, "type")?),
            },

            "call_expression" => {
                self.reject_generics(node)?;
                let (args, ellipsis) = self.read_args(self.field(node, "arguments")?)?;
                ExprKind::Call {
                    fun: self.read_boxed(node, "function")?,
                    args,
                    ellipsis,
                }
            }

            "type_conversion_expression" => ExprKind::Call {
                fun: self.read_boxed(node, "type")?,
                args: vec![self.read_expr(self.field(node, "operand")?)?],
                ellipsis: false,
            },

            "unary_expression" => {
                let op = self.node_text(self.field(node, "operator")?);
                let x = self.read_boxed(node, "operand")?;
                if op == "*" {
                    ExprKind::Star(x)
                } else {
                    ExprKind::Unary {
                        op: op.to_string(),
                        x,
                    }
                }
            }

            "binary_expression" => ExprKind::Binary {
                x: self.read_boxed(node, "left")?,
                op: self.node_text(self.field(node, "operator")?).to_string(),
                y: self.read_boxed(node, "right")?,
            },

            "composite_literal" => ExprKind::CompositeLit {
                ty: Some(self.read_boxed(node, "type")?),
                elts: self.read_literal_value(self.field(node, "body")?)?,
            },
            "literal_value" => ExprKind::CompositeLit {
                ty: None,
                elts: self.read_literal_value(node)?,
            },
            "literal_element" => return self.read_expr_kind(self.first_named(node)?),
            "keyed_element" => self.read_keyed_element(node)?,

            "func_literal" => ExprKind::FuncLit {
                ty: self.read_signature(node)?,
                body: self.read_block(self.field(node, "body")?)?,
            },

            "pointer_type" => ExprKind::Star(Box::new(self.read_expr(self.first_named(node)?)?)),
            "array_type" => ExprKind::ArrayType {
                len: Some(self.read_boxed(node, "length")?),
                elt: self.read_boxed(node, "element")?,
            },
            "implicit_length_array_type" => ExprKind::ArrayType {
                len: Some(Box::new(Expr::new(ExprKind::Ellipsis(None), self.pos(node)))),
                elt: self.read_boxed(node, "element")?,
            },
            "slice_type" => ExprKind::ArrayType {
                len: None,
                elt: self.read_boxed(node, "element")?,
            },
            "struct_type" => ExprKind::StructType(self.read_struct_fields(self.first_named(node)?)?),
            "interface_type" => ExprKind::InterfaceType(self.read_interface(node)?),
            "map_type" => ExprKind::MapType {
                key: self.read_boxed(node, "key")?,
                value: self.read_boxed(node, "value")?,
            },
            "channel_type" => ExprKind::ChanType {
                dir: self.chan_dir(node),
                value: self.read_boxed(node, "value")?,
            },
            "function_type" => ExprKind::FuncType(self.read_signature(node)?),

            _ => return Err(self.unsupported(node)),
        };
        Ok(kind)
    }

    fn lit(&self, node: Node, kind: LitKind) -> ExprKind {
        ExprKind::BasicLit(BasicLit::new(kind, self.node_text(node)))
    }

    fn read_args(&self, node: Node) -> Result<(Vec<Expr>, bool), ReadError> {
        let mut args = Vec::new();
        let mut ellipsis = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "..." => ellipsis = true,
                "comment" => {}
                "variadic_argument" => {
                    ellipsis = true;
                    args.push(self.read_expr(self.first_named(child)?)?);
                }
                _ if child.is_named() => args.push(self.read_expr(child)?),
                _ => {}
            }
        }
        Ok((args, ellipsis))
    }

    fn read_literal_value(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        self.named_children(node)
            .into_iter()
            .map(|n| self.read_expr(n))
            .collect()
    }

    fn read_keyed_element(&self, node: Node) -> Result<ExprKind, ReadError> {
        let children = self.named_children(node);
        let key = match node.child_by_field_name("key") {
            Some(k) => k,
            None => *children.first().ok_or_else(|| self.unsupported(node))?,
        };
        let value = match node.child_by_field_name("value") {
            Some(v) => v,
            None => *children.last().ok_or_else(|| self.unsupported(node))?,
        };
        Ok(ExprKind::KeyValue {
            key: Box::new(self.read_expr(key)?),
            value: Box::new(self.read_expr(value)?),
        })
    }

    fn chan_dir(&self, node: Node) -> ChanDir {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|c| !c.is_named())
            .map(|c| c.kind())
            .collect();
        match tokens.as_slice() {
            ["<-", "chan", ..] => ChanDir::Recv,
            ["chan", "<-", ..] => ChanDir::Send,
            _ => ChanDir::Both,
        }
    }

    fn read_struct_fields(&self, node: Node) -> Result<FieldList, ReadError> {
        let mut fields = Vec::new();
        for child in self.named_children(node) {
            if child.kind() != "field_declaration" {
                return Err(self.unsupported(child));
            }
            let names: Vec<Ident> = self
                .field_nodes(child, "name")
                .into_iter()
                .map(|n| self.ident(n))
                .collect();
            let mut ty = self.read_expr(self.field(child, "type")?)?;
            if names.is_empty() && self.has_token(child, "*") {
                let pos = self.pos(child);
                ty = Expr::new(ExprKind::Star(Box::new(ty)), pos);
            }
            let tag = child
                .child_by_field_name("tag")
                .map(|t| BasicLit::new(LitKind::String, self.node_text(t)));
            fields.push(Field { names, ty, tag });
        }
        Ok(FieldList::new(fields))
    }

    fn read_interface(&self, node: Node) -> Result<FieldList, ReadError> {
        let mut fields = Vec::new();
        for child in self.named_children(node) {
            let field = match child.kind() {
                "method_elem" | "method_spec" => {
                    let sig = self.read_signature(child)?;
                    Field {
                        names: vec![self.ident(self.field(child, "name")?)],
                        ty: Expr::new(ExprKind::FuncType(sig), self.pos(child)),
                        tag: None,
                    }
                }
                "type_elem" | "constraint_elem" => {
                    let types = self.named_children(child);
                    match types.as_slice() {
                        [single] => Field {
                            names: Vec::new(),
                            ty: self.read_expr(*single)?,
                            tag: None,
                        },
                        _ => return Err(self.unsupported(child)),
                    }
                }
                _ => Field {
                    names: Vec::new(),
                    ty: self.read_expr(child)?,
                    tag: None,
                },
            };
            fields.push(field);
        }
        Ok(FieldList::new(fields))
    }
}

/// Strip the quotes (or backquotes) around an import path.
fn unquote(path: &str) -> &str {
    path.trim_matches(|c| c == '"' || c == '`')
}

/// Earliest `ERROR` or `MISSING` node under `root`.
fn first_error(root: Node) -> Option<Node> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}
