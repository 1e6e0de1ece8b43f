//! Syntax tree for Go source files.
//!
//! The tree mirrors the node kinds of Go's own `go/ast` package (without
//! generics). Expressions and types share one node type because Go's grammar
//! lets them appear in each other's positions (`make([]int, 3)`,
//! `[]byte(s)`, composite literal types).
//!
//! Every node carries a [`Pos`] so later stages can report where an
//! unsupported construct came from.

mod structure_eq;

pub use structure_eq::StructureEq;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source position: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Package name from the `package` clause.
    pub package: Ident,
    /// Every import spec in the file, in source order, flattened across
    /// import declarations.
    pub imports: Vec<ImportSpec>,
    /// Top-level declarations in source order (import declarations included).
    pub decls: Vec<Decl>,
}

/// An identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub pos: Pos,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// A single `import` spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Local name, if one was written.
    pub name: Option<ImportName>,
    /// Unquoted import path.
    pub path: String,
    pub pos: Pos,
}

/// The local name written in front of an import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportName {
    /// `import f "fmt"`
    Alias(String),
    /// `import . "fmt"`
    Dot,
    /// `import _ "embed"` (side effects only)
    Blank,
}

/// A top-level (or block-level) declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

impl Decl {
    pub fn pos(&self) -> Pos {
        match self {
            Decl::Gen(g) => g.pos,
            Decl::Func(f) => f.pos,
        }
    }
}

/// Keyword that introduced a [`GenDecl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclToken {
    Import,
    Const,
    Type,
    Var,
}

impl DeclToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclToken::Import => "import",
            DeclToken::Const => "const",
            DeclToken::Type => "type",
            DeclToken::Var => "var",
        }
    }
}

/// `import`, `const`, `type` or `var` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenDecl {
    pub tok: DeclToken,
    /// Position of the keyword.
    pub pos: Pos,
    /// Whether the specs were written inside parentheses.
    pub grouped: bool,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// One `const`/`var` spec: `a, b int = 1, 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// One `type` spec: `A struct{}` or `A = B`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: Ident,
    /// `type A = B`
    pub alias: bool,
    pub ty: Expr,
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Receiver list for methods.
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    /// `None` for functions implemented outside Go.
    pub body: Option<Block>,
    pub pos: Pos,
}

impl FuncDecl {
    /// Name of the receiver's base type, with any pointer stripped.
    pub fn receiver_type_name(&self) -> Option<&str> {
        let field = self.recv.as_ref()?.fields.first()?;
        let mut ty = &field.ty;
        loop {
            match &ty.kind {
                ExprKind::Star(inner) | ExprKind::Paren(inner) => ty = inner,
                ExprKind::Ident(name) => return Some(name),
                _ => return None,
            }
        }
    }
}

/// Parameter, result, struct field or interface method list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A field: zero or more names sharing one type.
///
/// Interface methods are fields with one name whose type is a
/// [`ExprKind::FuncType`]; embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    /// Struct tag literal, kept as written.
    pub tag: Option<BasicLit>,
}

/// A function signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuncType {
    pub params: FieldList,
    pub results: Option<FieldList>,
}

/// Literal token kinds, as in Go's `go/token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// A literal with its source text (quotes and escapes included).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
}

impl BasicLit {
    pub fn new(kind: LitKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Backquoted string literal.
    pub fn is_raw_string(&self) -> bool {
        self.kind == LitKind::String && self.value.starts_with('`')
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// An expression or type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Placeholder for source that failed to parse.
    Bad { kind: String },
    Ident(String),
    /// `...T` in a parameter list, or `...` as an array length.
    Ellipsis(Option<Box<Expr>>),
    BasicLit(BasicLit),
    FuncLit { ty: FuncType, body: Block },
    /// `T{a, b}`; `ty` is `None` for elided element types in nested literals.
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    Paren(Box<Expr>),
    Selector { x: Box<Expr>, sel: Ident },
    Index { x: Box<Expr>, index: Box<Expr> },
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
        /// `x[a:b:c]`
        slice3: bool,
    },
    /// `x.(T)`; `ty` is `None` for the `x.(type)` form of a type switch.
    TypeAssert { x: Box<Expr>, ty: Option<Box<Expr>> },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        /// Final argument is spread with `...`.
        ellipsis: bool,
    },
    /// `*x` as a dereference or a pointer type.
    Star(Box<Expr>),
    Unary { op: String, x: Box<Expr> },
    Binary { x: Box<Expr>, op: String, y: Box<Expr> },
    KeyValue { key: Box<Expr>, value: Box<Expr> },
    /// `[N]T` or `[]T` (`len` is `None` for slices).
    ArrayType {
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },
    StructType(FieldList),
    FuncType(FuncType),
    InterfaceType(FieldList),
    MapType { key: Box<Expr>, value: Box<Expr> },
    ChanType { dir: ChanDir, value: Box<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Ident(name.into()), Pos::default())
    }

    pub fn lit(kind: LitKind, value: impl Into<String>) -> Self {
        Self::new(ExprKind::BasicLit(BasicLit::new(kind, value)), Pos::default())
    }

    pub fn int(value: i64) -> Self {
        Self::lit(LitKind::Int, value.to_string())
    }

    pub fn string(value: &str) -> Self {
        Self::lit(LitKind::String, format!("{value:?}"))
    }

    pub fn selector(x: Expr, sel: impl Into<String>) -> Self {
        let pos = x.pos;
        Self::new(
            ExprKind::Selector {
                x: Box::new(x),
                sel: Ident::new(sel, pos),
            },
            pos,
        )
    }

    pub fn call(fun: Expr, args: Vec<Expr>) -> Self {
        let pos = fun.pos;
        Self::new(
            ExprKind::Call {
                fun: Box::new(fun),
                args,
                ellipsis: false,
            },
            pos,
        )
    }

    pub fn binary(x: Expr, op: impl Into<String>, y: Expr) -> Self {
        let pos = x.pos;
        Self::new(
            ExprKind::Binary {
                x: Box::new(x),
                op: op.into(),
                y: Box::new(y),
            },
            pos,
        )
    }

    pub fn unary(op: impl Into<String>, x: Expr) -> Self {
        let pos = x.pos;
        Self::new(
            ExprKind::Unary {
                op: op.into(),
                x: Box::new(x),
            },
            pos,
        )
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::Bad { kind } => kind,
            ExprKind::Ident(_) => "identifier",
            ExprKind::Ellipsis(_) => "ellipsis",
            ExprKind::BasicLit(_) => "literal",
            ExprKind::FuncLit { .. } => "function literal",
            ExprKind::CompositeLit { .. } => "composite literal",
            ExprKind::Paren(_) => "parenthesized expression",
            ExprKind::Selector { .. } => "selector",
            ExprKind::Index { .. } => "index expression",
            ExprKind::Slice { .. } => "slice expression",
            ExprKind::TypeAssert { .. } => "type assertion",
            ExprKind::Call { .. } => "call",
            ExprKind::Star(_) => "star expression",
            ExprKind::Unary { .. } => "unary expression",
            ExprKind::Binary { .. } => "binary expression",
            ExprKind::KeyValue { .. } => "key-value expression",
            ExprKind::ArrayType { .. } => "array type",
            ExprKind::StructType(_) => "struct type",
            ExprKind::FuncType(_) => "function type",
            ExprKind::InterfaceType(_) => "interface type",
            ExprKind::MapType { .. } => "map type",
            ExprKind::ChanType { .. } => "channel type",
        }
    }
}

/// `{ ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Pos,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            pos: Pos::default(),
        }
    }
}

/// `++` or `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncDec {
    Inc,
    Dec,
}

impl IncDec {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncDec::Inc => "++",
            IncDec::Dec => "--",
        }
    }
}

/// Branch statement keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchTok {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// Placeholder for source that failed to parse.
    Bad { kind: String },
    Decl(GenDecl),
    Empty,
    Labeled { label: Ident, stmt: Box<Stmt> },
    Expr(Expr),
    Send { chan: Expr, value: Expr },
    IncDec { x: Expr, tok: IncDec },
    /// `=`, `:=` and the compound assignment operators.
    Assign {
        lhs: Vec<Expr>,
        tok: String,
        rhs: Vec<Expr>,
    },
    Go(Expr),
    Defer(Expr),
    Return(Vec<Expr>),
    Branch {
        tok: BranchTok,
        label: Option<Ident>,
    },
    Block(Block),
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Block,
        /// Either a [`StmtKind::Block`] or another [`StmtKind::If`].
        els: Option<Box<Stmt>>,
    },
    /// `case a, b:` in an expression or type switch; an empty list is
    /// `default:`.
    CaseClause { list: Vec<Expr>, body: Vec<Stmt> },
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        body: Block,
    },
    TypeSwitch {
        init: Option<Box<Stmt>>,
        /// `v := x.(type)` or `x.(type)`.
        assign: Box<Stmt>,
        body: Block,
    },
    /// `case <-ch:` in a select; `None` is `default:`.
    CommClause {
        comm: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },
    Select { body: Block },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        /// `=` or `:=`; `None` for `for range x`.
        tok: Option<String>,
        x: Expr,
        body: Block,
    },
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn expr(x: Expr) -> Self {
        let pos = x.pos;
        Self::new(StmtKind::Expr(x), pos)
    }

    pub fn assign(lhs: Vec<Expr>, tok: impl Into<String>, rhs: Vec<Expr>) -> Self {
        let pos = lhs.first().map(|e| e.pos).unwrap_or_default();
        Self::new(
            StmtKind::Assign {
                lhs,
                tok: tok.into(),
                rhs,
            },
            pos,
        )
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Self::new(StmtKind::Block(Block::new(stmts)), Pos::default())
    }

    pub fn return_stmt(results: Vec<Expr>) -> Self {
        Self::new(StmtKind::Return(results), Pos::default())
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            StmtKind::Bad { kind } => kind,
            StmtKind::Decl(_) => "declaration statement",
            StmtKind::Empty => "empty statement",
            StmtKind::Labeled { .. } => "labeled statement",
            StmtKind::Expr(_) => "expression statement",
            StmtKind::Send { .. } => "send statement",
            StmtKind::IncDec { .. } => "inc/dec statement",
            StmtKind::Assign { .. } => "assignment",
            StmtKind::Go(_) => "go statement",
            StmtKind::Defer(_) => "defer statement",
            StmtKind::Return(_) => "return statement",
            StmtKind::Branch { .. } => "branch statement",
            StmtKind::Block(_) => "block",
            StmtKind::If { .. } => "if statement",
            StmtKind::CaseClause { .. } => "case clause",
            StmtKind::Switch { .. } => "switch statement",
            StmtKind::TypeSwitch { .. } => "type switch statement",
            StmtKind::CommClause { .. } => "comm clause",
            StmtKind::Select { .. } => "select statement",
            StmtKind::For { .. } => "for statement",
            StmtKind::Range { .. } => "range statement",
        }
    }
}
