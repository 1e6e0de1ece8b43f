//! Builder-call chains.
//!
//! A [`Chain`] is a fragment of generated Go code of the form
//! `jen.A(...).B(...)`. Chains are values: every builder method consumes the
//! chain and returns the extended one, so a chain handed back by a synthesis
//! function is only ever grown by becoming the receiver of the next call.

use std::fmt;

/// An ordered sequence of jennifer method calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    steps: Vec<Step>,
}

/// One method call in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub method: &'static str,
    pub args: Vec<Arg>,
}

/// A call argument: either nested code or a Go literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Nested chain, rendered rooted at `jen`.
    Code(Chain),
    Lit(Lit),
}

/// Literal argument kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lit {
    /// Rendered as a Go interpreted string literal.
    Quoted(String),
    /// Rendered in decimal.
    Int(i64),
}

impl Arg {
    pub fn quoted(s: impl Into<String>) -> Self {
        Arg::Lit(Lit::Quoted(s.into()))
    }

    pub fn int(n: i64) -> Self {
        Arg::Lit(Lit::Int(n))
    }
}

impl From<Chain> for Arg {
    fn from(chain: Chain) -> Self {
        Arg::Code(chain)
    }
}

impl Chain {
    /// The empty chain (renders as `jen.Null()` when used as an argument).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain with a single call.
    pub fn jen(method: &'static str, args: impl IntoIterator<Item = Arg>) -> Self {
        Self::new().call(method, args)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Append a method call.
    pub fn call(mut self, method: &'static str, args: impl IntoIterator<Item = Arg>) -> Self {
        self.steps.push(Step {
            method,
            args: args.into_iter().collect(),
        });
        self
    }

    /// Append a call whose arguments are all nested chains.
    pub fn call_code(self, method: &'static str, args: Vec<Chain>) -> Self {
        self.call(method, args.into_iter().map(Arg::Code))
    }

    /// Append another chain's calls.
    pub fn add(mut self, other: Chain) -> Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn id(self, name: impl Into<String>) -> Self {
        self.call("Id", [Arg::quoted(name)])
    }

    pub fn op(self, tok: impl Into<String>) -> Self {
        self.call("Op", [Arg::quoted(tok)])
    }

    /// Append a call taking no arguments.
    pub fn keyword(self, method: &'static str) -> Self {
        self.call(method, [])
    }
}

/// `jen.Id(name)`
pub fn id(name: impl Into<String>) -> Chain {
    Chain::new().id(name)
}

/// `jen.Op(tok)`
pub fn op(tok: impl Into<String>) -> Chain {
    Chain::new().op(tok)
}

/// `jen.Empty()`, an explicit empty slot.
pub fn empty() -> Chain {
    Chain::new().keyword("Empty")
}

/// Collapse synthesized elements: none is the empty chain, one is the element
/// itself, more are wrapped in `List(...)`.
pub fn list(mut items: Vec<Chain>) -> Chain {
    match items.len() {
        0 => Chain::new(),
        1 => items.remove(0),
        _ => Chain::new().call_code("List", items),
    }
}

/// Quote `s` as a Go interpreted string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Quoted(s) => f.write_str(&go_quote(s)),
            Lit::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Compact, single-line rendering rooted at `jen`.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("jen.Null()");
        }
        f.write_str("jen")?;
        for step in &self.steps {
            write!(f, ".{}(", step.method)?;
            for (i, arg) in step.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match arg {
                    Arg::Code(chain) => write!(f, "{chain}")?,
                    Arg::Lit(lit) => write!(f, "{lit}")?,
                }
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
