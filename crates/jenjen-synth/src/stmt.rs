//! Statement rules.

use crate::chain::{Chain, empty, id, list};
use crate::error::SynthError;
use crate::synth::Synth;
use jenjen_syntax::{Block, BranchTok, Expr, Stmt, StmtKind};

impl Synth<'_> {
    /// Chain that rebuilds `stmt`.
    pub fn synthesize_statement(&mut self, stmt: &Stmt) -> Result<Chain, SynthError> {
        self.nested(stmt.pos, |s| s.statement(stmt))
    }

    /// `Block(...)` over the statements, in source order.
    pub fn synthesize_block(&mut self, block: &Block) -> Result<Chain, SynthError> {
        let stmts = self.statements(&block.stmts)?;
        Ok(Chain::new().call_code("Block", stmts))
    }

    fn statements(&mut self, stmts: &[Stmt]) -> Result<Vec<Chain>, SynthError> {
        stmts.iter().map(|s| self.synthesize_statement(s)).collect()
    }

    fn statement(&mut self, stmt: &Stmt) -> Result<Chain, SynthError> {
        match &stmt.kind {
            StmtKind::Bad { kind } => Err(SynthError::unsupported(kind.as_str(), stmt.pos)),
            StmtKind::Decl(decl) => self.synthesize_gen_decl(decl),
            StmtKind::Empty => Ok(empty()),

            StmtKind::Labeled { label, stmt } => Ok(id(label.name.as_str())
                .op(":")
                .keyword("Line")
                .add(self.synthesize_statement(stmt)?)),

            StmtKind::Expr(x) => self.synthesize_expression(x),

            StmtKind::Send { chan, value } => {
                let chan = self.synthesize_expression(chan)?;
                Ok(chan.op("<-").add(self.synthesize_expression(value)?))
            }

            StmtKind::IncDec { x, tok } => Ok(self.synthesize_expression(x)?.op(tok.as_str())),

            StmtKind::Assign { lhs, tok, rhs } => {
                let lhs = self.synthesize_list(lhs)?;
                Ok(lhs.op(tok.as_str()).add(self.synthesize_list(rhs)?))
            }

            StmtKind::Go(call) => {
                Ok(Chain::new().keyword("Go").add(self.synthesize_expression(call)?))
            }
            StmtKind::Defer(call) => {
                Ok(Chain::new().keyword("Defer").add(self.synthesize_expression(call)?))
            }
            StmtKind::Return(results) => {
                Ok(Chain::new().keyword("Return").add(self.synthesize_list(results)?))
            }

            StmtKind::Branch { tok, label } => {
                let chain = Chain::new().keyword(match tok {
                    BranchTok::Break => "Break",
                    BranchTok::Continue => "Continue",
                    BranchTok::Goto => "Goto",
                    BranchTok::Fallthrough => "Fallthrough",
                });
                Ok(match label {
                    Some(label) => chain.id(label.name.as_str()),
                    None => chain,
                })
            }

            StmtKind::Block(block) => self.synthesize_block(block),

            StmtKind::If {
                init,
                cond,
                body,
                els,
            } => {
                let mut header = self.init_slot(init.as_deref())?;
                header.push(self.synthesize_expression(cond)?);
                let chain = Chain::new()
                    .call_code("If", header)
                    .add(self.synthesize_block(body)?);
                match els {
                    Some(els) => Ok(chain.keyword("Else").add(self.synthesize_statement(els)?)),
                    None => Ok(chain),
                }
            }

            StmtKind::CaseClause { list: exprs, body } => {
                let head = if exprs.is_empty() {
                    Chain::new().keyword("Default")
                } else {
                    Chain::new().call_code("Case", self.synthesize_expressions(exprs)?)
                };
                Ok(head.call_code("Block", self.statements(body)?))
            }

            StmtKind::Switch { init, tag, body } => {
                let mut header = self.init_slot(init.as_deref())?;
                match tag {
                    Some(tag) => header.push(self.synthesize_expression(tag)?),
                    // `switch x := f(); {`
                    None if init.is_some() => header.push(empty()),
                    None => {}
                }
                self.switch(header, body)
            }

            StmtKind::TypeSwitch { init, assign, body } => {
                let mut header = self.init_slot(init.as_deref())?;
                header.push(self.synthesize_statement(assign)?);
                self.switch(header, body)
            }

            StmtKind::CommClause { comm, body } => {
                let head = match comm {
                    Some(comm) => {
                        Chain::new().call_code("Case", vec![self.synthesize_statement(comm)?])
                    }
                    None => Chain::new().keyword("Default"),
                };
                Ok(head.call_code("Block", self.statements(body)?))
            }

            StmtKind::Select { body } => Ok(Chain::new()
                .keyword("Select")
                .call_code("Block", self.statements(&body.stmts)?)),

            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                let header = if init.is_none() && post.is_none() {
                    match cond {
                        Some(cond) => vec![self.synthesize_expression(cond)?],
                        None => Vec::new(),
                    }
                } else {
                    vec![
                        self.stmt_slot(init.as_deref())?,
                        self.expr_slot(cond.as_ref())?,
                        self.stmt_slot(post.as_deref())?,
                    ]
                };
                Ok(Chain::new()
                    .call_code("For", header)
                    .add(self.synthesize_block(body)?))
            }

            StmtKind::Range {
                key,
                value,
                tok,
                x,
                body,
            } => {
                let source = self.synthesize_expression(x)?;
                let clause = match tok {
                    Some(tok) => {
                        let keys: Vec<&Expr> = key.iter().chain(value.iter()).collect();
                        let mut names = Vec::with_capacity(keys.len());
                        for k in keys {
                            names.push(self.synthesize_expression(k)?);
                        }
                        list(names).op(tok.as_str()).keyword("Range").add(source)
                    }
                    None => Chain::new().keyword("Range").add(source),
                };
                Ok(Chain::new()
                    .call_code("For", vec![clause])
                    .add(self.synthesize_block(body)?))
            }
        }
    }

    fn switch(&mut self, header: Vec<Chain>, body: &Block) -> Result<Chain, SynthError> {
        Ok(Chain::new()
            .call_code("Switch", header)
            .call_code("Block", self.statements(&body.stmts)?))
    }

    /// The init statement as a leading header slot, if present.
    fn init_slot(&mut self, init: Option<&Stmt>) -> Result<Vec<Chain>, SynthError> {
        match init {
            Some(init) => Ok(vec![self.synthesize_statement(init)?]),
            None => Ok(Vec::new()),
        }
    }

    fn stmt_slot(&mut self, stmt: Option<&Stmt>) -> Result<Chain, SynthError> {
        match stmt {
            Some(s) => self.synthesize_statement(s),
            None => Ok(empty()),
        }
    }

    fn expr_slot(&mut self, expr: Option<&Expr>) -> Result<Chain, SynthError> {
        match expr {
            Some(e) => self.synthesize_expression(e),
            None => Ok(empty()),
        }
    }
}
