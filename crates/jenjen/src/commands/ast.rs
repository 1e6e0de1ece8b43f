//! `jenjen ast` - dump the parsed syntax tree as JSON.

use crate::commands::read_source;
use crate::config::JenjenConfig;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Ast command arguments
#[derive(Args, Debug, Clone)]
pub struct AstArgs {
    /// Go source file, use - for stdin
    pub input: PathBuf,
}

/// Syntax tree of `source` as pretty-printed JSON.
pub fn dump(source: &str, config: &JenjenConfig) -> anyhow::Result<String> {
    let file = jenjen_syntax::read_go_with_limit(source, config.limits().max_depth)
        .context("failed to parse Go source")?;
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn run(args: &AstArgs, config: &JenjenConfig) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let json = dump(&source, config)
        .with_context(|| format!("failed to read syntax tree of {}", args.input.display()))?;
    println!("{json}");
    Ok(())
}
