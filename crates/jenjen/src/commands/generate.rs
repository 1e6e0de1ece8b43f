//! `jenjen gen` - write the jennifer program for a Go file.

use crate::commands::read_source;
use crate::config::JenjenConfig;
use anyhow::Context;
use clap::Args;
use jenjen_synth::{AssembleOptions, GoWriter, Layout, assemble};
use std::path::PathBuf;

/// Generate command arguments
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Go source file, use - for stdin
    pub input: PathBuf,

    /// Output file (stdout if not specified)
    pub output: Option<PathBuf>,

    /// Package clause of the generated program
    #[arg(short, long)]
    pub package: Option<String>,

    /// Add a main function that prints the rebuilt file
    #[arg(short, long)]
    pub main: bool,

    /// Break blocks and declaration groups across lines
    #[arg(long)]
    pub pretty: bool,

    /// Synthesize declarations in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl GenerateArgs {
    /// Flags first, then config, then defaults.
    pub fn options(&self, config: &JenjenConfig) -> AssembleOptions {
        let package = self.package.as_deref().unwrap_or(config.package());
        AssembleOptions::new(package)
            .with_entry_point(self.main || config.entry_point())
            .with_parallel(self.parallel || config.parallel())
            .with_limits(config.limits())
    }

    pub fn layout(&self, config: &JenjenConfig) -> Layout {
        if self.pretty {
            Layout::Pretty
        } else {
            config.layout()
        }
    }
}

/// Parse `source`, synthesize and render the generator program.
pub fn generate_program(
    source: &str,
    options: &AssembleOptions,
    layout: Layout,
) -> anyhow::Result<String> {
    let file = jenjen_syntax::read_go_with_limit(source, options.limits.max_depth)
        .context("failed to parse Go source")?;
    let program = assemble(&file, options)?;
    Ok(GoWriter::emit(&program, layout)?)
}

pub fn run(args: &GenerateArgs, config: &JenjenConfig) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let text = generate_program(&source, &args.options(config), args.layout(config))
        .with_context(|| format!("failed to generate from {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Generated {} -> {}", args.input.display(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
