//! CLI command implementations - one module per subcommand.

use anyhow::Context;
use std::io::Read;
use std::path::Path;

pub mod ast;
pub mod generate;
pub mod verify;

/// Read a Go source file, or stdin when `path` is `-`.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
