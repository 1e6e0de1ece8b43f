//! External Go tooling: running generator programs and formatting source.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot find `{program}` on PATH")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("`{command}` exited with {status}:\n{output}")]
    Failed {
        command: String,
        status: ExitStatus,
        output: String,
    },
}

/// Runs a complete Go program and returns what it printed.
pub trait Executor {
    fn exec(&self, source: &str) -> Result<String, RunError>;
}

/// Canonically formats Go source.
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String, RunError>;
}

fn locate(program: &str) -> Result<PathBuf, RunError> {
    which::which(program).map_err(|source| RunError::NotFound {
        program: program.to_string(),
        source,
    })
}

fn combined_output(command: String, output: std::process::Output) -> Result<String, RunError> {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if !output.status.success() {
        return Err(RunError::Failed {
            command,
            status: output.status,
            output: text,
        });
    }
    Ok(text)
}

/// Module file written next to the program so `go mod tidy` can resolve the
/// builder library.
const GO_MOD: &str = "module jenjenrun\n\ngo 1.21\n";

/// [`Executor`] backed by `go run`.
pub struct GoRunner {
    go: PathBuf,
}

impl GoRunner {
    /// Locate `program` (usually `go`) on PATH.
    pub fn new(program: &str) -> Result<Self, RunError> {
        Ok(Self {
            go: locate(program)?,
        })
    }

    fn go(&self, dir: &Path, args: &[&str]) -> Result<String, RunError> {
        tracing::debug!(dir = %dir.display(), ?args, "running go");
        let output = Command::new(&self.go).args(args).current_dir(dir).output()?;
        combined_output(format!("go {}", args.join(" ")), output)
    }
}

impl Executor for GoRunner {
    fn exec(&self, source: &str) -> Result<String, RunError> {
        let dir = tempfile::Builder::new().prefix("jenjen").tempdir()?;
        std::fs::write(dir.path().join("main.go"), source)?;
        std::fs::write(dir.path().join("go.mod"), GO_MOD)?;
        self.go(dir.path(), &["mod", "tidy"])?;
        self.go(dir.path(), &["run", "main.go"])
    }
}

/// [`Formatter`] that pipes source through `gofmt`.
pub struct GoFmt {
    gofmt: PathBuf,
}

impl GoFmt {
    pub fn new(program: &str) -> Result<Self, RunError> {
        Ok(Self {
            gofmt: locate(program)?,
        })
    }
}

impl Formatter for GoFmt {
    fn format(&self, source: &str) -> Result<String, RunError> {
        let mut child = Command::new(&self.gofmt)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("gofmt stdin unavailable"))?;
        // Feed stdin from another thread so a large file cannot fill the
        // stdout pipe while we are still writing.
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            match writer.join() {
                Ok(written) => written?,
                Err(_) => return Err(io::Error::other("gofmt writer panicked")),
            }
            output
        })?;

        if !output.status.success() {
            return Err(RunError::Failed {
                command: "gofmt".to_string(),
                status: output.status,
                output: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
