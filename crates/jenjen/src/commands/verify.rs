//! `jenjen verify` - check that the generated program rebuilds its input.

use crate::commands::generate::generate_program;
use crate::commands::read_source;
use crate::config::JenjenConfig;
use crate::run::{Executor, Formatter, GoFmt, GoRunner, RunError};
use anyhow::Context;
use clap::Args;
use jenjen_synth::AssembleOptions;
use std::fmt;
use std::path::PathBuf;

/// Verify command arguments
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Go source file, use - for stdin
    pub input: PathBuf,
}

/// Outcome of a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundTrip {
    Match,
    /// First differing line, numbered among compared lines.
    Mismatch {
        line: usize,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for RoundTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundTrip::Match => write!(f, "round trip ok"),
            RoundTrip::Mismatch {
                line,
                expected,
                actual,
            } => write!(
                f,
                "round trip differs at line {line}\n  expected: {expected}\n  actual:   {actual}"
            ),
        }
    }
}

/// Run `program`, format both sides and compare them with `original`.
pub fn round_trip(
    original: &str,
    program: &str,
    executor: &dyn Executor,
    formatter: &dyn Formatter,
) -> Result<RoundTrip, RunError> {
    let rebuilt = executor.exec(program)?;
    let expected = formatter.format(original)?;
    let actual = formatter.format(&rebuilt)?;
    Ok(compare(&expected, &actual))
}

/// Lines that survive a rebuild: comments and blank lines are not carried
/// through the builder calls.
fn significant_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(|line| strip_line_comment(line).trim_end())
        .filter(|line| !line.trim_start().is_empty())
}

/// `line` up to a `//` comment that is not inside a string or rune literal.
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            // raw strings have no escapes
            Some(q) if b == b'\\' && q != b'`' => i += 1,
            Some(_) => {}
            None if b == b'"' || b == b'`' || b == b'\'' => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            None => {}
        }
        i += 1;
    }
    line
}

pub fn compare(expected: &str, actual: &str) -> RoundTrip {
    let mut expected_lines = significant_lines(expected);
    let mut actual_lines = significant_lines(actual);
    let mut line = 0;
    loop {
        line += 1;
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return RoundTrip::Match,
            (e, a) if e == a => continue,
            (e, a) => {
                return RoundTrip::Mismatch {
                    line,
                    expected: e.unwrap_or("<end of file>").to_string(),
                    actual: a.unwrap_or("<end of file>").to_string(),
                };
            }
        }
    }
}

pub fn run(args: &VerifyArgs, config: &JenjenConfig) -> anyhow::Result<()> {
    let source = read_source(&args.input)?;
    let options = AssembleOptions::new("main")
        .with_entry_point(true)
        .with_parallel(config.parallel())
        .with_limits(config.limits());
    let program = generate_program(&source, &options, config.layout())
        .with_context(|| format!("failed to generate from {}", args.input.display()))?;

    let runner = GoRunner::new(config.go())?;
    let formatter = GoFmt::new(config.gofmt())?;
    match round_trip(&source, &program, &runner, &formatter)? {
        RoundTrip::Match => {
            eprintln!("{}: {}", args.input.display(), RoundTrip::Match);
            Ok(())
        }
        mismatch => anyhow::bail!("{}: {mismatch}", args.input.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Prints a fixed file regardless of the program.
    struct Echo(&'static str);

    impl Executor for Echo {
        fn exec(&self, _source: &str) -> Result<String, RunError> {
            Ok(self.0.to_string())
        }
    }

    /// Collapses runs of spaces, enough to stand in for gofmt here.
    struct Squash;

    impl Formatter for Squash {
        fn format(&self, source: &str) -> Result<String, RunError> {
            Ok(source
                .lines()
                .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }

    #[test]
    fn test_match_ignores_comments_and_spacing() {
        let original = "// Package demo.\npackage demo\n\n\nvar x  = 1 // one\n";
        let rebuilt = "package demo\n\nvar x = 1\n";
        let result = round_trip(original, "", &Echo(rebuilt), &Squash).unwrap();
        assert_eq!(result, RoundTrip::Match);
    }

    #[test]
    fn test_comment_markers_inside_literals_are_kept() {
        assert_eq!(strip_line_comment(r#"u := "http://x" // site"#), r#"u := "http://x" "#);
        assert_eq!(strip_line_comment("r := `a//b`"), "r := `a//b`");
        assert_eq!(strip_line_comment(r#"s := "\"//" + x"#), r#"s := "\"//" + x"#);
        assert_eq!(strip_line_comment("c := '/' // slash"), "c := '/' ");

        let result = compare("u := \"http://x\"\n", "u := \"http://y\"\n");
        assert!(matches!(result, RoundTrip::Mismatch { line: 1, .. }));
    }

    #[test]
    fn test_mismatch_reports_first_difference() {
        let result = compare("package demo\nvar x = 1\n", "package demo\nvar x = 2\n");
        assert_eq!(
            result,
            RoundTrip::Mismatch {
                line: 2,
                expected: "var x = 1".into(),
                actual: "var x = 2".into(),
            }
        );
        assert_eq!(
            result.to_string(),
            "round trip differs at line 2\n  expected: var x = 1\n  actual:   var x = 2"
        );
    }

    #[test]
    fn test_truncated_output_is_a_mismatch() {
        let result = compare("package demo\nvar x = 1\n", "package demo\n");
        assert!(matches!(
            result,
            RoundTrip::Mismatch { line: 2, ref actual, .. } if actual == "<end of file>"
        ));
    }

    #[test]
    fn test_executor_failure_propagates() {
        struct Broken;
        impl Executor for Broken {
            fn exec(&self, _source: &str) -> Result<String, RunError> {
                Err(RunError::Io(std::io::Error::other("boom")))
            }
        }
        let err = round_trip("package p\n", "", &Broken, &Squash).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
