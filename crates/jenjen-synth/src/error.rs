//! Synthesis and rendering errors.

use jenjen_syntax::Pos;

/// Fatal failure of a synthesis pass.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("{pos}: unsupported {kind}")]
    Unsupported { kind: String, pos: Pos },

    #[error("{pos}: dot import of {path:?} is not supported")]
    DotImport { path: String, pos: Pos },

    #[error("{pos}: import alias {alias:?} refers to both {first:?} and {second:?}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
        pos: Pos,
    },

    #[error("program name must not be empty")]
    EmptyProgramName,

    #[error("{pos}: nesting deeper than {limit} levels")]
    TooDeep { limit: usize, pos: Pos },
}

impl SynthError {
    pub(crate) fn unsupported(kind: impl Into<String>, pos: Pos) -> Self {
        SynthError::Unsupported {
            kind: kind.into(),
            pos,
        }
    }
}

/// Failure while writing a program unit as Go text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate unit name {0:?}")]
    DuplicateUnit(String),
}
