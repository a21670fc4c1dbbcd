// ABOUTME: Error types for lexing, parsing, and evaluation failures

use thiserror::Error;

/// Line number meaning "unknown" — attached when an error is synthesised
/// without a traceable source location.
pub const UNKNOWN_LINE: i64 = -1;

/// Renders the `(line N)` suffix used by every variant's `Display`, or an
/// empty string when the line is unknown.
fn line_suffix(line: i64) -> String {
    if line >= 0 {
        format!(" (line {})", line)
    } else {
        String::new()
    }
}

/// The four error kinds the core distinguishes for host-side
/// classification. Every variant carries the most specific source line
/// known at its origin site.
#[allow(dead_code)]
#[derive(Error, Debug, Clone)]
pub enum LangError {
    /// Lexing/parsing failure: mismatched parens, bad float, bad boolean literal.
    #[error("{message}{}", line_suffix(*line))]
    Parse { message: String, line: i64 },

    /// An identifier isn't resolvable as built-in, user function, or variable.
    #[error("'{name}' does not exist in this namespace{}", line_suffix(*line))]
    NotFound { name: String, line: i64 },

    /// Arity mismatch, wrong operand kind for a built-in, or domain
    /// violation (division by zero, negative sqrt).
    #[error("{message}{}", line_suffix(*line))]
    Argument { message: String, line: i64 },

    /// A Value's payload accessor was called on the wrong tag.
    #[error("internal type error: {message} (found {actual}){}", line_suffix(*line))]
    InternalType {
        message: String,
        actual: String,
        line: i64,
    },
}

impl LangError {
    pub fn parse(message: impl Into<String>, line: i64) -> Self {
        LangError::Parse {
            message: message.into(),
            line,
        }
    }

    pub fn not_found(name: impl Into<String>, line: i64) -> Self {
        LangError::NotFound {
            name: name.into(),
            line,
        }
    }

    pub fn argument(message: impl Into<String>, line: i64) -> Self {
        LangError::Argument {
            message: message.into(),
            line,
        }
    }

    pub fn internal_type(message: impl Into<String>, actual: impl Into<String>, line: i64) -> Self {
        LangError::InternalType {
            message: message.into(),
            actual: actual.into(),
            line,
        }
    }

    /// The source line this error originated at, or `UNKNOWN_LINE` (-1).
    pub fn line(&self) -> i64 {
        match self {
            LangError::Parse { line, .. }
            | LangError::NotFound { line, .. }
            | LangError::Argument { line, .. }
            | LangError::InternalType { line, .. } => *line,
        }
    }
}
