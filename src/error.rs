//! Error types shared by the configuration resolver and the lexer.

use std::path::PathBuf;

use crate::token::Token;

/// Error category, for callers that branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfigComparator,
    InvalidConfigConnective,
    InvalidEscapeSequence,
    InvalidConnective,
}

/// Errors raised while resolving a configuration or scanning input.
///
/// Scanning errors carry the byte offset where they were detected and,
/// once the lexer has wrapped them, a rendered pointer into the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("missing {role} configuration: invalid comparator config")]
    InvalidConfigComparator { role: &'static str },

    #[error("missing {role} configuration: invalid connective config")]
    InvalidConfigConnective { role: &'static str },

    #[error("{}invalid escape sequence", diagnostic_prefix(.diagnostic))]
    InvalidEscapeSequence {
        position: usize,
        diagnostic: Option<String>,
    },

    #[error("{}invalid connective", diagnostic_prefix(.diagnostic))]
    InvalidConnective {
        position: usize,
        diagnostic: Option<String>,
    },
}

fn diagnostic_prefix(diagnostic: &Option<String>) -> String {
    match diagnostic {
        Some(rendered) => format!("{}: ", rendered),
        None => String::new(),
    }
}

impl LexerError {
    pub fn invalid_escape_sequence(position: usize) -> Self {
        Self::InvalidEscapeSequence {
            position,
            diagnostic: None,
        }
    }

    pub fn invalid_connective(position: usize) -> Self {
        Self::InvalidConnective {
            position,
            diagnostic: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LexerError::InvalidConfigComparator { .. } => ErrorKind::InvalidConfigComparator,
            LexerError::InvalidConfigConnective { .. } => ErrorKind::InvalidConfigConnective,
            LexerError::InvalidEscapeSequence { .. } => ErrorKind::InvalidEscapeSequence,
            LexerError::InvalidConnective { .. } => ErrorKind::InvalidConnective,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Byte offset of a scanning error. Configuration errors have none.
    pub fn position(&self) -> Option<usize> {
        match self {
            LexerError::InvalidEscapeSequence { position, .. }
            | LexerError::InvalidConnective { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            LexerError::InvalidEscapeSequence { diagnostic, .. }
            | LexerError::InvalidConnective { diagnostic, .. } => diagnostic.as_deref(),
            _ => None,
        }
    }

    /// Short explanation printed under the pointer line.
    pub(crate) fn explanation(&self) -> &'static str {
        match self {
            LexerError::InvalidConnective { .. } => {
                "invalid boolean operator. boolean operators must have two conditions"
            }
            LexerError::InvalidEscapeSequence { .. } => "invalid escape sequence",
            LexerError::InvalidConfigComparator { .. } => "invalid comparator config",
            LexerError::InvalidConfigConnective { .. } => "invalid connective config",
        }
    }

    pub(crate) fn with_diagnostic(self, rendered: String) -> Self {
        match self {
            LexerError::InvalidEscapeSequence { position, .. } => {
                LexerError::InvalidEscapeSequence {
                    position,
                    diagnostic: Some(rendered),
                }
            }
            LexerError::InvalidConnective { position, .. } => LexerError::InvalidConnective {
                position,
                diagnostic: Some(rendered),
            },
            other => other,
        }
    }
}

/// A failed tokenization: the underlying error plus every token that was
/// produced before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct TokenizeError {
    pub tokens: Vec<Token>,
    #[source]
    pub error: LexerError,
}

impl TokenizeError {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置文件不存在: {}", .0.display())]
    NotFound(PathBuf),

    #[error("无法读取配置文件 {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法解析JSON配置 {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
