//! The token definition for the search query language.

use std::fmt;

/// A token is a single unit of the language: a kind plus the text it matched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    // Operands
    FieldName, // a configured field name
    Value,     // quoted or raw value

    // Operators
    Comparator, // =, !=, =~ ...
    Connective, // and, or

    // Grouping
    SubqueryStart, // (
    SubqueryEnd,   // )

    // Internal
    #[default]
    Empty,      // placeholder, never emitted
    EndOfInput, // scanner end signal, never emitted
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::FieldName => "[fieldName]",
            TokenKind::Value => "[value]",
            TokenKind::Comparator => "[comparator]",
            TokenKind::Connective => "[connective]",
            TokenKind::SubqueryStart => "[subQueryStart]",
            TokenKind::SubqueryEnd => "[subQueryEnd]",
            TokenKind::Empty => "[empty]",
            TokenKind::EndOfInput => "[eof]",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::FieldName, "title");
        assert_eq!(token.to_string(), "[fieldName]: 'title'");

        let token = Token::new(TokenKind::SubqueryEnd, ")");
        assert_eq!(token.to_string(), "[subQueryEnd]: ')'");
    }

    #[test]
    fn test_default_token_is_empty() {
        let token = Token::default();
        assert!(token.is(TokenKind::Empty));
        assert!(token.value.is_empty());
    }
}
