use crate::ast::{operator::ComparisonOperator, span::Span};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Identifiers
    Field(String),

    // Operators
    Operator(ComparisonOperator),

    // Literals (already un-escaped)
    Value(String),
    Null,

    // Connectors
    And, // &
    Or,  // |

    // Delimiters
    LeftParen,  // (
    RightParen, // )

    // Special
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Field(name) => write!(f, "{}", name),
            TokenKind::Operator(op) => write!(f, "{}", op),
            TokenKind::Value(text) => write!(f, "'{}'", text),
            TokenKind::Null => write!(f, "null"),
            TokenKind::And => write!(f, "&"),
            TokenKind::Or => write!(f, "|"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of filter"),
        }
    }
}
