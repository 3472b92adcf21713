use crate::lexer::escape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Right-hand side of a comparison, before coercion to the member's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Text(String),
    Null,
}

impl Literal {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            Literal::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

/// Renders the literal as filter text, escaped so it lexes back to itself.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "{}", escape(s)),
            Literal::Null => write!(f, "null"),
        }
    }
}
