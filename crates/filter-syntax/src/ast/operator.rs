use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators, spelled as they appear in a filter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,                 // ==
    NotEqual,              // !=
    GreaterThan,           // >
    LessThan,              // <
    GreaterOrEqual,        // >=
    LessOrEqual,           // <=
    Contains,              // =*
    NotContains,           // !*
    StartsWith,            // ^*
    EndsWith,              // *$
    NotStartsWith,         // !^
    NotEndsWith,           // !$
    CaseInsensitiveEqual,  // =
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 13] = [
        ComparisonOperator::Equal,
        ComparisonOperator::NotEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::LessThan,
        ComparisonOperator::GreaterOrEqual,
        ComparisonOperator::LessOrEqual,
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
        ComparisonOperator::StartsWith,
        ComparisonOperator::EndsWith,
        ComparisonOperator::NotStartsWith,
        ComparisonOperator::NotEndsWith,
        ComparisonOperator::CaseInsensitiveEqual,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Contains => "=*",
            ComparisonOperator::NotContains => "!*",
            ComparisonOperator::StartsWith => "^*",
            ComparisonOperator::EndsWith => "*$",
            ComparisonOperator::NotStartsWith => "!^",
            ComparisonOperator::NotEndsWith => "!$",
            ComparisonOperator::CaseInsensitiveEqual => "=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// `>`, `<`, `>=`, `<=`
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::GreaterThan
                | ComparisonOperator::LessThan
                | ComparisonOperator::GreaterOrEqual
                | ComparisonOperator::LessOrEqual
        )
    }

    /// Operators that only make sense on text.
    pub fn is_text_match(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Contains
                | ComparisonOperator::NotContains
                | ComparisonOperator::StartsWith
                | ComparisonOperator::EndsWith
                | ComparisonOperator::NotStartsWith
                | ComparisonOperator::NotEndsWith
        )
    }

    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::Equal
                | ComparisonOperator::NotEqual
                | ComparisonOperator::CaseInsensitiveEqual
        )
    }

    /// Negated operators hold for a member whose value is absent.
    pub fn is_negated(&self) -> bool {
        matches!(
            self,
            ComparisonOperator::NotEqual
                | ComparisonOperator::NotContains
                | ComparisonOperator::NotStartsWith
                | ComparisonOperator::NotEndsWith
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Boolean connectors between conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "&"),
            LogicalOperator::Or => write!(f, "|"),
        }
    }
}
