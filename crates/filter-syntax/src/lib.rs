//! Lexer, parser and AST for compact filter strings such as `Name=*a`,
//! `Id>5` or `(Name==Ali|Name==Bob)&Id<10`.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{
    literal::Literal,
    node::{Condition, FilterNode},
    operator::{ComparisonOperator, LogicalOperator},
    span::Span,
    visitor::FilterVisitor,
};
pub use error::SyntaxError;
pub use lexer::{
    Lexer, escape,
    token::{Token, TokenKind},
    unescape,
};
pub use parser::{MAX_NESTING_DEPTH, parse, parse_filter};
