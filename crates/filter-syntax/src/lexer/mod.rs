use crate::{
    ast::{operator::ComparisonOperator, span::Span},
    error::{SyntaxError, line_col},
    lexer::token::{Token, TokenKind},
};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;
use tracing::trace;

pub mod token;

#[derive(Parser)]
#[grammar = "grammar/filter.pest"]
struct FilterGrammar;

/// Characters that must be escaped with `\` inside a value.
pub const STRUCTURAL_CHARS: [char; 7] = ['=', '!', '(', ')', '|', '&', '\\'];

const NULL_KEYWORD: &str = "null";

pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, SyntaxError> {
        self.tokens.clear();

        let trailing = input.len() - input.trim_end_matches('\\').len();
        if trailing % 2 == 1 {
            let position = input.len() - 1;
            let (line, column) = line_col(input, position);
            return Err(SyntaxError::new(
                "unterminated escape sequence",
                Span::new(position, input.len(), line, column),
            ));
        }

        let pairs = FilterGrammar::parse(Rule::filter, input)
            .map_err(|err| SyntaxError::from_pest_error(err, input))?;

        let mut tracker = LineTracker::new(input);
        for pair in pairs {
            self.process_pair(pair, &mut tracker);
        }

        // Add EOF token
        let (line, column) = tracker.locate(input.len());
        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(input.len(), input.len(), line, column),
        ));

        trace!(tokens = self.tokens.len(), "Tokenized filter '{}'", input);
        Ok(self.tokens.clone())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn process_pair(&mut self, pair: Pair<Rule>, tracker: &mut LineTracker<'_>) {
        let span = pair.as_span();
        let lexeme = span.as_str();

        let kind = match pair.as_rule() {
            Rule::field => TokenKind::Field(lexeme.to_string()),
            Rule::value => value_kind(lexeme),

            // Connectors and delimiters
            Rule::op_and => TokenKind::And,
            Rule::op_or => TokenKind::Or,
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,

            // Operators
            Rule::op_eq => TokenKind::Operator(ComparisonOperator::Equal),
            Rule::op_neq => TokenKind::Operator(ComparisonOperator::NotEqual),
            Rule::op_gte => TokenKind::Operator(ComparisonOperator::GreaterOrEqual),
            Rule::op_lte => TokenKind::Operator(ComparisonOperator::LessOrEqual),
            Rule::op_gt => TokenKind::Operator(ComparisonOperator::GreaterThan),
            Rule::op_lt => TokenKind::Operator(ComparisonOperator::LessThan),
            Rule::op_contains => TokenKind::Operator(ComparisonOperator::Contains),
            Rule::op_not_contains => TokenKind::Operator(ComparisonOperator::NotContains),
            Rule::op_starts_with => TokenKind::Operator(ComparisonOperator::StartsWith),
            Rule::op_ends_with => TokenKind::Operator(ComparisonOperator::EndsWith),
            Rule::op_not_starts_with => TokenKind::Operator(ComparisonOperator::NotStartsWith),
            Rule::op_not_ends_with => TokenKind::Operator(ComparisonOperator::NotEndsWith),
            Rule::op_loose_eq => TokenKind::Operator(ComparisonOperator::CaseInsensitiveEqual),

            Rule::EOI => return,

            // Recursively process other rules
            _ => {
                for inner_pair in pair.into_inner() {
                    self.process_pair(inner_pair, tracker);
                }
                return;
            }
        };

        let (line, column) = tracker.locate(span.start());
        let location = Span::new(span.start(), span.end(), line, column);
        self.tokens.push(Token::new(kind, lexeme, location));
    }
}

/// Line and column of token starts. Tokens arrive in source order, so each
/// lookup only scans the text since the previous one.
struct LineTracker<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LineTracker<'a> {
    fn new(input: &'a str) -> Self {
        LineTracker {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn locate(&mut self, position: usize) -> (usize, usize) {
        let Some(skipped) = self.input.get(self.offset..position) else {
            return line_col(self.input, position);
        };

        for c in skipped.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = position;
        (self.line, self.column)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(raw: &str) -> TokenKind {
    if raw.trim() == NULL_KEYWORD {
        TokenKind::Null
    } else {
        TokenKind::Value(unescape(raw))
    }
}

/// Resolves `\x` escapes and trims unescaped whitespace at either end.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut keep = 0;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let (ch, significant) = match c {
            '\\' => match chars.next() {
                Some(next) => (next, true),
                None => break,
            },
            c => (c, !c.is_whitespace()),
        };

        if out.is_empty() && !significant {
            continue;
        }
        out.push(ch);
        if significant {
            keep = out.len();
        }
    }

    out.truncate(keep);
    out
}

/// Inverse of [`unescape`]: makes arbitrary text safe to use as a value.
///
/// A leading `*` is escaped too, since after `=` it would read as `=*`.
pub fn escape(text: &str) -> String {
    if text == NULL_KEYWORD {
        return format!("\\{}", text);
    }

    let last = text.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(text.len() + 2);
    for (i, c) in text.chars().enumerate() {
        let edge_whitespace = c.is_whitespace() && (i == 0 || i == last);
        let leading_star = c == '*' && i == 0;
        if STRUCTURAL_CHARS.contains(&c) || edge_whitespace || leading_star {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests;
