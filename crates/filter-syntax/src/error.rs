use crate::{ast::span::Span, lexer::Rule};
use pest::error::{Error as PestError, InputLocation};
use thiserror::Error;

/// Malformed filter text. Always carries the offending position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at line {}, column {}: {message}", .span.line, .span.column)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }

    pub fn position(&self) -> usize {
        self.span.start
    }

    pub(crate) fn from_pest_error(err: PestError<Rule>, input: &str) -> Self {
        let position = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        let (line, column) = line_col(input, position);

        let rest = input.get(position..).unwrap_or_default();
        let message = match rest.chars().next() {
            None => "unexpected end of filter".to_string(),
            Some('\\') => "unterminated escape sequence".to_string(),
            Some(c) => format!("unexpected character '{}'", c),
        };

        let end = position + rest.chars().next().map(char::len_utf8).unwrap_or(0);
        SyntaxError::new(message, Span::new(position, end, line, column))
    }

    /// Format error with context for display
    pub fn format_error(&self, input: &str) -> String {
        let line = input
            .lines()
            .nth(self.span.line.saturating_sub(1))
            .unwrap_or_default();

        format!(
            "Syntax error at line {}, column {}:\n{}\n{}^\n{}",
            self.span.line,
            self.span.column,
            line,
            " ".repeat(self.span.column.saturating_sub(1)),
            self.message
        )
    }
}

/// 1-based line and column (in characters) of a byte offset.
pub(crate) fn line_col(input: &str, position: usize) -> (usize, usize) {
    let prefix = input.get(..position).unwrap_or(input);
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(idx) => prefix[idx + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        assert_eq!(line_col("Name==Ali", 0), (1, 1));
        assert_eq!(line_col("Name==Ali", 6), (1, 7));
        assert_eq!(line_col("A==1\n|B==2", 6), (2, 2));
    }

    #[test]
    fn test_format_error_points_at_column() {
        let err = SyntaxError::new("unexpected character '#'", Span::new(4, 5, 1, 5));
        let rendered = err.format_error("Name#1");
        assert_eq!(
            rendered,
            "Syntax error at line 1, column 5:\nName#1\n    ^\nunexpected character '#'"
        );
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 5: unexpected character '#'"
        );
    }
}
