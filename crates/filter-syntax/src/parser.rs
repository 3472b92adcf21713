use crate::{
    ast::{
        literal::Literal,
        node::{Condition, FilterNode},
        operator::LogicalOperator,
        span::Span,
    },
    error::SyntaxError,
    lexer::{
        Lexer,
        token::{Token, TokenKind},
    },
};
use tracing::debug;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest tree the parser builds, counted the way [`FilterNode::depth`] counts.
/// Each group and each connector in a chain adds a level.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Lex and parse a filter string into a typed AST
pub fn parse_filter(input: &str) -> ParseResult<FilterNode> {
    let tokens = Lexer::new().tokenize(input)?;
    let node = parse(tokens)?;

    debug!(
        conditions = node.conditions().len(),
        depth = node.depth(),
        "Parsed filter '{}'",
        input
    );
    Ok(node)
}

/// Parse a token sequence into a typed AST.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// or_expr  := and_expr ( "|" and_expr )*
/// and_expr := primary ( "&"? primary )*
/// primary  := "(" or_expr ")" | field operator value
/// ```
///
/// Two primaries written next to each other with no connector are joined with `&`.
/// Trees deeper than [`MAX_NESTING_DEPTH`] are rejected.
pub fn parse(tokens: Vec<Token>) -> ParseResult<FilterNode> {
    let mut parser = Parser::new(tokens);
    parser.parse_filter()
}

/// A parsed subtree and its depth.
type Parsed = (FilterNode, usize);

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    groups: usize,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let end = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column + t.span.len()))
                .unwrap_or_else(|| Span::new(0, 0, 1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }

        Parser {
            tokens,
            position: 0,
            groups: 0,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn parse_filter(&mut self) -> ParseResult<FilterNode> {
        if self.peek().kind == TokenKind::Eof {
            return Err(SyntaxError::new("empty filter", self.peek().span));
        }

        let (node, _) = self.parse_or()?;

        let next = self.peek();
        match &next.kind {
            TokenKind::Eof => Ok(node),
            TokenKind::RightParen => Err(SyntaxError::new("unmatched ')'", next.span)),
            other => Err(SyntaxError::new(
                format!("unexpected {} after complete condition", other),
                next.span,
            )),
        }
    }

    fn parse_or(&mut self) -> ParseResult<Parsed> {
        let (mut left, mut depth) = self.parse_and()?;

        while self.peek().kind == TokenKind::Or {
            let connector = self.advance();
            self.expect_operand(&connector)?;
            let (right, right_depth) = self.parse_and()?;
            depth = nest(depth.max(right_depth), connector.span)?;
            left = FilterNode::logical(LogicalOperator::Or, left, right);
        }

        Ok((left, depth))
    }

    fn parse_and(&mut self) -> ParseResult<Parsed> {
        let (mut left, mut depth) = self.parse_primary()?;

        loop {
            let span = self.peek().span;
            match self.peek().kind {
                TokenKind::And => {
                    let connector = self.advance();
                    self.expect_operand(&connector)?;
                }
                // Juxtaposed primaries default to `&`.
                TokenKind::LeftParen | TokenKind::Field(_) => {}
                _ => break,
            }

            let (right, right_depth) = self.parse_primary()?;
            depth = nest(depth.max(right_depth), span)?;
            left = FilterNode::logical(LogicalOperator::And, left, right);
        }

        Ok((left, depth))
    }

    fn expect_operand(&self, connector: &Token) -> ParseResult<()> {
        match self.peek().kind {
            TokenKind::Eof | TokenKind::And | TokenKind::Or | TokenKind::RightParen => {
                Err(SyntaxError::new(
                    format!("connector '{}' is missing its right operand", connector.kind),
                    connector.span,
                ))
            }
            _ => Ok(()),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Parsed> {
        let token = self.advance();

        match token.kind {
            TokenKind::LeftParen => {
                if self.peek().kind == TokenKind::RightParen {
                    return Err(SyntaxError::new("empty group '()'", token.span));
                }

                // Bounds the recursion before any subtree exists to measure.
                self.groups += 1;
                if self.groups > MAX_NESTING_DEPTH {
                    return Err(too_deep(token.span));
                }

                let (inner, depth) = self.parse_or()?;
                let close = self.advance();
                if close.kind != TokenKind::RightParen {
                    return Err(SyntaxError::new("unmatched '('", token.span));
                }
                self.groups -= 1;

                Ok((FilterNode::group(inner), nest(depth, token.span)?))
            }
            TokenKind::Field(name) => Ok((self.parse_comparison(name, token.span)?, 1)),
            TokenKind::RightParen => Err(SyntaxError::new("unmatched ')'", token.span)),
            TokenKind::And | TokenKind::Or => Err(SyntaxError::new(
                format!("connector '{}' is missing its left operand", token.kind),
                token.span,
            )),
            TokenKind::Operator(op) => Err(SyntaxError::new(
                format!("operator '{}' is missing its field name", op),
                token.span,
            )),
            TokenKind::Value(_) | TokenKind::Null => Err(SyntaxError::new(
                format!("value {} is missing its field name and operator", token.kind),
                token.span,
            )),
            TokenKind::Eof => Err(SyntaxError::new("unexpected end of filter", token.span)),
        }
    }

    fn parse_comparison(&mut self, field: String, field_span: Span) -> ParseResult<FilterNode> {
        let operator = match self.peek().kind.clone() {
            TokenKind::Operator(op) => {
                self.advance();
                op
            }
            _ => {
                return Err(SyntaxError::new(
                    format!("expected an operator after field '{}'", field),
                    self.peek().span,
                ));
            }
        };

        let value_token = self.peek().clone();
        let value = match value_token.kind {
            TokenKind::Value(text) => Literal::Text(text),
            TokenKind::Null => Literal::Null,
            _ => {
                return Err(SyntaxError::new(
                    format!("condition '{}{}' is missing its value", field, operator),
                    value_token.span,
                ));
            }
        };
        self.advance();

        Ok(FilterNode::Comparison(Condition {
            field,
            operator,
            value,
            span: field_span.merge(&value_token.span),
        }))
    }
}

fn nest(depth: usize, span: Span) -> ParseResult<usize> {
    let depth = depth + 1;
    if depth > MAX_NESTING_DEPTH {
        Err(too_deep(span))
    } else {
        Ok(depth)
    }
}

fn too_deep(span: Span) -> SyntaxError {
    SyntaxError::new("filter nested too deeply", span)
}
