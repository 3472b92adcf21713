use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new();
    lexer
        .tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn value_of(input: &str) -> String {
    kinds(input)
        .into_iter()
        .find_map(|kind| match kind {
            TokenKind::Value(v) => Some(v),
            _ => None,
        })
        .expect("Expected a Value token")
}

#[test]
fn test_simple_condition() {
    assert_eq!(
        kinds("Name=*a"),
        vec![
            TokenKind::Field("Name".to_string()),
            TokenKind::Operator(ComparisonOperator::Contains),
            TokenKind::Value("a".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_all_operators_longest_match() {
    let cases = [
        ("==", ComparisonOperator::Equal),
        ("!=", ComparisonOperator::NotEqual),
        (">=", ComparisonOperator::GreaterOrEqual),
        ("<=", ComparisonOperator::LessOrEqual),
        (">", ComparisonOperator::GreaterThan),
        ("<", ComparisonOperator::LessThan),
        ("=*", ComparisonOperator::Contains),
        ("!*", ComparisonOperator::NotContains),
        ("^*", ComparisonOperator::StartsWith),
        ("*$", ComparisonOperator::EndsWith),
        ("!^", ComparisonOperator::NotStartsWith),
        ("!$", ComparisonOperator::NotEndsWith),
        ("=", ComparisonOperator::CaseInsensitiveEqual),
    ];

    for (symbol, expected) in cases {
        let input = format!("Id{}5", symbol);
        let tokens = kinds(&input);
        assert_eq!(tokens[1], TokenKind::Operator(expected), "operator {}", symbol);
        assert_eq!(tokens[2], TokenKind::Value("5".to_string()), "operator {}", symbol);
    }
}

#[test]
fn test_connectors_and_parens() {
    assert_eq!(
        kinds("(A==1|B==2)&C==3"),
        vec![
            TokenKind::LeftParen,
            TokenKind::Field("A".to_string()),
            TokenKind::Operator(ComparisonOperator::Equal),
            TokenKind::Value("1".to_string()),
            TokenKind::Or,
            TokenKind::Field("B".to_string()),
            TokenKind::Operator(ComparisonOperator::Equal),
            TokenKind::Value("2".to_string()),
            TokenKind::RightParen,
            TokenKind::And,
            TokenKind::Field("C".to_string()),
            TokenKind::Operator(ComparisonOperator::Equal),
            TokenKind::Value("3".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_dotted_field_name() {
    let tokens = kinds("Address.City==Tehran");
    assert_eq!(tokens[0], TokenKind::Field("Address.City".to_string()));
}

#[test]
fn test_escaped_structural_characters() {
    assert_eq!(value_of(r"Name==Ped\=ram"), "Ped=ram");
    assert_eq!(value_of(r"Name==LI \| AM"), "LI | AM");
    assert_eq!(value_of(r"Name==\(LI,AM\)"), "(LI,AM)");
    assert_eq!(value_of(r"Name==\\Liam"), r"\Liam");
    assert_eq!(value_of(r"Name==Peyman\!"), "Peyman!");
    assert_eq!(value_of(r"Name==jessi\=\=ca"), "jessi==ca");
    assert_eq!(value_of(r"Name==a\&b"), "a&b");
}

#[test]
fn test_non_structural_characters_are_literal() {
    assert_eq!(value_of("Name==a>b<c^d*e$f,g"), "a>b<c^d*e$f,g");
}

#[test]
fn test_whitespace_around_tokens_is_ignored() {
    assert_eq!(
        kinds(" Name == Ali | Id > 5 "),
        vec![
            TokenKind::Field("Name".to_string()),
            TokenKind::Operator(ComparisonOperator::Equal),
            TokenKind::Value("Ali".to_string()),
            TokenKind::Or,
            TokenKind::Field("Id".to_string()),
            TokenKind::Operator(ComparisonOperator::GreaterThan),
            TokenKind::Value("5".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_escaped_whitespace_survives_trimming() {
    assert_eq!(value_of(r"Name==\ padded\ "), " padded ");
    assert_eq!(value_of("Name==two words"), "two words");
}

#[test]
fn test_null_keyword() {
    assert_eq!(kinds("Child==null")[2], TokenKind::Null);
    assert_eq!(kinds("Child!=null ")[2], TokenKind::Null);
    assert_eq!(value_of(r"Name==\null"), "null");
    assert_eq!(value_of("Name==nullable"), "nullable");
}

#[test]
fn test_missing_operator_and_value_still_tokenize() {
    assert_eq!(
        kinds("Name"),
        vec![TokenKind::Field("Name".to_string()), TokenKind::Eof]
    );
    assert_eq!(
        kinds("Name=="),
        vec![
            TokenKind::Field("Name".to_string()),
            TokenKind::Operator(ComparisonOperator::Equal),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_escape() {
    let mut lexer = Lexer::new();
    let err = lexer.tokenize(r"Name==abc\").unwrap_err();

    assert_eq!(err.message, "unterminated escape sequence");
    assert_eq!(err.position(), 9);
}

#[test]
fn test_unrecognized_character() {
    let mut lexer = Lexer::new();
    let err = lexer.tokenize("Name#5").unwrap_err();

    assert_eq!(err.message, "unexpected character '#'");
    assert_eq!(err.span.column, 5);
}

#[test]
fn test_unescaped_structural_character_in_value_is_rejected() {
    let mut lexer = Lexer::new();
    assert!(lexer.tokenize("Name==Ped=ram").is_err());
}

#[test]
fn test_token_spans() {
    let mut lexer = Lexer::new();
    let tokens = lexer.tokenize("Id>5|Name==Bob").unwrap();

    assert_eq!(tokens[0].span, Span::new(0, 2, 1, 1));
    assert_eq!(tokens[3].kind, TokenKind::Or);
    assert_eq!(tokens[3].span.column, 5);
    assert_eq!(tokens[6].lexeme, "Bob");
    assert_eq!(tokens[7].kind, TokenKind::Eof);
    assert_eq!(tokens[7].span.start, 14);
}

#[test]
fn test_escape_round_trip() {
    let samples = [
        "Ped=ram",
        "LI | AM",
        "(LI,AM)",
        r"\Liam",
        "Peyman!",
        "jessi==ca",
        " leading",
        "trailing ",
        "null",
        "a&b",
        "*a",
        "*$a",
        "a*",
    ];

    for sample in samples {
        for operator in ["==", "=", "!=", ">="] {
            let input = format!("Name{}{}", operator, escape(sample));
            assert_eq!(value_of(&input), sample, "round trip of {:?} after {}", sample, operator);
        }
    }
}

#[test]
fn test_leading_star_does_not_change_operator() {
    assert_eq!(escape("*a"), r"\*a");
    assert_eq!(escape("a*"), "a*");
    assert_eq!(
        kinds(&format!("Name={}", escape("*a")))[1],
        TokenKind::Operator(ComparisonOperator::CaseInsensitiveEqual)
    );
}

#[test]
fn test_spans_across_lines() {
    let mut lexer = Lexer::new();
    let tokens = lexer.tokenize("Id==1\n|  Name==Bob").unwrap();

    assert_eq!(tokens[3].kind, TokenKind::Or);
    assert_eq!((tokens[3].span.line, tokens[3].span.column), (2, 1));
    assert_eq!((tokens[4].span.line, tokens[4].span.column), (2, 4));
    assert_eq!((tokens[7].span.line, tokens[7].span.column), (2, 13));
}

#[test]
fn test_large_filter_tokenizes_in_linear_time() {
    let count = 20_000;
    let input = vec!["Id==1"; count].join("|\n");

    let started = std::time::Instant::now();
    let tokens = Lexer::new().tokenize(&input).unwrap();
    let elapsed = started.elapsed();

    // Three tokens per condition, one per connector, plus EOF.
    assert_eq!(tokens.len(), count * 4);
    let last = &tokens[tokens.len() - 2];
    assert_eq!(last.lexeme, "1");
    assert_eq!((last.span.line, last.span.column), (count, 5));
    assert!(elapsed.as_secs() < 10, "tokenizing took {:?}", elapsed);
}
