use super::prelude::{parse_program, Expr, ParseError, ParseErrorType, Parser, Program};
use crate::lexer::prelude::Token;

fn parsed(input: &str) -> Vec<Expr> {
    match parse_program(input) {
        Ok(program) => program.forms,
        Err(err) => panic!("parse failed: {err:?}")
    }
}

fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().map(|token| Ok((0, token, 0))));

    parser.parse()
}

fn int(value: i64) -> Expr {
    Expr::Int(value)
}

fn word(value: &str) -> Expr {
    Expr::Word(value.to_string())
}

fn list(items: Vec<Expr>) -> Expr {
    Expr::List(items)
}

#[test]
fn test_empty_text() {
    assert_eq!(parsed(""), vec![]);
}

#[test]
fn test_parse_basics() {
    assert_eq!(parsed("word***"), vec![word("word***")]);
    assert_eq!(parsed("\"hi\""), vec![Expr::Str("hi".to_string())]);
    assert_eq!(
        parsed("(8 9 abc+)"),
        vec![list(vec![int(8), int(9), word("abc+")])]
    );
    assert_eq!(
        parsed("(1 2 (3 4))"),
        vec![list(vec![int(1), int(2), list(vec![int(3), int(4)])])]
    );
}

#[test]
fn test_parse_single_line() {
    let program = parse_tokens(vec![
        Token::Open, Token::Open, Token::Int(4), Token::Int(5), Token::Close, Token::Close
    ]);
    assert_eq!(program, Ok(Program { forms: vec![list(vec![int(4), int(5)])] }));
}

#[test]
fn test_parse_indented() {
    let text = "a
 b
  c 0
d";
    assert_eq!(parsed(text), vec![
        list(vec![
            word("a"),
            list(vec![word("b"), list(vec![word("c"), int(0)])])
        ]),
        // A 1-list collapsed to an atom
        word("d")
    ]);
}

#[test]
fn test_single_atom_is_not_list() {
    // The returned vec here is the all-containing list for the whole
    // program, which never collapses itself.
    assert_eq!(parsed("2"), vec![int(2)]);

    let text = "
if smoo
    0
    1";
    assert_eq!(parsed(text), vec![
        list(vec![word("if"), word("smoo"), int(0), int(1)])
    ]);
}

#[test]
fn test_single_atom_in_parens_is_a_list() {
    // A lone atom on its own line is just the atom, but a lone atom inside
    // parens keeps its brackets.
    let text = "
fun (x)
    2";
    assert_eq!(parsed(text), vec![
        list(vec![word("fun"), list(vec![word("x")]), int(2)])
    ]);
}

#[test]
fn test_1_lists() {
    // The line around the parens collapses; the parens themselves don't.
    assert_eq!(parsed("(frob)"), vec![list(vec![word("frob")])]);
    assert_eq!(parsed("()"), vec![list(vec![])]);
}

#[test]
fn test_parens() {
    assert_eq!(parsed("1 (2 3 4) 5"), vec![
        list(vec![int(1), list(vec![int(2), int(3), int(4)]), int(5)])
    ]);
    assert_eq!(parsed("
1
    2 (3 4 5)"), vec![
        list(vec![int(1), list(vec![int(2), list(vec![int(3), int(4), int(5)])])])
    ]);
}

#[test]
fn test_indentation_ignored_inside_parens() {
    assert_eq!(parsed("
1
  2 (3
4
  5 6
7) 8"), vec![
        list(vec![
            int(1),
            list(vec![
                int(2),
                list(vec![int(3), int(4), int(5), int(6), int(7)]),
                int(8)
            ])
        ])
    ]);
}

#[test]
fn test_partial_outdent() {
    let text = "
if foo
    1
  else
    0";
    assert_eq!(parsed(text), vec![
        list(vec![word("if"), word("foo"), int(1), word("else"), int(0)])
    ]);
}

#[test]
fn test_whitespace_only_lines_are_skipped() {
    let text = "a

     b 0";
    assert_eq!(parsed(text), vec![
        list(vec![word("a"), list(vec![word("b"), int(0)])])
    ]);
}

#[test]
fn test_unclosed_parens() {
    let err = parse_program("(1 2").expect_err("should not parse");
    assert_eq!(err.error, ParseErrorType::MissingCloseParen);
}

#[test]
fn test_stray_closer() {
    let err = parse_program(")").expect_err("should not parse");
    assert!(matches!(err.error, ParseErrorType::LexError { .. }));
}

#[test]
fn test_missing_structural_closer() {
    // Hand-built streams can be truncated in ways the lexer never produces.
    let err = parse_tokens(vec![Token::Open, Token::Open, Token::Int(4)])
        .expect_err("should not parse");
    assert_eq!(err.error, ParseErrorType::UnexpectedEof);
}

#[test]
fn test_stray_paren_closer_in_indent_list() {
    let err = parse_tokens(vec![Token::Open, Token::Open, Token::RParen])
        .expect_err("should not parse");
    assert_eq!(err.error, ParseErrorType::UnexpectedCloseParen);
}

#[test]
fn test_display_round_trips_shape() {
    let program = parse_program("a\n b 2").expect("should parse");
    assert_eq!(format!("{program}"), "(a (b 2))");
}
