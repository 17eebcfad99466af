use crate::{
    lexer::prelude::{LexResult, Lexer, LexicalError, Spanned, Token},
    utils::prelude::SrcSpan,
};
use super::ast::{Expr, Program};
use super::error::{parse_error, ParseError, ParseErrorType};

/// Builds the parse tree out of the lexer's token stream.
///
/// expr = atom | list
/// atom = int | string | word
/// list = Open expr* Close | `(` expr* `)`
pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        match self.tokens.next() {
            Some(Ok((_, Token::Eof, _))) | None => {},
            Some(Ok(tok)) => next = Some(tok),
            Some(Err(err)) => self.lex_errors.push(err),
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let program = self.parse_program();

        // A truncated token stream is usually the fault of whatever stopped
        // the lexer, so that error wins.
        if !self.lex_errors.is_empty() {
            let error = self.lex_errors[0];

            return parse_error(ParseErrorType::LexError { error }, error.location);
        }

        program
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        match self.current_token.take() {
            // Empty input lexes to no tokens at all.
            None | Some((_, Token::Eof, _)) => Ok(Program::default()),
            Some((_, Token::Open, _)) => {
                self.step();

                // The whole-program list never collapses; its children are
                // the program's forms.
                let (forms, _) = self.parse_children(false)?;

                Ok(Program { forms })
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken { token },
                SrcSpan { start, end },
            )
        }
    }

    /// A list and whether it got collapsed. An indentation list that ends up
    /// holding exactly one child stands for that child directly, unless the
    /// child already stood for a whole list one level down. Parenthesized
    /// lists always stay lists.
    fn parse_list(&mut self, parenthesized: bool) -> Result<(Expr, bool), ParseError> {
        let (mut items, only_child_collapsed) = self.parse_children(parenthesized)?;

        if !parenthesized && items.len() == 1 && !only_child_collapsed {
            if let Some(item) = items.pop() {
                return Ok((item, true));
            }
        }

        Ok((Expr::List(items), false))
    }

    fn parse_children(&mut self, parenthesized: bool) -> Result<(Vec<Expr>, bool), ParseError> {
        let mut items: Vec<Expr> = vec![];
        let mut only_child_collapsed = false;

        loop {
            let (start, token, end) = match self.current_token.take() {
                Some(t) => t,
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            };

            match token {
                Token::Open => {
                    self.step();
                    let (item, collapsed) = self.parse_list(false)?;
                    only_child_collapsed = collapsed;
                    items.push(item);
                },
                Token::LParen => {
                    self.step();
                    let (item, _) = self.parse_list(true)?;
                    only_child_collapsed = false;
                    items.push(item);
                },
                Token::Close if parenthesized => {
                    return parse_error(
                        ParseErrorType::MissingCloseParen,
                        SrcSpan { start, end }
                    );
                },
                Token::Close => {
                    self.step();
                    return Ok((items, only_child_collapsed));
                },
                Token::RParen if parenthesized => {
                    self.step();
                    return Ok((items, only_child_collapsed));
                },
                Token::RParen => {
                    return parse_error(
                        ParseErrorType::UnexpectedCloseParen,
                        SrcSpan { start, end }
                    );
                },
                Token::Eof => {
                    return parse_error(
                        ParseErrorType::UnexpectedEof,
                        SrcSpan { start, end }
                    );
                },
                Token::Int(value) => {
                    self.step();
                    only_child_collapsed = false;
                    items.push(Expr::Int(value));
                },
                Token::Str(value) => {
                    self.step();
                    only_child_collapsed = false;
                    items.push(Expr::Str(value));
                },
                Token::Word(value) => {
                    self.step();
                    only_child_collapsed = false;
                    items.push(Expr::Word(value));
                }
            }
        }
    }
}

pub fn parse_program(src: &str) -> Result<Program, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}
