use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    MissingCloseParen,
    UnexpectedCloseParen,
    UnexpectedEof,
    UnexpectedToken { token: Token },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::MissingCloseParen => ("Missing end parenthesis", vec![]),
            ParseErrorType::UnexpectedCloseParen => ("Unexpected closing parenthesis", vec![]),
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::UnexpectedToken { token } => {
                ("Not expected this", vec![format!("Found `{}`", token.as_literal())])
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
