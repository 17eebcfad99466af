use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    InconsistentIndentation,
    UnmatchedCloseParen,
    UnterminatedString,
    IntegerOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("I don't know what to do with this character", vec![
                    format!("`{tok}` is not part of any token")
                ])
            },
            LexicalErrorType::InconsistentIndentation => {
                ("Indentation was not consistent", vec![
                    "The whitespace characters that make up each indent must be either \
                    an addition to or a truncation of the ones in the indent above.".to_string(),
                    "You can't just swap out tabs for spaces suddenly.".to_string()
                ])
            },
            LexicalErrorType::UnmatchedCloseParen => {
                ("Unmatched closing parenthesis", vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("Missing closing `\"`", vec![])
            },
            LexicalErrorType::IntegerOutOfRange => {
                ("Integer literal is too large", vec![])
            }
        }
    }
}
