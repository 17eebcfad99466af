#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Bare word: `[-a-zA-Z+*/><=]+`
    Word(String),
    // Unsigned decimal integer, no leading zeros
    Int(i64),
    // `"..."` with the quotes already stripped
    Str(String),

    // Structural markers bracketing an indentation-induced list. These are
    // emitted by the indentation bookkeeping, never read from the text.
    Open,
    Close,

    // Literal parentheses
    LParen,
    RParen,

    Eof,
}

impl Token {
    pub fn as_literal(&self) -> String {
        match self {
            Token::Word(value) => value.clone(),
            Token::Int(value) => value.to_string(),
            Token::Str(value) => format!("\"{value}\""),
            Token::Open => "<open>".to_string(),
            Token::Close => "<close>".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Eof => "\0".to_string(),
        }
    }
}
