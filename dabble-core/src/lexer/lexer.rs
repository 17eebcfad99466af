use std::collections::VecDeque;

use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn is_word_char(ch: char) -> bool {
    matches!(ch, '-' | '+' | '*' | '/' | '>' | '<' | '=' | 'a'..='z' | 'A'..='Z')
}

/// Breaks source text into tokens based on indentation, in a scheme akin to
/// the I-expressions of SRFI 49.
///
/// Every line gets its own `Open`/`Close`-bracketed list, nested inside the
/// list of the less-indented line above it, and the whole program is wrapped
/// in one outermost list. Indentation counts for nothing inside parentheses.
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    position: u32,
    next_position: u32,
    ch: Option<char>,
    next_ch: Option<char>,
    input: T,

    queued: VecDeque<Spanned>,
    // Whitespace prefix of the previous structural line. None until the
    // first one is seen.
    old_indent: Option<String>,
    // Indent depths of the lines whose lists are currently open.
    open_lines: Vec<u32>,
    // Whether the latest of those lines still has its own list open. A
    // partial outdent folds content into the enclosing line's list without
    // opening one, which clears this.
    line_open: bool,
    paren_depth: u32,
    at_line_start: bool,
    closed_out: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,

            queued: VecDeque::new(),
            old_indent: None,
            open_lines: vec![],
            line_open: false,
            paren_depth: 0,
            at_line_start: true,
            closed_out: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
        loop {
            if let Some(spanned) = self.queued.pop_front() {
                return Ok(spanned);
            }

            if self.at_line_start {
                self.lex_line_start()?;
                continue;
            }

            match self.ch {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.next_char();
                },
                Some('\n') => {
                    self.next_char();
                    self.at_line_start = true;
                },
                Some('(') => {
                    self.paren_depth += 1;
                    return Ok(self.eat_one_char(Token::LParen));
                },
                Some(')') => {
                    if self.paren_depth == 0 {
                        let location = self.position;
                        self.next_char();
                        return Err(LexicalError {
                            error: LexicalErrorType::UnmatchedCloseParen,
                            location: SrcSpan {
                                start: location,
                                end: location + 1,
                            },
                        });
                    }
                    self.paren_depth -= 1;
                    return Ok(self.eat_one_char(Token::RParen));
                },
                Some('"') => {
                    return self.lex_string();
                },
                Some(ch) if is_word_char(ch) => {
                    return Ok(self.lex_word());
                },
                Some(ch) if ch.is_ascii_digit() => {
                    return self.lex_int();
                },
                Some(ch) => {
                    let location = self.position;
                    self.next_char();
                    return Err(LexicalError {
                        error: LexicalErrorType::UnrecognizedToken { tok: ch },
                        location: SrcSpan {
                            start: location,
                            end: location + 1,
                        },
                    });
                },
                None => {
                    if !self.closed_out {
                        self.closed_out = true;
                        self.queue_final_closers();
                        continue;
                    }
                    return Ok((self.position, Token::Eof, self.position));
                }
            }
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch;

        let next = match self.input.next() {
            Some((pos, ch)) => {
                self.position = self.next_position;
                self.next_position = pos;

                Some(ch)
            },
            None => {
                self.position = self.next_position;
                self.next_position += 1;

                None
            }
        };

        self.ch = self.next_ch;
        self.next_ch = next;

        ch
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    fn queue_marker(&mut self, token: Token, at: u32) {
        self.queued.push_back((at, token, at));
    }

    /// Consume a line's leading whitespace and decide what it means. Lines
    /// holding only whitespace or a `#` comment are skipped and leave the
    /// indentation state untouched.
    fn lex_line_start(&mut self) -> Result<(), LexicalError> {
        let line_start = self.position;
        let mut indent = String::new();

        while let Some(ch) = self.ch {
            if ch == ' ' || ch == '\t' {
                indent.push(ch);
                self.next_char();
            } else {
                break;
            }
        }

        match self.ch {
            None => {
                self.at_line_start = false;
            },
            Some('\n') | Some('\r') => {
                self.next_char();
            },
            Some('#') => {
                while let Some(ch) = self.ch {
                    if ch == '\n' {
                        break;
                    }
                    self.next_char();
                }
            },
            Some(_) => {
                if self.paren_depth == 0 {
                    self.open_line(indent, line_start)?;
                }
                self.at_line_start = false;
            }
        }

        Ok(())
    }

    /// Indentation bookkeeping for a line that carries content. Emits the
    /// structural markers that separate it from the previous line.
    fn open_line(&mut self, new_indent: String, line_start: u32) -> Result<(), LexicalError> {
        let mark = self.position;
        let depth = new_indent.len() as u32;

        match self.old_indent.take() {
            None => {
                // First line ever: open the implicit whole-program list,
                // then this line's own.
                self.open_lines.push(depth);
                self.queue_marker(Token::Open, mark);
                self.queue_marker(Token::Open, mark);
                self.line_open = true;
            },
            Some(old) => {
                if new_indent == old {
                    // A sibling line: end the previous one, start this one.
                    if self.line_open {
                        self.queue_marker(Token::Close, mark);
                        self.queue_marker(Token::Open, mark);
                    }
                } else if new_indent.starts_with(old.as_str()) {
                    // An indent: this line's list nests inside the previous
                    // line's still-open one.
                    self.open_lines.push(depth);
                    self.queue_marker(Token::Open, mark);
                    self.line_open = true;
                } else if old.starts_with(new_indent.as_str()) {
                    // An outdent. One closer ends the current line's list,
                    // if it has one of its own.
                    if self.line_open {
                        self.queue_marker(Token::Close, mark);
                        self.open_lines.pop();
                    }

                    // Then one for every line list this outdent steps past.
                    let mut outdented_fully = false;
                    while self.open_lines.last().is_some_and(|top| *top >= depth) {
                        self.open_lines.pop();
                        self.queue_marker(Token::Close, mark);
                        outdented_fully = true;
                    }

                    if outdented_fully || self.open_lines.is_empty() {
                        self.open_lines.push(depth);
                        self.queue_marker(Token::Open, mark);
                        self.line_open = true;
                    } else {
                        // A partial outdent: the line folds back into the
                        // enclosing line's list without opening its own.
                        self.line_open = false;
                    }
                } else {
                    return Err(LexicalError {
                        error: LexicalErrorType::InconsistentIndentation,
                        location: SrcSpan {
                            start: line_start,
                            end: mark,
                        },
                    });
                }
            }
        }

        self.old_indent = Some(new_indent);
        Ok(())
    }

    /// One closer per still-open line list, plus one for the whole-program
    /// list.
    fn queue_final_closers(&mut self) {
        let at = self.position;

        if !self.open_lines.is_empty() {
            for _ in 0..self.open_lines.len() {
                self.queue_marker(Token::Close, at);
            }
            self.queue_marker(Token::Close, at);
            self.open_lines.clear();
        }
    }

    fn lex_word(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(ch) = self.ch {
            if is_word_char(ch) {
                word.push(ch);
                self.next_char();
            } else {
                break;
            }
        }

        let end_pos = self.position;

        (start_pos, Token::Word(word), end_pos)
    }

    fn lex_int(&mut self) -> LexResult {
        let start_pos = self.position;
        let mut digits = String::new();

        // A leading zero is a whole literal by itself: `01` is two tokens.
        if self.ch == Some('0') {
            digits.push('0');
            self.next_char();
        } else {
            while let Some(ch) = self.ch {
                if ch.is_ascii_digit() {
                    digits.push(ch);
                    self.next_char();
                } else {
                    break;
                }
            }
        }

        let end_pos = self.position;

        match digits.parse::<i64>() {
            Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
            Err(_) => Err(LexicalError {
                error: LexicalErrorType::IntegerOutOfRange,
                location: SrcSpan {
                    start: start_pos,
                    end: end_pos,
                },
            })
        }
    }

    fn lex_string(&mut self) -> LexResult {
        let start_pos = self.position;
        let mut value = String::new();

        self.next_char(); // skip opening quote

        loop {
            match self.ch {
                Some('"') => {
                    self.next_char();
                    let end_pos = self.position;

                    return Ok((start_pos, Token::Str(value), end_pos));
                },
                Some('\n') | None => {
                    return Err(LexicalError {
                        error: LexicalErrorType::UnterminatedString,
                        location: SrcSpan {
                            start: start_pos,
                            end: self.position,
                        },
                    });
                },
                Some(ch) => {
                    value.push(ch);
                    self.next_char();
                }
            }
        }
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();

        Some(token)
    }
}
