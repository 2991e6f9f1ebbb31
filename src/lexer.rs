// Database Lexer
// Splits adventure database text into integers and quoted strings

use crate::error::{AdventureError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Integer(i64),
    /// Contents of a double-quoted string, quotes removed, back-ticks untouched
    Text(String),
    EOF,
}

impl TokenKind {
    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Integer(n) => format!("integer {}", n),
            TokenKind::Text(s) => format!("string \"{}\"", s),
            TokenKind::EOF => "end of file".to_string(),
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EOF;
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let line = self.line;

        match self.current() {
            None => Ok(Token {
                kind: TokenKind::EOF,
                line,
            }),
            Some('"') => {
                let text = self.read_text()?;
                Ok(Token {
                    kind: TokenKind::Text(text),
                    line,
                })
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let value = self.read_integer()?;
                Ok(Token {
                    kind: TokenKind::Integer(value),
                    line,
                })
            }
            Some(c) => Err(AdventureError::data_format(
                line,
                format!("unexpected character '{}'", c),
            )),
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.current() == Some('\n') {
            self.line += 1;
        }
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn read_text(&mut self) -> Result<String> {
        let start_line = self.line;
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.current() {
                None => {
                    return Err(AdventureError::data_format(
                        start_line,
                        "unterminated string",
                    ))
                }
                Some('"') => {
                    self.advance();
                    return Ok(text);
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_integer(&mut self) -> Result<i64> {
        let mut digits = String::new();
        if self.current() == Some('-') {
            digits.push('-');
            self.advance();
        }
        while let Some(c) = self.current() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.advance();
        }
        if let Some(c) = self.current() {
            if !c.is_whitespace() && c != '"' {
                return Err(AdventureError::data_format(
                    self.line,
                    format!("malformed number '{}{}'", digits, c),
                ));
            }
        }
        digits.parse::<i64>().map_err(|_| {
            AdventureError::data_format(self.line, format!("malformed number '{}'", digits))
        })
    }
}
