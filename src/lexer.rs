// ABOUTME: Single-pass tokeniser turning source text into a token sequence with line numbers

use crate::error::LangError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Ident,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: i64,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: i64) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Fixed set of symbol characters identifiers may start or continue with,
/// alongside Unicode letters.
const IDENT_SYMBOLS: &str = "+-*/<>=!?£$€%^&@";

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || IDENT_SYMBOLS.contains(c)
}

fn is_ident_cont(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// A single-pass state machine with one character of lookahead. States
/// `Start`, `InIdent`, `InInteger`, `InFloat`, `InString`, `InChar`,
/// `InBool`, `InComment` are implemented as the dispatch in `tokenize` plus
/// one consuming helper per state.
struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: i64,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consumes and returns the current character, incrementing the line
    /// counter whenever a `\n` is consumed, regardless of state.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c == Some('\n') {
            self.line += 1;
        }
        self.pos += 1;
        c
    }

    fn lex_ident(&mut self) -> Token {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_ident_cont(c) {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Ident, text, line)
    }

    fn lex_number(&mut self) -> Result<Token, LangError> {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() != Some('.') {
            return Ok(Token::new(TokenKind::IntegerLiteral, text, line));
        }

        text.push('.');
        self.advance();
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    text.push(c);
                    self.advance();
                }
                Some('.') => {
                    return Err(LangError::parse(
                        "a second '.' character in a float literal is illegal",
                        self.line,
                    ));
                }
                _ => break,
            }
        }
        Ok(Token::new(TokenKind::FloatLiteral, text, line))
    }

    /// Shared escape handling for string and char literals: `\"`, `\\`,
    /// `\n`, `\r`, `\t` are recognised; any other escaped char is silently
    /// dropped.
    fn lex_escaped(&mut self, closing: char, kind: TokenKind) -> Token {
        let line = self.line;
        self.advance(); // consume opening quote
        let mut buf = String::new();
        loop {
            match self.advance() {
                None => break,
                Some(c) if c == closing => break,
                Some('\\') => match self.advance() {
                    Some('"') => buf.push('"'),
                    Some('\\') => buf.push('\\'),
                    Some('n') => buf.push('\n'),
                    Some('r') => buf.push('\r'),
                    Some('t') => buf.push('\t'),
                    Some(_) => {} // other escapes silently dropped
                    None => {}
                },
                Some(c) => buf.push(c),
            }
        }
        Token::new(kind, buf, line)
    }

    fn lex_bool(&mut self) -> Result<Token, LangError> {
        let line = self.line;
        self.advance(); // consume '#'
        match self.advance() {
            Some('T') => Ok(Token::new(TokenKind::BoolLiteral, "T", line)),
            Some('F') => Ok(Token::new(TokenKind::BoolLiteral, "F", line)),
            Some(c) => Err(LangError::parse(
                format!("#{} is an invalid boolean literal; use #T or #F", c),
                line,
            )),
            None => Err(LangError::parse(
                "#<EOF> is an invalid boolean literal; use #T or #F",
                line,
            )),
        }
    }

    fn skip_comment(&mut self) {
        self.advance(); // consume ';'
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        if self.peek() == Some('\n') {
            self.advance();
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LangError> {
        let mut tokens = Vec::new();
        loop {
            let Some(c) = self.peek() else { break };
            match c {
                c if c.is_whitespace() => {
                    self.advance();
                }
                '(' => {
                    let line = self.line;
                    self.advance();
                    tokens.push(Token::new(TokenKind::OpenParen, "(", line));
                }
                ')' => {
                    let line = self.line;
                    self.advance();
                    tokens.push(Token::new(TokenKind::CloseParen, ")", line));
                }
                ';' => self.skip_comment(),
                c if c.is_ascii_digit() => tokens.push(self.lex_number()?),
                c if is_ident_start(c) => tokens.push(self.lex_ident()),
                '"' => tokens.push(self.lex_escaped('"', TokenKind::StringLiteral)),
                '\'' => tokens.push(self.lex_escaped('\'', TokenKind::CharLiteral)),
                '#' => tokens.push(self.lex_bool()?),
                other => {
                    return Err(LangError::parse(
                        format!("unexpected character '{}' in source", other),
                        self.line,
                    ));
                }
            }
        }
        tokens.push(Token::new(TokenKind::Eof, "", -1));
        Ok(tokens)
    }
}

/// Tokenises `source` into a finite sequence terminated by an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LangError> {
    Lexer::new(source).tokenize()
}
