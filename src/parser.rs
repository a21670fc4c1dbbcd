// ABOUTME: Recursive-descent parser turning a token sequence into one top-level Value::List

use crate::error::LangError;
use crate::lexer::{Token, TokenKind};
use crate::value::Value;

const MISMATCHED_PARENS: &str = "mismatched parentheses";

/// Shared cursor over the token sequence plus a paren-depth counter. Both
/// are instance state so every recursive call sees the same depth, as the
/// design calls for a single shared counter rather than one per nesting
/// level.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: i32,
    last_line: i64,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            last_line: tokens.first().map(|t| t.line).unwrap_or(-1),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> &Token {
        let tok = &self.tokens[self.pos];
        self.last_line = tok.line;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn parse_value(&mut self) -> Result<Value, LangError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::OpenParen => self.parse_list(),
            // Unreachable in practice: both call sites (the top-level loop
            // and parse_list's body) check for CloseParen before calling
            // parse_value. Kept as a defensive fallback.
            TokenKind::CloseParen => Err(LangError::parse(MISMATCHED_PARENS, tok.line)),
            TokenKind::Eof => Err(LangError::parse("unexpected end of input", tok.line)),
            TokenKind::Ident => {
                self.advance();
                Ok(Value::ident(tok.text, tok.line))
            }
            TokenKind::IntegerLiteral => {
                self.advance();
                let n: i32 = tok.text.parse().map_err(|_| {
                    LangError::parse(format!("'{}' is not a valid integer", tok.text), tok.line)
                })?;
                Ok(Value::int_at(n, tok.line))
            }
            TokenKind::FloatLiteral => {
                self.advance();
                let n: f32 = tok.text.parse().map_err(|_| {
                    LangError::parse(format!("'{}' is not a valid float", tok.text), tok.line)
                })?;
                Ok(Value::float_at(n, tok.line))
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Value::string_at(tok.text, tok.line))
            }
            TokenKind::CharLiteral => {
                self.advance();
                Ok(Value::char_val(tok.text, tok.line))
            }
            TokenKind::BoolLiteral => {
                self.advance();
                Ok(Value::bool_at(tok.text == "T", tok.line))
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value, LangError> {
        let open_line = self.current().line;
        self.advance(); // consume '('
        self.depth += 1;

        let mut items = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::CloseParen => {
                    self.advance();
                    self.depth -= 1;
                    break;
                }
                TokenKind::Eof => {
                    return Err(LangError::parse(MISMATCHED_PARENS, self.last_line));
                }
                _ => items.push(self.parse_value()?),
            }
        }
        // A composite list adopts the line of its first element; an empty
        // list falls back to its own opening paren's line.
        let line = items.first().map(|v| v.line).unwrap_or(open_line);
        Ok(Value::list(items, line))
    }
}

/// Parses a full token sequence into one top-level `List` value. Every
/// top-level form in the source becomes an element of that list.
pub fn parse(tokens: &[Token]) -> Result<Value, LangError> {
    let mut parser = Parser::new(tokens);
    let mut forms = Vec::new();
    let fallback_line = tokens.first().map(|t| t.line).unwrap_or(-1);

    while parser.current().kind != TokenKind::Eof {
        if parser.current().kind == TokenKind::CloseParen {
            let tok = parser.current().clone();
            return Err(LangError::parse(MISMATCHED_PARENS, tok.line));
        }
        forms.push(parser.parse_value()?);
    }

    if parser.depth != 0 {
        return Err(LangError::parse(MISMATCHED_PARENS, parser.last_line));
    }

    let line = forms.first().map(|v| v.line).unwrap_or(fallback_line);
    Ok(Value::list(forms, line))
}
