// ABOUTME: Tokenizer: advances through the source one token at a time, resolving identifiers eagerly

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::catalog::{self, CatalogEntry};

/// An identifier resolved at lex time against {user variables} ∪ {catalog}.
/// No identifier ever reaches the parser (let alone the evaluator) unresolved.
#[derive(Clone)]
pub enum Ident {
    Variable(Rc<Cell<f64>>),
    Constant(f64),
    Fn1(fn(f64) -> f64),
    Fn2(fn(f64, f64) -> f64),
}

impl Ident {
    pub fn arity(&self) -> usize {
        match self {
            Ident::Variable(_) | Ident::Constant(_) => 0,
            Ident::Fn1(_) => 1,
            Ident::Fn2(_) => 2,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Ident::Fn1(_) | Ident::Fn2(_))
    }
}

#[derive(Clone)]
pub enum TokenKind {
    Number(f64),
    Ident(Ident),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
    End,
    /// A lexical error: unknown identifier, malformed number, or stray character.
    Error,
}

#[derive(Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// 0-based byte offset of the token's first character (after skipping
    /// leading whitespace). For `End`, this equals the source length.
    pub start: usize,
}

impl Token {
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::End)
    }
}

pub struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
    variables: &'a HashMap<String, Rc<Cell<f64>>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, variables: &'a HashMap<String, Rc<Cell<f64>>>) -> Self {
        Lexer { bytes: source.as_bytes(), pos: 0, variables }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self) -> f64 {
        let start = self.pos;

        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
        } else {
            while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.peek_byte() == Some(b'.') {
                self.pos += 1;
            }
        }
        while matches!(self.peek_byte(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }

        // Optional exponent, only consumed if a valid `[+-]?digit+` follows.
        if matches!(self.peek_byte(), Some(b'e') | Some(b'E')) {
            let mut lookahead = self.pos + 1;
            if matches!(self.bytes.get(lookahead), Some(b'+') | Some(b'-')) {
                lookahead += 1;
            }
            let digits_start = lookahead;
            while matches!(self.bytes.get(lookahead), Some(b'0'..=b'9')) {
                lookahead += 1;
            }
            if lookahead > digits_start {
                self.pos = lookahead;
            }
        }

        std::str::from_utf8(&self.bytes[start..self.pos])
            .expect("ASCII-only number lexeme")
            .parse()
            .expect("lexed number grammar always yields a valid f64 literal")
    }

    fn lex_identifier(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek_byte(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .expect("ASCII-only identifier lexeme")
            .to_string()
    }

    fn resolve(&self, name: &str) -> Option<Ident> {
        if let Some(cell) = self.variables.get(name) {
            return Some(Ident::Variable(Rc::clone(cell)));
        }
        match catalog::lookup(name)? {
            CatalogEntry::Constant(d) => Some(Ident::Constant(d)),
            CatalogEntry::Fn1(f) => Some(Ident::Fn1(f)),
            CatalogEntry::Fn2(f) => Some(Ident::Fn2(f)),
        }
    }

    /// Advance and return the next token.
    pub fn next(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.pos;

        let kind = match self.peek_byte() {
            None => TokenKind::End,
            Some(b'0'..=b'9') | Some(b'.') => {
                // A lone '.' is not a number: only commit to number-lexing
                // when a digit actually appears in the lexeme.
                let save = self.pos;
                let value = self.lex_number();
                if self.pos == save + 1 && self.bytes[save] == b'.' {
                    TokenKind::Error
                } else {
                    TokenKind::Number(value)
                }
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name = self.lex_identifier();
                match self.resolve(&name) {
                    Some(ident) => TokenKind::Ident(ident),
                    None => TokenKind::Error,
                }
            }
            Some(b'+') => {
                self.pos += 1;
                TokenKind::Plus
            }
            Some(b'-') => {
                self.pos += 1;
                TokenKind::Minus
            }
            Some(b'*') => {
                self.pos += 1;
                TokenKind::Star
            }
            Some(b'/') => {
                self.pos += 1;
                TokenKind::Slash
            }
            Some(b'%') => {
                self.pos += 1;
                TokenKind::Percent
            }
            Some(b'^') => {
                self.pos += 1;
                TokenKind::Caret
            }
            Some(b'(') => {
                self.pos += 1;
                TokenKind::LParen
            }
            Some(b')') => {
                self.pos += 1;
                TokenKind::RParen
            }
            Some(b',') => {
                self.pos += 1;
                TokenKind::Comma
            }
            Some(_) => {
                self.pos += 1;
                TokenKind::Error
            }
        };

        Token { kind, start }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let vars = HashMap::new();
        let mut lexer = Lexer::new(source, &vars);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next();
            let is_end = tok.is_end();
            out.push(tok.kind);
            if is_end {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_plain_numbers() {
        let toks = lex_all("42 3.14 .5 5e-5 1.0e3");
        let nums: Vec<f64> = toks
            .into_iter()
            .filter_map(|t| match t {
                TokenKind::Number(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(nums, vec![42.0, 3.14, 0.5, 5e-5, 1.0e3]);
    }

    #[test]
    fn lone_dot_is_an_error() {
        let toks = lex_all(".");
        assert!(matches!(toks[0], TokenKind::Error));
    }

    #[test]
    fn resolves_known_identifiers() {
        let toks = lex_all("pi sin");
        assert!(matches!(toks[0], TokenKind::Ident(Ident::Constant(_))));
        assert!(matches!(toks[1], TokenKind::Ident(Ident::Fn1(_))));
    }

    #[test]
    fn unknown_identifier_is_an_error_token() {
        let toks = lex_all("a");
        assert!(matches!(toks[0], TokenKind::Error));
    }

    #[test]
    fn user_variable_shadows_catalog_constant() {
        let mut vars = HashMap::new();
        vars.insert("pi".to_string(), Rc::new(Cell::new(1.0)));
        let mut lexer = Lexer::new("pi", &vars);
        let tok = lexer.next();
        assert!(matches!(tok.kind, TokenKind::Ident(Ident::Variable(_))));
    }

    #[test]
    fn tracks_token_start_positions() {
        let vars = HashMap::new();
        let mut lexer = Lexer::new("1 + 22", &vars);
        assert_eq!(lexer.next().start, 0);
        assert_eq!(lexer.next().start, 2);
        assert_eq!(lexer.next().start, 4);
    }
}
