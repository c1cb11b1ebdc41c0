// ABOUTME: Recursive-descent parser/compiler for the precedence grammar, with constant folding

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ParseError;
use crate::lexer::{Ident, Lexer, Token, TokenKind};
use crate::node::{Node, Op};

/// Grammar (precedence ascending; `^` is right-associative):
///
/// ```text
/// list    := expr ( ',' expr )*
/// expr    := term  ( ('+'|'-')  term )*
/// term    := factor ( ('*'|'/'|'%') factor )*
/// factor  := power  ( '^' factor )?
/// power   := ('-'|'+') power | base
/// base    := number | variable-ref | constant-ref | function-app | '(' list ')'
/// function-app := fn-identifier argument
/// argument     := power | '(' list ')'
/// ```
struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
}

/// Compute the 1-based error position for an offending token.
///
/// If the token is `end` (the parser ran out of input), the position is the
/// last character actually consumed, clamped to 1 for empty input. Otherwise
/// the position is the token's own start — the parser points directly at the
/// character that broke the grammar.
fn error_for(tok: &Token) -> ParseError {
    if tok.is_end() {
        ParseError::at(tok.start.max(1))
    } else {
        ParseError::at(tok.start + 1)
    }
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, variables: &'a HashMap<String, Rc<Cell<f64>>>) -> Self {
        let mut lexer = Lexer::new(source, variables);
        let cur = lexer.next();
        Parser { lexer, cur }
    }

    fn bump(&mut self) {
        self.cur = self.lexer.next();
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if matches!(self.cur.kind, TokenKind::RParen) {
            self.bump();
            Ok(())
        } else {
            Err(error_for(&self.cur))
        }
    }

    /// `list := expr ( ',' expr )*`
    fn parse_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut items = vec![self.parse_expr()?];
        while matches!(self.cur.kind, TokenKind::Comma) {
            self.bump();
            items.push(self.parse_expr()?);
        }
        Ok(items)
    }

    /// `expr := term ( ('+'|'-') term )*`
    fn parse_expr(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_term()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Plus => Op::Add,
                TokenKind::Minus => Op::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term()?;
            node = Node::apply(op, vec![node, rhs]);
        }
        Ok(node)
    }

    /// `term := factor ( ('*'|'/'|'%') factor )*`
    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_factor()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Star => Op::Mul,
                TokenKind::Slash => Op::Div,
                TokenKind::Percent => Op::Rem,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_factor()?;
            node = Node::apply(op, vec![node, rhs]);
        }
        Ok(node)
    }

    /// `factor := power ( '^' factor )?` — right-associative via recursion on the RHS.
    fn parse_factor(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_power()?;
        if matches!(self.cur.kind, TokenKind::Caret) {
            self.bump();
            let exponent = self.parse_factor()?;
            Ok(Node::apply(Op::Pow, vec![base, exponent]))
        } else {
            Ok(base)
        }
    }

    /// `power := ('-'|'+') power | base` — a chain of unary signs collapses by parity.
    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let mut negate = false;
        loop {
            match self.cur.kind {
                TokenKind::Plus => self.bump(),
                TokenKind::Minus => {
                    negate = !negate;
                    self.bump();
                }
                _ => break,
            }
        }
        let base = self.parse_base()?;
        if negate {
            Ok(Node::apply(Op::Neg, vec![base]))
        } else {
            Ok(base)
        }
    }

    /// `base := number | variable-ref | constant-ref | function-app | '(' list ')'`
    fn parse_base(&mut self) -> Result<Node, ParseError> {
        match self.cur.kind.clone() {
            TokenKind::Number(n) => {
                self.bump();
                Ok(Node::Constant(n))
            }
            TokenKind::Ident(Ident::Constant(d)) => {
                self.bump();
                Ok(Node::Constant(d))
            }
            TokenKind::Ident(Ident::Variable(cell)) => {
                self.bump();
                Ok(Node::Variable(cell))
            }
            TokenKind::Ident(Ident::Fn1(f)) => {
                let name_start = self.cur.start;
                self.bump();
                let args = self.parse_call_arguments()?;
                self.check_arity(1, args.len(), name_start)?;
                Ok(Node::apply(Op::Fn1(f), args))
            }
            TokenKind::Ident(Ident::Fn2(f)) => {
                let name_start = self.cur.start;
                self.bump();
                let args = self.parse_call_arguments()?;
                self.check_arity(2, args.len(), name_start)?;
                Ok(Node::apply(Op::Fn2(f), args))
            }
            TokenKind::LParen => {
                self.bump();
                let mut items = self.parse_list()?;
                self.expect_rparen()?;
                if items.len() == 1 {
                    Ok(items.pop().unwrap())
                } else {
                    Err(ParseError::at(self.cur.start.max(1)))
                }
            }
            _ => Err(error_for(&self.cur)),
        }
    }

    /// `argument := power | '(' list ')'` — function application without
    /// parentheses binds exactly one `power`, so `sqrt 100 + 7` stops after
    /// `100` and leaves `+ 7` to the enclosing `expr`.
    fn parse_call_arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        if matches!(self.cur.kind, TokenKind::LParen) {
            self.bump();
            let args = self.parse_list()?;
            self.expect_rparen()?;
            Ok(args)
        } else {
            Ok(vec![self.parse_power()?])
        }
    }

    fn check_arity(&self, expected: usize, actual: usize, name_start: usize) -> Result<(), ParseError> {
        if expected == actual {
            Ok(())
        } else {
            Err(ParseError::at(name_start + 1))
        }
    }
}

/// Compile `source` into a tree, resolving `x` in `x^2 + 1`-style expressions
/// against `variables` (which shadow same-named catalog entries). Returns the
/// 1-based position of the first offending token on failure.
pub fn parse(source: &str, variables: &HashMap<String, Rc<Cell<f64>>>) -> Result<Node, ParseError> {
    let mut parser = Parser::new(source, variables);
    let root = parser.parse_expr()?;
    if !parser.cur.is_end() {
        return Err(error_for(&parser.cur));
    }
    Ok(root)
}
