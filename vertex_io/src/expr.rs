//! Restricted arithmetic expression evaluator.
//!
//! Configuration values may be simple expressions like `64*4*4` or `N/2`.
//! This module evaluates them with a closed grammar: numeric literals,
//! names resolved from a caller-provided map, unary `+`/`-`, binary
//! `+ - * / //` (floor division), `**`/`^` (power), and parentheses.
//! Nothing else is accepted, and nothing is ever delegated to a
//! host-language evaluator, keeping the sandboxing guarantee explicit.
//!
//! The implementation is a hand-written lexer feeding a recursive-descent
//! parser that builds a tagged [`Expr`] tree, evaluated by a tree walk.

use std::collections::HashMap;

use crate::error::{Result, VertexIoError};

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x` (identity).
    Plus,
    /// `-x` (negation).
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//` (floor division)
    FloorDiv,
    /// `**` or `^` (power)
    Pow,
}

/// A parsed expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Named reference, resolved from the caller's map at evaluation time.
    Name {
        /// The referenced name.
        name: String,
        /// Byte offset of the name in the source.
        pos: usize,
    },
    /// Unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Byte offset of the operator in the source.
        pos: usize,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Caret,
    LParen,
    RParen,
}

fn err_at(message: impl Into<String>, pos: usize) -> VertexIoError {
    VertexIoError::Expr {
        message: message.into(),
        pos,
    }
}

fn lex(src: &str) -> Result<Vec<(Token, usize)>> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' | '\r' | '\n' => i += 1,
            '+' => {
                tokens.push((Token::Plus, i));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, i));
                i += 1;
            }
            '*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push((Token::DoubleStar, i));
                    i += 2;
                } else {
                    tokens.push((Token::Star, i));
                    i += 1;
                }
            }
            '/' => {
                if bytes.get(i + 1) == Some(&b'/') {
                    tokens.push((Token::DoubleSlash, i));
                    i += 2;
                } else {
                    tokens.push((Token::Slash, i));
                    i += 1;
                }
            }
            '^' => {
                tokens.push((Token::Caret, i));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, i));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, i));
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // Optional exponent: e or E, optional sign, digits.
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text = &src[start..i];
                let value: f64 = text
                    .parse()
                    .map_err(|_| err_at(format!("bad numeric literal {:?}", text), start))?;
                tokens.push((Token::Number(value), start));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_')
                {
                    i += 1;
                }
                tokens.push((Token::Ident(src[start..i].to_string()), start));
            }
            _ => return Err(err_at(format!("unsupported character {:?}", c), i)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    src_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn here(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, p)| *p)
            .unwrap_or(self.src_len)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            let op_pos = self.here();
            self.bump();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                pos: op_pos,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    // term := unary (('*' | '/' | '//') unary)*
    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::DoubleSlash) => BinaryOp::FloorDiv,
                _ => break,
            };
            let op_pos = self.here();
            self.bump();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                pos: op_pos,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    // unary := ('+' | '-') unary | power
    // Power binds tighter than a leading sign (-2**2 == -4), while the
    // exponent itself may be signed (2**-1 == 0.5).
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            Some(Token::Plus) => Some(UnaryOp::Plus),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_power()
    }

    // power := atom (('**' | '^') unary)?   (right associative)
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_atom()?;
        if matches!(self.peek(), Some(Token::DoubleStar | Token::Caret)) {
            let op_pos = self.here();
            self.bump();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                pos: op_pos,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    // atom := number | name | '(' expr ')'
    fn parse_atom(&mut self) -> Result<Expr> {
        let pos = self.here();
        match self.bump() {
            Some(Token::Number(v)) => Ok(Expr::Number(v)),
            Some(Token::Ident(name)) => Ok(Expr::Name { name, pos }),
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(err_at("expected ')'", self.here())),
                }
            }
            Some(t) => Err(err_at(format!("unexpected token {:?}", t), pos)),
            None => Err(err_at("unexpected end of expression", pos)),
        }
    }
}

/// Parse an expression into its tree form without evaluating it.
pub fn parse_expr(src: &str) -> Result<Expr> {
    let tokens = lex(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        src_len: src.len(),
    };
    let expr = parser.parse_expr()?;
    if parser.peek().is_some() {
        return Err(err_at("trailing input after expression", parser.here()));
    }
    Ok(expr)
}

fn eval(expr: &Expr, names: &HashMap<String, f64>) -> Result<f64> {
    match expr {
        Expr::Number(v) => Ok(*v),
        Expr::Name { name, pos } => names
            .get(name)
            .copied()
            .ok_or_else(|| err_at(format!("unknown name '{}'", name), *pos)),
        Expr::Unary { op, operand } => {
            let v = eval(operand, names)?;
            Ok(match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => -v,
            })
        }
        Expr::Binary {
            op,
            pos,
            left,
            right,
        } => {
            let l = eval(left, names)?;
            let r = eval(right, names)?;
            match op {
                BinaryOp::Add => Ok(l + r),
                BinaryOp::Sub => Ok(l - r),
                BinaryOp::Mul => Ok(l * r),
                BinaryOp::Div => {
                    if r == 0.0 {
                        Err(err_at("division by zero", *pos))
                    } else {
                        Ok(l / r)
                    }
                }
                BinaryOp::FloorDiv => {
                    if r == 0.0 {
                        Err(err_at("division by zero", *pos))
                    } else {
                        Ok((l / r).floor())
                    }
                }
                BinaryOp::Pow => Ok(l.powf(r)),
            }
        }
    }
}

/// Evaluate an expression against a name-to-value map.
///
/// Pure: the result depends only on `src` and `names`. Any construct
/// outside the closed grammar, and any name missing from the map, is a
/// typed error.
pub fn eval_expr(src: &str, names: &HashMap<String, f64>) -> Result<f64> {
    let expr = parse_expr(src)?;
    eval(&expr, names)
}
