//! Tolerant parsing of quadratic expressions out of item stems.
//!
//! Accepts terms in any order and on both sides of `=`, implicit or explicit
//! coefficients, decimals, Unicode minus signs and dashes, superscript
//! squares, `*`/`·`/`×` multiplication and vertex form `a(x - h)^2 + k`.
//! Everything is expanded into `a x^2 + b x + c`.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::SolveError;

/// Runs of characters that can belong to an equation.
static MATH_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9xy.+\-*/^()=\s]+").expect("valid math run regex")
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<num>\d+(?:\.\d*)?|\.\d+)|(?P<var>[a-z])|(?P<op>[-+*/^()=])|(?P<bad>\S)")
        .expect("valid token regex")
});

/// Coefficients of `a x^2 + b x + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn eval(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    /// The coefficients as integers, when all three are (near) whole and
    /// below `1e15` in magnitude. Their squares and products fit in `i128`.
    pub fn integer_coefficients(&self) -> Option<(i64, i64, i64)> {
        Some((whole(self.a)?, whole(self.b)?, whole(self.c)?))
    }

    fn require_quadratic(self) -> Result<Self, SolveError> {
        if self.a.abs() < 1e-12 {
            return Err(SolveError::NotQuadratic);
        }
        Ok(self)
    }
}

fn whole(v: f64) -> Option<i64> {
    let r = v.round();
    ((v - r).abs() < 1e-9 && r.abs() < 1e15).then_some(r as i64)
}

/// Fold look-alike symbols onto ASCII, then NFKC and lowercase.
pub fn normalize_math(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '²' => mapped.push_str("^2"),
            '³' => mapped.push_str("^3"),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}'
            | '\u{FE63}' => mapped.push('-'),
            '·' | '×' | '⋅' | '∙' => mapped.push('*'),
            other => mapped.push(other),
        }
    }
    mapped.nfkc().collect::<String>().to_lowercase()
}

/// Locate the equation inside a stem.
///
/// Prefers the longest run that mentions `x` and contains `=`, then the
/// longest run that mentions `x`.
pub fn extract_expression(stem: &str) -> Result<String, SolveError> {
    let normalized = normalize_math(stem);
    let runs: Vec<&str> = MATH_RUN
        .find_iter(&normalized)
        .map(|m| m.as_str().trim())
        .filter(|run| run.contains('x'))
        .collect();

    fn longest<'a>(candidates: Vec<&'a str>) -> Option<&'a str> {
        candidates.into_iter().max_by_key(|r| r.len())
    }
    let with_equals: Vec<&str> = runs.iter().copied().filter(|r| r.contains('=')).collect();
    longest(with_equals)
        .or_else(|| longest(runs))
        .map(|run| run.trim_end_matches('.').trim().to_string())
        .ok_or_else(|| SolveError::NoExpression(stem.to_string()))
}

/// Parse an equation `lhs = rhs` into `lhs - rhs`. Without `=`, the whole
/// text is taken to equal zero.
pub fn parse_equation(text: &str) -> Result<Quadratic, SolveError> {
    let tokens = tokenize(&normalize_math(text))?;
    let sides = split_equals(&tokens)?;
    let poly = match sides.as_slice() {
        [expr] => parse_tokens(expr)?,
        [lhs, rhs] => parse_tokens(lhs)?.minus(parse_tokens(rhs)?),
        _ => return Err(SolveError::TooManyEquals(sides.len() - 1)),
    };
    poly.into_quadratic().require_quadratic()
}

/// Parse a function definition such as `y = 2(x - 1)^2 + 3` or
/// `f(x) = x^2 - 4x`. Without `=`, the whole text is the expression.
pub fn parse_function(text: &str) -> Result<Quadratic, SolveError> {
    let tokens = tokenize(&normalize_math(text))?;
    let sides = split_equals(&tokens)?;
    let expr = match sides.as_slice() {
        [expr] => *expr,
        [lhs, rhs] if is_output_variable(lhs) => *rhs,
        [lhs, rhs] if is_output_variable(rhs) => *lhs,
        [_, _] => return Err(SolveError::NotAFunction),
        _ => return Err(SolveError::TooManyEquals(sides.len() - 1)),
    };
    parse_tokens(expr)?.into_quadratic().require_quadratic()
}

/// Extract and parse the equation in a stem (`... = 0` style items).
pub fn equation_from_stem(stem: &str) -> Result<Quadratic, SolveError> {
    parse_equation(&extract_expression(stem)?)
}

/// Extract and parse the function in a stem (`For y = ...` style items).
pub fn function_from_stem(stem: &str) -> Result<Quadratic, SolveError> {
    parse_function(&extract_expression(stem)?)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Var(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Equals,
}

fn tokenize(text: &str) -> Result<Vec<Token>, SolveError> {
    let mut tokens = Vec::new();
    for caps in TOKEN.captures_iter(text) {
        if let Some(num) = caps.name("num") {
            let value = num.as_str().parse::<f64>().map_err(|_| SolveError::UnexpectedToken {
                token: num.as_str().to_string(),
                position: num.start(),
            })?;
            tokens.push(Token::Num(value));
        } else if let Some(var) = caps.name("var") {
            // The regex guarantees exactly one char.
            let ch = var.as_str().chars().next().unwrap_or('?');
            tokens.push(Token::Var(ch));
        } else if let Some(op) = caps.name("op") {
            tokens.push(match op.as_str() {
                "+" => Token::Plus,
                "-" => Token::Minus,
                "*" => Token::Star,
                "/" => Token::Slash,
                "^" => Token::Caret,
                "(" => Token::LParen,
                ")" => Token::RParen,
                _ => Token::Equals,
            });
        } else if let Some(bad) = caps.name("bad") {
            return Err(SolveError::UnexpectedToken {
                token: bad.as_str().to_string(),
                position: bad.start(),
            });
        }
    }
    Ok(tokens)
}

fn split_equals(tokens: &[Token]) -> Result<Vec<&[Token]>, SolveError> {
    let sides: Vec<&[Token]> = tokens.split(|t| *t == Token::Equals).collect();
    if sides.iter().any(|s| s.is_empty()) {
        return Err(SolveError::UnexpectedEnd);
    }
    Ok(sides)
}

fn is_output_variable(side: &[Token]) -> bool {
    matches!(
        side,
        [Token::Var('y')] | [Token::LParen, Token::Var('x'), Token::RParen]
    )
}

/// Dense polynomial of degree at most two: `[c, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Poly([f64; 3]);

impl Poly {
    fn constant(v: f64) -> Self {
        Poly([v, 0.0, 0.0])
    }

    fn x() -> Self {
        Poly([0.0, 1.0, 0.0])
    }

    fn degree(&self) -> usize {
        self.0.iter().rposition(|c| *c != 0.0).unwrap_or(0)
    }

    fn plus(self, other: Poly) -> Poly {
        Poly([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
        ])
    }

    fn minus(self, other: Poly) -> Poly {
        self.plus(other.negated())
    }

    fn negated(self) -> Poly {
        Poly([-self.0[0], -self.0[1], -self.0[2]])
    }

    fn times(self, other: Poly) -> Result<Poly, SolveError> {
        if self.degree() + other.degree() > 2 {
            return Err(SolveError::DegreeTooHigh);
        }
        let mut out = [0.0; 3];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in other.0.iter().enumerate() {
                if i + j < 3 {
                    out[i + j] += a * b;
                }
            }
        }
        Ok(Poly(out))
    }

    fn divided_by(self, other: Poly) -> Result<Poly, SolveError> {
        if other.degree() > 0 {
            return Err(SolveError::DegreeTooHigh);
        }
        let d = other.0[0];
        if d == 0.0 {
            return Err(SolveError::DivisionByZero);
        }
        Ok(Poly([self.0[0] / d, self.0[1] / d, self.0[2] / d]))
    }

    fn pow(self, exponent: u32) -> Result<Poly, SolveError> {
        let mut out = Poly::constant(1.0);
        for _ in 0..exponent {
            out = out.times(self)?;
        }
        Ok(out)
    }

    fn into_quadratic(self) -> Quadratic {
        Quadratic {
            a: self.0[2],
            b: self.0[1],
            c: self.0[0],
        }
    }
}

fn parse_tokens(tokens: &[Token]) -> Result<Poly, SolveError> {
    let mut parser = Parser { tokens, pos: 0 };
    let poly = parser.expr()?;
    match parser.peek() {
        None => Ok(poly),
        Some(t) => Err(SolveError::UnexpectedToken {
            token: format!("{t:?}"),
            position: parser.pos,
        }),
    }
}

/// expr  := term (('+' | '-') term)*
/// term  := unary (('*' | '/')? unary)*
/// unary := ('+' | '-') unary | power
/// power := atom ('^' number)?
/// atom  := number | 'x' | '(' expr ')'
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.peek();
        self.pos += 1;
        t
    }

    fn expr(&mut self) -> Result<Poly, SolveError> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc = acc.plus(self.term()?);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc = acc.minus(self.term()?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<Poly, SolveError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc = acc.times(self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    acc = acc.divided_by(self.unary()?)?;
                }
                // Implicit multiplication: `2x`, `3(x - 1)`, `(x - 1)(x + 2)`.
                Some(Token::Num(_) | Token::Var(_) | Token::LParen) => {
                    acc = acc.times(self.power()?)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<Poly, SolveError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(self.unary()?.negated())
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Poly, SolveError> {
        let base = self.atom()?;
        if self.peek() != Some(Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        match self.next() {
            Some(Token::Num(e)) if e.fract() == 0.0 && (0.0..=8.0).contains(&e) => {
                base.pow(e as u32)
            }
            Some(Token::Num(e)) => Err(SolveError::BadExponent(e.to_string())),
            Some(t) => Err(SolveError::BadExponent(format!("{t:?}"))),
            None => Err(SolveError::UnexpectedEnd),
        }
    }

    fn atom(&mut self) -> Result<Poly, SolveError> {
        let position = self.pos;
        match self.next() {
            Some(Token::Num(v)) => Ok(Poly::constant(v)),
            Some(Token::Var('x')) => Ok(Poly::x()),
            Some(Token::Var(other)) => Err(SolveError::UnsupportedVariable(other)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    Some(t) => Err(SolveError::UnexpectedToken {
                        token: format!("{t:?}"),
                        position: self.pos - 1,
                    }),
                    None => Err(SolveError::UnexpectedEnd),
                }
            }
            Some(t) => Err(SolveError::UnexpectedToken {
                token: format!("{t:?}"),
                position,
            }),
            None => Err(SolveError::UnexpectedEnd),
        }
    }
}
