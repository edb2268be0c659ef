//! Textual curve input.
//!
//! A small recursive-descent parser for polynomial expressions in
//! `x` and `y` with exact rational (or Gaussian-rational, via `I`)
//! coefficients: `+ - * / ^`, parentheses, integer literals.
//! Division is only allowed by non-zero constants, which is what
//! keeps every parsed expression a polynomial.

use plexus_integers::{Integer, Rational};
use plexus_poly::BiPoly;
use plexus_rings::gaussian::GaussianRational;
use plexus_rings::traits::{Field, Ring};

use crate::Error;

/// Parses a bivariate polynomial expression.
///
/// # Errors
///
/// [`Error::Parse`] on malformed input; [`Error::CoefficientUnsupported`]
/// when the expression requires non-polynomial arithmetic (division
/// by a non-constant) or unsupported exponents.
pub fn parse_curve(input: &str) -> Result<BiPoly, Error> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let poly = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(Error::Parse(format!(
            "unexpected trailing input at token {}",
            parser.pos
        )));
    }
    Ok(poly)
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Number(Integer),
    X,
    Y,
    ImaginaryUnit,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n = digits
                    .parse::<Integer>()
                    .map_err(|_| Error::Parse(format!("bad integer literal '{digits}'")))?;
                tokens.push(Token::Number(n));
            }
            'x' => {
                chars.next();
                tokens.push(Token::X);
            }
            'y' => {
                chars.next();
                tokens.push(Token::Y);
            }
            'I' | 'i' => {
                chars.next();
                tokens.push(Token::ImaginaryUnit);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            other => {
                return Err(Error::Parse(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expression(&mut self) -> Result<BiPoly, Error> {
        // Leading sign.
        let mut acc = match self.peek() {
            Some(Token::Minus) => {
                self.bump();
                self.term()?.neg()
            }
            _ => self.term()?,
        };

        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    acc = acc.add(&self.term()?);
                }
                Some(Token::Minus) => {
                    self.bump();
                    acc = acc.sub(&self.term()?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<BiPoly, Error> {
        let mut acc = self.power()?;

        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    acc = acc.mul(&self.power()?);
                }
                Some(Token::Slash) => {
                    self.bump();
                    let divisor = self.power()?;
                    let c = constant_of(&divisor)?;
                    let inv = Field::inv(&c).ok_or_else(|| {
                        Error::Parse("division by zero".to_string())
                    })?;
                    acc = acc.mul(&BiPoly::constant(inv));
                }
                // Juxtaposition: `2x`, `x y`, `3(x+1)`.
                Some(Token::Number(_) | Token::X | Token::Y | Token::ImaginaryUnit | Token::Open) => {
                    acc = acc.mul(&self.power()?);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn power(&mut self) -> Result<BiPoly, Error> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.bump();
            match self.bump() {
                Some(Token::Number(n)) => {
                    let exp = n
                        .to_i64()
                        .and_then(|e| u32::try_from(e).ok())
                        .ok_or(Error::CoefficientUnsupported)?;
                    let mut acc = BiPoly::constant(GaussianRational::one());
                    for _ in 0..exp {
                        acc = acc.mul(&base);
                    }
                    Ok(acc)
                }
                _ => Err(Error::Parse("exponent must be a non-negative integer".to_string())),
            }
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Result<BiPoly, Error> {
        match self.bump() {
            Some(Token::Number(n)) => Ok(BiPoly::constant(GaussianRational::from_rational(
                Rational::from_integer(n),
            ))),
            Some(Token::X) => Ok(BiPoly::x()),
            Some(Token::Y) => Ok(BiPoly::y()),
            Some(Token::ImaginaryUnit) => Ok(BiPoly::constant(GaussianRational::i())),
            Some(Token::Minus) => Ok(self.atom()?.neg()),
            Some(Token::Open) => {
                let inner = self.expression()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(Error::Parse("missing closing parenthesis".to_string())),
                }
            }
            other => Err(Error::Parse(format!("unexpected token {other:?}"))),
        }
    }
}

fn constant_of(p: &BiPoly) -> Result<GaussianRational, Error> {
    if p.degree_x() == 0 && p.degree_y() == 0 {
        Ok(p.x_coefficients()[0].coeff(0))
    } else {
        Err(Error::CoefficientUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(re: i64, im: i64) -> GaussianRational {
        GaussianRational::from_i64(re, im)
    }

    #[test]
    fn test_parse_cusp() {
        let p = parse_curve("x^2 - y^3").unwrap();
        assert_eq!(p.degree_x(), 2);
        assert_eq!(p.degree_y(), 3);
        assert_eq!(p.eval(&g(3, 0), &g(2, 0)), g(1, 0));
    }

    #[test]
    fn test_parse_product_and_juxtaposition() {
        let p = parse_curve("(x+y)(x-y)(x+2y)").unwrap();
        assert_eq!(p.degree_x(), 3);
        assert_eq!(p.eval(&g(1, 0), &g(-1, 0)), g(0, 0));
        assert_eq!(p.eval(&g(2, 0), &g(-1, 0)), g(0, 0));
    }

    #[test]
    fn test_parse_rational_and_gaussian_coefficients() {
        let p = parse_curve("x/2 + I*y").unwrap();
        assert_eq!(
            p.eval(&g(2, 0), &g(0, 0)),
            GaussianRational::from_rational(Rational::from(1))
        );
        assert_eq!(p.eval(&g(0, 0), &g(1, 0)), g(0, 1));
    }

    #[test]
    fn test_parse_rejects_division_by_variable() {
        assert!(matches!(
            parse_curve("x / y"),
            Err(Error::CoefficientUnsupported)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_curve("x + ?").is_err());
        assert!(parse_curve("(x + y").is_err());
    }

    #[test]
    fn test_unary_minus() {
        let p = parse_curve("-x^2 + 1").unwrap();
        assert_eq!(p.eval(&g(2, 0), &g(0, 0)), g(-3, 0));
    }
}
