//! Unevaluated arithmetic over numbers, polynomials and fractions.
//!
//! Expressions are built with the ordinary operators and reduced to a single
//! [`Fraction`] by [`simplify`]. Nothing is divided numerically until
//! [`Fraction::limit`] is taken, so zero factors that appear in both the
//! numerator and the denominator cancel exactly.

use std::ops::{Add, Div, Mul, Sub};

use crate::fraction::Fraction;
use crate::polynomial::Polynomial;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Poly(Polynomial),
    Fraction(Fraction),
    Sum(Box<Expr>, Box<Expr>),
    Difference(Box<Expr>, Box<Expr>),
    Product(Box<Expr>, Box<Expr>),
    Quotient(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn simplify(&self) -> Fraction {
        simplify(self)
    }
}

/// Reduce an expression tree to one numerator/denominator pair.
pub fn simplify(expr: &Expr) -> Fraction {
    match expr {
        Expr::Number(n) => Fraction::from(*n),
        Expr::Poly(p) => Fraction::from(p.clone()),
        Expr::Fraction(f) => Fraction::new(f.numerator().clone(), f.denominator().clone()),
        Expr::Sum(a, b) => &simplify(a) + &simplify(b),
        Expr::Difference(a, b) => &simplify(a) - &simplify(b),
        Expr::Product(a, b) => &simplify(a) * &simplify(b),
        Expr::Quotient(a, b) => &simplify(a) / &simplify(b),
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Number(n)
    }
}

impl From<Polynomial> for Expr {
    fn from(p: Polynomial) -> Self {
        Expr::Poly(p)
    }
}

impl From<Fraction> for Expr {
    fn from(f: Fraction) -> Self {
        Expr::Fraction(f)
    }
}

impl<R: Into<Expr>> Add<R> for Expr {
    type Output = Expr;

    fn add(self, rhs: R) -> Expr {
        Expr::Sum(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Sub<R> for Expr {
    type Output = Expr;

    fn sub(self, rhs: R) -> Expr {
        Expr::Difference(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Mul<R> for Expr {
    type Output = Expr;

    fn mul(self, rhs: R) -> Expr {
        Expr::Product(Box::new(self), Box::new(rhs.into()))
    }
}

impl<R: Into<Expr>> Div<R> for Expr {
    type Output = Expr;

    fn div(self, rhs: R) -> Expr {
        Expr::Quotient(Box::new(self), Box::new(rhs.into()))
    }
}
