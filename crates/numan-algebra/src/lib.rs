//! Rational-polynomial algebra used to evaluate splines without dividing by
//! zero at repeated knots.

pub mod expr;
pub mod fraction;
pub mod newton;
pub mod polynomial;

pub use expr::{simplify, Expr};
pub use fraction::{limit, Fraction};
pub use newton::NewtonPolynomial;
pub use polynomial::{float_key, Polynomial};
