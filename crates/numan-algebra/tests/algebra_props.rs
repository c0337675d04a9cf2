use approx::assert_relative_eq;
use numan_algebra::{limit, simplify, Expr, Fraction, Polynomial};
use numan_core::NumanError;
use proptest::prelude::*;

fn coefficients() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10i32..10, 1..6).prop_map(|v| v.into_iter().map(f64::from).collect())
}

proptest! {
    #[test]
    fn canonical_form_ignores_trailing_zeros(c in coefficients(), zeros in 0usize..4) {
        let mut padded = c.clone();
        padded.extend(std::iter::repeat(0.0).take(zeros));
        prop_assert_eq!(Polynomial::new(padded), Polynomial::new(c));
    }

    #[test]
    fn addition_commutes(a in coefficients(), b in coefficients()) {
        let (p, q) = (Polynomial::new(a), Polynomial::new(b));
        prop_assert_eq!(&p + &q, &q + &p);
    }

    #[test]
    fn product_evaluates_pointwise(a in coefficients(), b in coefficients(), x in -2i32..3) {
        let (p, q) = (Polynomial::new(a), Polynomial::new(b));
        let x = f64::from(x);
        // integer data keeps every intermediate exact
        prop_assert_eq!((&p * &q).evaluate(x), p.evaluate(x) * q.evaluate(x));
    }

    #[test]
    fn shared_epsilon_factor_cancels(v in 1i32..20, k in 1i32..5) {
        // (v eps^k) / (eps^k) -> v
        let mut num = vec![0.0; k as usize];
        num.push(f64::from(v));
        let mut den = vec![0.0; k as usize];
        den.push(1.0);
        let f = Fraction::raw(Polynomial::new(num), Polynomial::new(den));
        prop_assert_eq!(f.limit().unwrap(), f64::from(v));
    }
}

#[test]
fn simplify_matches_plain_arithmetic_without_epsilon() {
    let e = (Expr::Number(3.0) + 4.0) * 2.0 / (Expr::Number(7.0) - 3.0);
    assert_relative_eq!(simplify(&e).limit().unwrap(), 3.5);
}

#[test]
fn indeterminate_limit_is_an_error() {
    let f = Fraction::raw(Polynomial::new(vec![2.0, 3.0, 4.0]), Polynomial::new(vec![0.0]));
    match limit(&f) {
        Err(NumanError::Indeterminate(msg)) => assert!(msg.contains("failed to take limit")),
        other => panic!("expected indeterminate error, got {:?}", other),
    }
}
