//! Cubic B-spline interpolation of planar points with natural end conditions.

use glam::DVec2;
use nalgebra::{DMatrix, DVector};
use numan_core::error::{NumanError, Result};

use super::curve::BSpline;
use super::knot::KnotVector;

const CUBIC: usize = 3;

/// Knot vector from normalized cumulative chord lengths, clamped with
/// `degree` extra zeros and ones.
pub fn chord_length_parameterization(points: &[DVec2], degree: usize) -> Result<Vec<f64>> {
    if points.len() < 2 {
        return Err(NumanError::InvalidInput(format!(
            "chord length parameterization needs at least 2 points, got {}",
            points.len()
        )));
    }
    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total == 0.0 || !total.is_finite() {
        return Err(NumanError::InvalidInput(format!(
            "points have degenerate total chord length {}",
            total
        )));
    }

    let mut knots = vec![0.0; degree + 1];
    let mut partial = 0.0;
    for w in points.windows(2) {
        partial += w[0].distance(w[1]);
        knots.push(partial / total);
    }
    knots.extend(std::iter::repeat(1.0).take(degree));
    Ok(knots)
}

/// Interpolate `points` with a cubic B-spline whose second derivative
/// vanishes at both ends.
///
/// With `n + 1` points the curve has `n + 3` control points. Row `0`, rows
/// `2..=n` and row `n + 2` pin the curve to the data at the chord-length
/// parameters; rows `1` and `n + 1` hold the end conditions.
pub fn interpolate_cubic(points: &[DVec2]) -> Result<BSpline> {
    let knots = chord_length_parameterization(points, CUBIC)?;
    let knot_vector = KnotVector::new(knots.clone(), CUBIC)?;
    let n = points.len() - 1;
    let size = n + 3;

    let mut a = DMatrix::<f64>::zeros(size, size);
    let mut bx = DVector::<f64>::zeros(size);
    let mut by = DVector::<f64>::zeros(size);

    for (i, point) in points.iter().enumerate() {
        let row = match i {
            0 => 0,
            i if i == n => n + 2,
            i => i + 1,
        };
        let t = knot_vector.get_knot_coefficients(i + CUBIC);
        for j in i..i + 3 {
            a[(row, j)] = knot_vector.evaluate_base_function(t, j, CUBIC)?;
        }
        bx[row] = point.x;
        by[row] = point.y;
    }

    for (row, first) in [(1, 0), (n + 1, n)] {
        let t = knot_vector.get_knot_coefficients(first + CUBIC);
        for j in first..first + 3 {
            a[(row, j)] = knot_vector.evaluate_base_function_derivative(t, j, CUBIC, 2)?;
        }
    }
    log::debug!("cubic interpolation system for {} points:{}", points.len(), a);

    let lu = a.lu();
    let solve = |b: &DVector<f64>| {
        lu.solve(b).ok_or_else(|| {
            NumanError::Singular("cubic B-spline interpolation system is singular".into())
        })
    };
    let xs = solve(&bx)?;
    let ys = solve(&by)?;

    let control_points: Vec<DVec2> = xs.iter().zip(ys.iter()).map(|(&x, &y)| DVec2::new(x, y)).collect();
    BSpline::new(control_points, CUBIC, knots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_lengths() {
        let pts = [DVec2::new(0.0, 0.0), DVec2::new(3.0, 4.0), DVec2::new(3.0, 9.0)];
        let knots = chord_length_parameterization(&pts, 2).unwrap();
        assert_eq!(knots, vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_degenerate_input() {
        let same = [DVec2::ONE, DVec2::ONE];
        assert!(matches!(
            chord_length_parameterization(&same, 3),
            Err(NumanError::InvalidInput(_))
        ));
        assert!(matches!(
            interpolate_cubic(&[DVec2::ZERO]),
            Err(NumanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_two_points_give_a_straight_segment() {
        let pts = [DVec2::new(0.0, 0.0), DVec2::new(2.0, 2.0)];
        let spline = interpolate_cubic(&pts).unwrap();
        let mid = spline.evaluate(0.5).unwrap().into_vec();
        assert!((mid[0] - 1.0).abs() < 1e-9);
        assert!((mid[1] - 1.0).abs() < 1e-9);
    }
}
