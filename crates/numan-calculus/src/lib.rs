//! numan calculus: numerical integration and differentiation, polynomial
//! interpolation, and trigonometric interpolation by FFT.

pub mod differentiation;
pub mod fourier;
pub mod interpolation;
pub mod quadrature;

pub use differentiation::{
    richardson_extrapolation, three_point_centered_difference,
    three_point_centered_difference_for_second_derivative, two_point_forward_difference,
};
pub use fourier::{dft_interpolation, TrigonometricInterpolant};
pub use interpolation::{chebyshev_base_points, newton_divided_difference, LagrangePolynomial};
pub use quadrature::{
    adaptive_quadrature, composite_integration, composite_midpoint_rule, composite_simpson_rule,
    composite_trapezoid_rule, midpoint_rule, romberg_integration, simpson_rule, three_point_rule,
    trapezoid_rule,
};
