pub mod eigen;
pub mod equation;
pub mod iterative;
pub mod krylov;
pub mod system;

pub use eigen::{
    inverse_power_iteration_method, power_iteration_method, rayleigh_quotient_iteration_method,
};
pub use equation::{
    bisection_method, brent_method, false_position_method,
    inverse_quadratic_interpolation_method, n_th_root, newton_method, secant_method, sqrt,
};
pub use iterative::{fixed_point_iteration, n_guess_iteration, try_fixed_point_iteration};
pub use krylov::{
    conjugate_gradient, jacobi_preconditioner, preconditioned_conjugate_gradient,
    steepest_descent, steepest_descent_general,
};
pub use system::{
    broyden_method_1, broyden_method_2, cholesky_factorization, gauss_seidel_method,
    gram_schmidt_orthogonalization, householder_qr, jacobi_method,
    successive_over_relaxation_method,
};
