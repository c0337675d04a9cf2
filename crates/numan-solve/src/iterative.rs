//! Generic fixed-point drivers.
//!
//! A driver feeds its most recent guesses to an update function until the
//! new value is within `config.tolerance` of the last guess, or the step
//! budget runs out. With the default tolerance of `0.0` that means the update
//! reproduced its input exactly.

use std::convert::Infallible;

use numan_core::config::IterationConfig;
use numan_math::Distance;

/// Iterate `f` over a sliding window of the last `N` guesses.
///
/// Returns the converged value, or the latest guess once
/// `config.max_steps` updates have been made.
///
/// # Panics
/// If `N == 0`.
pub fn n_guess_iteration<T, const N: usize>(
    mut f: impl FnMut(&[T; N]) -> T,
    guesses: [T; N],
    config: IterationConfig,
) -> T
where
    T: Clone + Distance,
{
    match try_n_guess_iteration::<T, Infallible, N>(|g| Ok(f(g)), guesses, config) {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

/// [`n_guess_iteration`] with a fallible update; the first error stops the
/// iteration.
pub fn try_n_guess_iteration<T, E, const N: usize>(
    mut f: impl FnMut(&[T; N]) -> Result<T, E>,
    mut guesses: [T; N],
    config: IterationConfig,
) -> Result<T, E>
where
    T: Clone + Distance,
{
    for _ in 0..config.max_steps {
        let next = f(&guesses)?;
        if next.distance(&guesses[N - 1]) <= config.tolerance {
            return Ok(next);
        }
        guesses.rotate_left(1);
        guesses[N - 1] = next;
    }
    log::debug!(
        "iteration did not settle within {} steps (tolerance {})",
        config.max_steps,
        config.tolerance
    );
    Ok(guesses[N - 1].clone())
}

pub fn fixed_point_iteration<T>(mut f: impl FnMut(&T) -> T, x: T, config: IterationConfig) -> T
where
    T: Clone + Distance,
{
    n_guess_iteration(|[x]: &[T; 1]| f(x), [x], config)
}

pub fn try_fixed_point_iteration<T, E>(
    mut f: impl FnMut(&T) -> Result<T, E>,
    x: T,
    config: IterationConfig,
) -> Result<T, E>
where
    T: Clone + Distance,
{
    try_n_guess_iteration(|[x]: &[T; 1]| f(x), [x], config)
}
