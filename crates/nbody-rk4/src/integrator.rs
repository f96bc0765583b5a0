//! Fixed-step time integration of first-order ODE systems
//!
//! The integrators here know nothing about bodies. They advance any flat
//! state vector `y` under a [`VectorField`] `f(t, y)`, so the same stepper
//! serves the whole gravitating system as well as small sub-problems such as
//! a single body's velocity or an analytic test equation.

use nalgebra::DVector;

/// Right-hand side `dy/dt = f(t, y)` of an ODE system
///
/// The returned vector must have the same length as `y`.
///
/// Any closure `Fn(f64, &DVector<f64>) -> DVector<f64>` is a vector field:
///
/// ```
/// use nalgebra::DVector;
/// use nbody_rk4::integrator::VectorField;
///
/// let decay = |_t: f64, y: &DVector<f64>| -y;
/// let dy = decay.derivative(0.0, &DVector::from_vec(vec![2.0]));
/// assert_eq!(dy[0], -2.0);
/// ```
pub trait VectorField: Send + Sync {
    fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64>;
}

impl<F> VectorField for F
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64> + Send + Sync,
{
    fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        self(t, y)
    }
}

/// A fixed-step integrator
pub trait Integrator: Send + Sync {
    /// Advance `y` from time `t` to `t + tau`
    ///
    /// # Arguments
    ///
    /// * `field` - Vector field to integrate
    /// * `tau` - Step size
    /// * `y` - Current state
    /// * `t` - Current time (only matters for time-dependent fields)
    fn step(&self, field: &dyn VectorField, tau: f64, y: &DVector<f64>, t: f64) -> DVector<f64>;

    /// Advance `y` by `n_steps` steps of size `tau`, starting at `t0`
    ///
    /// Returns the final state. Step `k` is evaluated at `t0 + k·tau`.
    fn integrate(
        &self,
        field: &dyn VectorField,
        tau: f64,
        y: &DVector<f64>,
        t0: f64,
        n_steps: usize,
    ) -> DVector<f64> {
        (0..n_steps).fold(y.clone(), |state, k| {
            self.step(field, tau, &state, t0 + k as f64 * tau)
        })
    }
}

/// Classical fourth-order Runge–Kutta
///
/// ```text
/// k1 = f(t,       y)
/// k2 = f(t + τ/2, y + τ/2·k1)
/// k3 = f(t + τ/2, y + τ/2·k2)
/// k4 = f(t + τ,   y + τ·k3)
/// y' = y + (τ/6)·(k1 + 2·k2 + 2·k3 + k4)
/// ```
///
/// Four field evaluations per step, local error O(τ⁵), global error O(τ⁴).
/// No error estimation and no step-size control.
///
/// # Examples
///
/// ```
/// use nalgebra::DVector;
/// use nbody_rk4::integrator::{Integrator, Rk4};
///
/// // dy/dt = y, y(0) = 1  =>  y(1) = e
/// let growth = |_t: f64, y: &DVector<f64>| y.clone();
/// let y1 = Rk4.integrate(&growth, 0.01, &DVector::from_vec(vec![1.0]), 0.0, 100);
///
/// assert!((y1[0] - std::f64::consts::E).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step(&self, field: &dyn VectorField, tau: f64, y: &DVector<f64>, t: f64) -> DVector<f64> {
        let half = tau / 2.0;

        let k1 = field.derivative(t, y);
        let k2 = field.derivative(t + half, &(y + &k1 * half));
        let k3 = field.derivative(t + half, &(y + &k2 * half));
        let k4 = field.derivative(t + tau, &(y + &k3 * tau));

        y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (tau / 6.0)
    }
}

/// Forward Euler (1st order, for testing/comparison only)
///
/// Exists to give the convergence tests a low-order baseline.
/// Use [`Rk4`] for real runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl Integrator for Euler {
    fn step(&self, field: &dyn VectorField, tau: f64, y: &DVector<f64>, t: f64) -> DVector<f64> {
        y + field.derivative(t, y) * tau
    }
}
