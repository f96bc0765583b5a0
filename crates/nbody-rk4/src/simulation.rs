//! Simulation driver
//!
//! Two ways to advance a system:
//!
//! - **Trajectory mode** ([`Simulation::run`], [`Simulation::run_on_time_grid`]):
//!   the input bodies are left untouched and every frame is recorded.
//! - **In-place mode** ([`Simulation::evolve_one_step`], [`Simulation::evolve`]):
//!   the final state is written back into the bodies and nothing is recorded.
//!
//! Every call validates its inputs before the first step and holds no state
//! afterwards, so repeated calls with the same inputs give bit-identical
//! results.

use log::{debug, warn};

use crate::body::Body;
use crate::constants::Constants;
use crate::error::{NBodyError, Result};
use crate::forces::NewtonianGravity;
use crate::integrator::{Integrator, Rk4};
use crate::state::{self, StateVector};
use crate::trajectory::Trajectory;

/// Fixed-step driver for a gravitating system
///
/// # Examples
///
/// ```
/// use nbody_rk4::body::Body;
/// use nbody_rk4::constants::Constants;
/// use nbody_rk4::simulation::Simulation;
///
/// let bodies = vec![
///     Body::new("a", 1.0, [0.0, -0.5, 0.0], [1.0, 0.0, 0.0]),
///     Body::new("b", 1.0, [0.0, 0.5, 0.0], [-1.0, 0.0, 0.0]),
/// ];
/// let simulation = Simulation::new(Constants::physical(1.0).unwrap());
/// let trajectory = simulation.run(&bodies, 100, 0.01).unwrap();
///
/// assert_eq!(trajectory.len(), 101);
/// assert_eq!(trajectory[0][0], [1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<I: Integrator = Rk4> {
    constants: Constants,
    integrator: I,
}

impl Simulation<Rk4> {
    /// Creates a driver using the classical RK4 stepper
    pub fn new(constants: Constants) -> Self {
        Self::with_integrator(constants, Rk4)
    }
}

impl<I: Integrator> Simulation<I> {
    pub fn with_integrator(constants: Constants, integrator: I) -> Self {
        Self {
            constants,
            integrator,
        }
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Integrates `num_steps` steps of size `tau` and records every frame
    ///
    /// The trajectory holds `num_steps + 1` frames at times `0, τ, …, n·τ`.
    pub fn run(&self, bodies: &[Body], num_steps: usize, tau: f64) -> Result<Trajectory> {
        validate_step(tau)?;
        let (field, mut y) = self.prepare(bodies)?;

        debug!(
            "run started: {} bodies, {} steps, tau = {}",
            bodies.len(),
            num_steps,
            tau
        );

        let mut trajectory = Trajectory::with_capacity(bodies, num_steps + 1);
        trajectory.push(0.0, y.clone());

        let mut watch = FiniteWatch::default();
        for step in 1..=num_steps {
            let t = (step - 1) as f64 * tau;
            y = self.integrator.step(&field, tau, &y, t);
            watch.check(&y, step);
            trajectory.push(step as f64 * tau, y.clone());
        }

        debug!("run finished after {} steps", num_steps);
        Ok(trajectory)
    }

    /// Integrates across an explicit time grid, one step per interval
    ///
    /// `times[0]` is the time of the initial condition. Each interval
    /// `times[k+1] - times[k]` is taken as a single fixed step, so the grid
    /// spacing is the step size.
    pub fn run_on_time_grid(&self, bodies: &[Body], times: &[f64]) -> Result<Trajectory> {
        validate_time_grid(times)?;
        let (field, mut y) = self.prepare(bodies)?;

        debug!(
            "grid run started: {} bodies, {} samples from t = {} to t = {}",
            bodies.len(),
            times.len(),
            times[0],
            times[times.len() - 1]
        );

        let mut trajectory = Trajectory::with_capacity(bodies, times.len());
        trajectory.push(times[0], y.clone());

        let mut watch = FiniteWatch::default();
        for (step, window) in times.windows(2).enumerate() {
            let (t, t_next) = (window[0], window[1]);
            y = self.integrator.step(&field, t_next - t, &y, t);
            watch.check(&y, step + 1);
            trajectory.push(t_next, y.clone());
        }

        Ok(trajectory)
    }

    /// Advances `bodies` in place by a single step of size `tau`
    pub fn evolve_one_step(&self, bodies: &mut [Body], tau: f64) -> Result<()> {
        self.evolve(bodies, tau, 1)
    }

    /// Advances `bodies` in place by `n_steps` steps of size `tau`
    ///
    /// Bodies are only written after the last step completes; on a
    /// validation error they are left untouched.
    pub fn evolve(&self, bodies: &mut [Body], tau: f64, n_steps: usize) -> Result<()> {
        validate_step(tau)?;
        let (field, y) = self.prepare(bodies)?;

        let y = self.integrator.integrate(&field, tau, &y, 0.0, n_steps);
        FiniteWatch::default().check(&y, n_steps);

        state::write_back(&y, bodies)
    }

    fn prepare(&self, bodies: &[Body]) -> Result<(NewtonianGravity, StateVector)> {
        let field = NewtonianGravity::for_bodies(&self.constants, bodies)?;
        let y = state::pack(bodies);
        field.check_state(&y)?;
        Ok((field, y))
    }
}

/// Runs `num_steps` RK4 steps of size `tau` and returns the trajectory
pub fn run_simulation(
    bodies: &[Body],
    num_steps: usize,
    tau: f64,
    constants: &Constants,
) -> Result<Trajectory> {
    Simulation::new(*constants).run(bodies, num_steps, tau)
}

/// Advances `bodies` in place by one RK4 step of size `tau`
pub fn evolve_one_step(bodies: &mut [Body], tau: f64, constants: &Constants) -> Result<()> {
    Simulation::new(*constants).evolve_one_step(bodies, tau)
}

fn validate_step(tau: f64) -> Result<()> {
    if tau.is_finite() && tau > 0.0 {
        Ok(())
    } else {
        Err(NBodyError::InvalidStepSize(tau))
    }
}

fn validate_time_grid(times: &[f64]) -> Result<()> {
    if times.is_empty() {
        return Err(NBodyError::InvalidTimeGrid("no time samples".into()));
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(NBodyError::InvalidTimeGrid(format!("non-finite time {t}")));
    }
    if let Some(w) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(NBodyError::InvalidTimeGrid(format!(
            "times must increase strictly, found {} then {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// Logs once when the state first stops being finite
#[derive(Default)]
struct FiniteWatch {
    reported: bool,
}

impl FiniteWatch {
    fn check(&mut self, y: &StateVector, step: usize) {
        if !self.reported && y.iter().any(|v| !v.is_finite()) {
            self.reported = true;
            warn!("state became non-finite at step {step} (coincident or colliding bodies?)");
        }
    }
}
