//! Fixed-step RK4 integration of the gravitational N-body problem
//!
//! Bodies are packed into a flat block-layout state vector, advanced with
//! the classical fourth-order Runge–Kutta scheme under direct-summation
//! Newtonian gravity, and recorded as a [`Trajectory`]. Integration can run
//! in physical units or in non-dimensional reference units (see
//! [`constants`]).

pub mod body;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod state;
pub mod trajectory;

#[cfg(test)]
mod trajectory_test;

pub use body::Body;
pub use constants::{Constants, ReferenceScale};
pub use error::{NBodyError, Result};
pub use integrator::{Integrator, Rk4, VectorField};
pub use simulation::{evolve_one_step, run_simulation, Simulation};
pub use trajectory::{Frame, Trajectory};
