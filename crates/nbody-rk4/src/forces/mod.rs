//! Equations of motion for N gravitating point masses
//!
//! [`NewtonianGravity`] is the whole-system vector field handed to the
//! integrator. The free functions work on explicit position lists and are
//! shared with the energy diagnostics so both use the same distance.

pub mod gravity;

#[cfg(test)]
mod gravity_test;

pub use gravity::{acceleration_on, accelerations, separation, NewtonianGravity};
