use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{NBodyError, Result};

/// A massive point particle
///
/// Units follow the [`Constants`](crate::constants::Constants) the body is
/// simulated with: reference-scale units for a non-dimensional run, SI (or
/// whatever G was given in) for a physical one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    mass: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl Body {
    /// Creates a body from its initial conditions
    ///
    /// Argument order is name, mass, initial velocity, initial position.
    /// Mass is not checked here; the simulation driver rejects non-positive
    /// masses before stepping.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody_rk4::body::Body;
    ///
    /// let body = Body::new("alpha cen A", 1.1, [0.01, 0.01, 0.0], [-0.5, 0.0, 0.0]);
    /// assert_eq!(body.mass(), 1.1);
    /// assert_eq!(body.position.x, -0.5);
    /// ```
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        velocity: [f64; 3],
        position: [f64; 3],
    ) -> Self {
        Self {
            name: name.into(),
            mass,
            position: Vector3::from(position),
            velocity: Vector3::from(velocity),
        }
    }

    /// Mass is fixed for the lifetime of the body
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn update_position(&mut self, position: Vector3<f64>) {
        self.position = position;
    }

    pub fn update_velocity(&mut self, velocity: Vector3<f64>) {
        self.velocity = velocity;
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    /// Kinetic energy `½·m·|v|²` in model units (not scaled by K2)
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Angular momentum `r × (m·v)` about the origin
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.momentum())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.mass.is_finite() && self.mass > 0.0 {
            Ok(())
        } else {
            Err(NBodyError::NonPositiveMass {
                name: self.name.clone(),
                mass: self.mass,
            })
        }
    }
}

/// Checks every body before a run; an empty or single-body system is allowed
pub fn validate_bodies(bodies: &[Body]) -> Result<()> {
    bodies.iter().try_for_each(Body::validate)
}

/// Mass list parallel to `bodies`, in the same order
pub fn masses(bodies: &[Body]) -> Vec<f64> {
    bodies.iter().map(Body::mass).collect()
}
