//! Conserved-quantity diagnostics for a body collection
//!
//! All functions are read-only and can be applied to any snapshot,
//! including frames rebuilt from a [`Trajectory`](crate::trajectory::Trajectory).
//!
//! Energies are expressed in the units of the run. The potential uses the
//! acceleration coupling `K1` (equal to G in physical units), and the
//! conserved total is `K2·KE + PE`, which reduces to `KE + PE` when `K2 = 1`.

use nalgebra::Vector3;

use crate::body::Body;
use crate::constants::Constants;
use crate::forces::separation;

/// Total potential energy `Σ_{i<j} -K1·m_i·m_j / |r_i - r_j|`
///
/// # Examples
///
/// ```
/// use nbody_rk4::body::Body;
/// use nbody_rk4::constants::Constants;
/// use nbody_rk4::diagnostics::total_potential_energy;
///
/// let bodies = vec![
///     Body::new("a", 2.0, [0.0; 3], [0.0, 0.0, 0.0]),
///     Body::new("b", 3.0, [0.0; 3], [2.0, 0.0, 0.0]),
/// ];
/// let constants = Constants::physical(1.0).unwrap();
///
/// assert_eq!(total_potential_energy(&bodies, &constants), -3.0);
/// ```
pub fn total_potential_energy(bodies: &[Body], constants: &Constants) -> f64 {
    let k1 = constants.k1();
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..].iter().map(move |b| {
                let (_, r) = separation(&a.position, &b.position);
                -k1 * a.mass() * b.mass() / r
            })
        })
        .sum()
}

/// Total kinetic energy `Σ ½·m_i·|v_i|²`
pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Total energy conserved by the equations of motion
pub fn total_energy(bodies: &[Body], constants: &Constants) -> f64 {
    constants.k2() * total_kinetic_energy(bodies) + total_potential_energy(bodies, constants)
}

/// `|(current - initial) / initial|`
pub fn relative_energy_error(initial: f64, current: f64) -> f64 {
    ((current - initial) / initial).abs()
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::mass).sum()
}

/// Mass-weighted mean position `Σ m_i·r_i / Σ m_i`
///
/// Zero for an empty collection.
pub fn centre_of_mass(bodies: &[Body]) -> Vector3<f64> {
    weighted_mean(bodies, |b| b.position)
}

/// Mass-weighted mean velocity `Σ m_i·v_i / Σ m_i`
///
/// Zero for an empty collection.
pub fn velocity_of_centre_of_mass(bodies: &[Body]) -> Vector3<f64> {
    weighted_mean(bodies, |b| b.velocity)
}

/// Total linear momentum
///
/// This should stay at its initial value for an isolated system
/// (useful for checking numerical drift)
pub fn total_momentum(bodies: &[Body]) -> Vector3<f64> {
    bodies
        .iter()
        .map(Body::momentum)
        .fold(Vector3::zeros(), |acc, p| acc + p)
}

/// Total angular momentum about the origin
pub fn total_angular_momentum(bodies: &[Body]) -> Vector3<f64> {
    bodies
        .iter()
        .map(Body::angular_momentum)
        .fold(Vector3::zeros(), |acc, l| acc + l)
}

fn weighted_mean(bodies: &[Body], value: impl Fn(&Body) -> Vector3<f64>) -> Vector3<f64> {
    if bodies.is_empty() {
        return Vector3::zeros();
    }
    let weighted = bodies
        .iter()
        .map(|b| value(b) * b.mass())
        .fold(Vector3::zeros(), |acc, v| acc + v);
    weighted / total_mass(bodies)
}
