//! Flat state-vector codec
//!
//! A system of N bodies is packed into one `DVector<f64>` of length `6N`
//! using the block layout:
//!
//! ```text
//! [ r_0 | r_1 | … | r_{N-1} | v_0 | v_1 | … | v_{N-1} ]
//! ```
//!
//! where each entry is three consecutive components (x, y, z). Index `i` in
//! the position block and index `i` in the velocity block always belong to
//! the same body; masses never enter the vector and travel as a separate
//! list in the same order.

use nalgebra::{DVector, Vector3};

use crate::body::Body;
use crate::error::{NBodyError, Result};

/// Components per position or velocity
pub const DIM: usize = 3;

/// Flat ODE state of a whole system
pub type StateVector = DVector<f64>;

/// Length of the state vector for `body_count` bodies
pub fn state_len(body_count: usize) -> usize {
    2 * DIM * body_count
}

/// Packs bodies into a flat state vector, preserving their order
///
/// # Examples
///
/// ```
/// use nbody_rk4::body::Body;
/// use nbody_rk4::state::pack;
///
/// let bodies = vec![
///     Body::new("a", 1.0, [4.0, 5.0, 6.0], [1.0, 2.0, 3.0]),
///     Body::new("b", 1.0, [10.0, 11.0, 12.0], [7.0, 8.0, 9.0]),
/// ];
/// let y = pack(&bodies);
///
/// assert_eq!(y.len(), 12);
/// assert_eq!(y.as_slice()[..6], [1.0, 2.0, 3.0, 7.0, 8.0, 9.0]);
/// assert_eq!(y.as_slice()[6..], [4.0, 5.0, 6.0, 10.0, 11.0, 12.0]);
/// ```
pub fn pack(bodies: &[Body]) -> StateVector {
    let positions = bodies.iter().flat_map(|b| b.position.iter().copied());
    let velocities = bodies.iter().flat_map(|b| b.velocity.iter().copied());
    DVector::from_iterator(state_len(bodies.len()), positions.chain(velocities))
}

/// Splits a flat state vector back into per-body positions and velocities
///
/// Exact inverse of [`pack`]: values are copied, never recomputed.
pub fn unpack(state: &StateVector, body_count: usize) -> Result<(Vec<Vector3<f64>>, Vec<Vector3<f64>>)> {
    check_len(state, body_count)?;
    Ok((positions(state, body_count), velocities(state, body_count)))
}

/// Fails if `state` cannot hold exactly `body_count` bodies
pub fn check_len(state: &StateVector, body_count: usize) -> Result<()> {
    let expected = state_len(body_count);
    if state.len() == expected {
        Ok(())
    } else {
        Err(NBodyError::StateLengthMismatch {
            expected,
            actual: state.len(),
        })
    }
}

/// Position of body `i`; the caller guarantees the layout
pub(crate) fn position(state: &StateVector, i: usize) -> Vector3<f64> {
    Vector3::from_column_slice(&state.as_slice()[DIM * i..DIM * (i + 1)])
}

/// Velocity of body `i` for a system of `body_count` bodies
pub(crate) fn velocity(state: &StateVector, body_count: usize, i: usize) -> Vector3<f64> {
    let start = DIM * (body_count + i);
    Vector3::from_column_slice(&state.as_slice()[start..start + DIM])
}

pub(crate) fn positions(state: &StateVector, body_count: usize) -> Vec<Vector3<f64>> {
    (0..body_count).map(|i| position(state, i)).collect()
}

pub(crate) fn velocities(state: &StateVector, body_count: usize) -> Vec<Vector3<f64>> {
    (0..body_count)
        .map(|i| velocity(state, body_count, i))
        .collect()
}

/// Writes the positions and velocities held in `state` back into `bodies`
pub fn write_back(state: &StateVector, bodies: &mut [Body]) -> Result<()> {
    let (positions, velocities) = unpack(state, bodies.len())?;
    bodies
        .iter_mut()
        .zip(positions.into_iter().zip(velocities))
        .for_each(|(body, (r, v))| {
            body.update_position(r);
            body.update_velocity(v);
        });
    Ok(())
}
