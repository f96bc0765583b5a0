//! Direct N-body gravity (O(N²) implementation)

use nalgebra::{DVector, Vector3};

use crate::body::{self, Body};
use crate::constants::Constants;
use crate::error::{NBodyError, Result};
use crate::integrator::VectorField;
use crate::state::{self, StateVector, DIM};

/// Displacement from `from` to `to` and its length
pub fn separation(from: &Vector3<f64>, to: &Vector3<f64>) -> (Vector3<f64>, f64) {
    let dr = to - from;
    let r = dr.magnitude();
    (dr, r)
}

/// Acceleration on body `idx` from every other body
///
/// `a_i = K1 · Σ_{j≠i} m_j (r_j - r_i) / |r_j - r_i|³`
///
/// No softening: coincident bodies yield NaN/inf components.
pub fn acceleration_on(idx: usize, positions: &[Vector3<f64>], masses: &[f64], k1: f64) -> Vector3<f64> {
    let r_i = &positions[idx];
    positions
        .iter()
        .zip(masses)
        .enumerate()
        .filter(|(j, _)| *j != idx)
        .map(|(_, (r_j, &m_j))| {
            let (dr, r) = separation(r_i, r_j);
            dr * (k1 * m_j / (r * r * r))
        })
        .fold(Vector3::zeros(), |acc, a| acc + a)
}

/// Accelerations on all bodies, in input order
pub fn accelerations(positions: &[Vector3<f64>], masses: &[f64], k1: f64) -> Vec<Vector3<f64>> {
    (0..positions.len())
        .map(|i| acceleration_on(i, positions, masses, k1))
        .collect()
}

/// Whole-system gravitational vector field on the block-layout state
///
/// Holds the couplings and the mass list; the positional index of a mass
/// is the identity of the body it belongs to.
///
/// # Examples
///
/// ```
/// use nbody_rk4::body::Body;
/// use nbody_rk4::constants::Constants;
/// use nbody_rk4::forces::NewtonianGravity;
/// use nbody_rk4::integrator::VectorField;
/// use nbody_rk4::state::pack;
///
/// let bodies = vec![
///     Body::new("a", 1.0, [0.0, 0.0, 0.0], [-0.5, 0.0, 0.0]),
///     Body::new("b", 1.0, [0.0, 0.0, 0.0], [0.5, 0.0, 0.0]),
/// ];
/// let constants = Constants::physical(1.0).unwrap();
/// let gravity = NewtonianGravity::for_bodies(&constants, &bodies).unwrap();
///
/// let dydt = gravity.derivative(0.0, &pack(&bodies));
/// // Body a is pulled toward +x with G·m/d² = 1
/// assert_eq!(dydt[6], 1.0);
/// assert_eq!(dydt[9], -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    k1: f64,
    k2: f64,
    masses: Vec<f64>,
}

impl NewtonianGravity {
    /// Builds the field for an explicit mass list
    ///
    /// Fails if any mass is non-positive or not finite.
    pub fn new(constants: &Constants, masses: Vec<f64>) -> Result<Self> {
        if let Some((i, &mass)) = masses
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            return Err(NBodyError::NonPositiveMass {
                name: format!("#{i}"),
                mass,
            });
        }

        Ok(Self {
            k1: constants.k1(),
            k2: constants.k2(),
            masses,
        })
    }

    /// Builds the field for the masses of `bodies`, in order
    pub fn for_bodies(constants: &Constants, bodies: &[Body]) -> Result<Self> {
        body::validate_bodies(bodies)?;
        Self::new(constants, body::masses(bodies))
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    /// Fails unless `y` holds exactly one position and velocity per mass
    pub fn check_state(&self, y: &StateVector) -> Result<()> {
        let per_body = 2 * DIM;
        if y.len() % per_body == 0 && y.len() / per_body != self.masses.len() {
            return Err(NBodyError::MassCountMismatch {
                bodies: y.len() / per_body,
                masses: self.masses.len(),
            });
        }
        state::check_len(y, self.masses.len())
    }

    /// Accelerations for an explicit list of positions
    pub fn accelerations(&self, positions: &[Vector3<f64>]) -> Result<Vec<Vector3<f64>>> {
        if positions.len() != self.masses.len() {
            return Err(NBodyError::MassCountMismatch {
                bodies: positions.len(),
                masses: self.masses.len(),
            });
        }
        Ok(accelerations(positions, &self.masses, self.k1))
    }
}

impl VectorField for NewtonianGravity {
    /// `[K2·v_0 … K2·v_{N-1} | a_0 … a_{N-1}]` in the layout of `y`
    ///
    /// Gravity is autonomous, so `t` is ignored. `y` must already have been
    /// checked with [`NewtonianGravity::check_state`].
    fn derivative(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
        let n = self.masses.len();
        let block = DIM * n;
        debug_assert_eq!(y.len(), 2 * block, "state length does not match mass list");

        let mut dydt = DVector::zeros(y.len());
        dydt.rows_mut(0, block).copy_from(&(y.rows(block, block) * self.k2));

        let positions = state::positions(y, n);
        for (i, a) in accelerations(&positions, &self.masses, self.k1)
            .iter()
            .enumerate()
        {
            dydt.fixed_rows_mut::<DIM>(block + DIM * i).copy_from(a);
        }
        dydt
    }
}
