use approx::assert_relative_eq;
use nalgebra::{DVector, Vector3};

use crate::body::Body;
use crate::constants::Constants;
use crate::error::NBodyError;
use crate::forces::gravity::{acceleration_on, accelerations, separation, NewtonianGravity};
use crate::integrator::VectorField;
use crate::state::pack;

fn unit_constants() -> Constants {
    Constants::physical(1.0).unwrap()
}

fn pair(distance: f64, m1: f64, m2: f64) -> Vec<Body> {
    vec![
        Body::new("a", m1, [0.0, 0.0, 0.0], [-distance / 2.0, 0.0, 0.0]),
        Body::new("b", m2, [0.0, 0.0, 0.0], [distance / 2.0, 0.0, 0.0]),
    ]
}

#[test]
fn test_separation() {
    let (dr, r) = separation(&Vector3::new(1.0, 1.0, 1.0), &Vector3::new(4.0, 5.0, 1.0));
    assert_eq!(dr, Vector3::new(3.0, 4.0, 0.0));
    assert_eq!(r, 5.0);
}

#[test]
fn test_acceleration_points_toward_other_body() {
    let positions = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0)];
    let accel = acceleration_on(0, &positions, &[1.0, 3.0], 1.0);

    // a = G m / r² = 3 / 4 along +y
    assert!(accel.x.abs() < 1e-15);
    assert_relative_eq!(accel.y, 0.75);
    assert!(accel.z.abs() < 1e-15);
}

#[test]
fn test_acceleration_scales_with_k1() {
    let positions = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
    let weak = acceleration_on(0, &positions, &[1.0, 1.0], 1.0);
    let strong = acceleration_on(0, &positions, &[1.0, 1.0], 2.5);

    assert_relative_eq!(strong.x, 2.5 * weak.x);
}

#[test]
fn test_newton_third_law() {
    let positions = [
        Vector3::new(-0.5, 0.0, 0.0),
        Vector3::new(0.5, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.3),
    ];
    let masses = [1.1, 0.907, 1.0];
    let accels = accelerations(&positions, &masses, 0.2);

    let net = accels
        .iter()
        .zip(masses.iter())
        .fold(Vector3::zeros(), |acc, (a, m)| acc + a * *m);

    assert!(net.magnitude() < 1e-14, "Net force not zero: {net:?}");
}

#[test]
fn test_single_body_feels_nothing() {
    let accels = accelerations(&[Vector3::new(1.0, 2.0, 3.0)], &[5.0], 1.0);
    assert_eq!(accels, vec![Vector3::zeros()]);
}

#[test]
fn test_derivative_layout() {
    let mut bodies = pair(2.0, 1.0, 1.0);
    bodies[0].velocity = Vector3::new(0.0, 0.5, 0.0);
    bodies[1].velocity = Vector3::new(0.0, -0.5, 0.1);

    let constants = Constants::alpha_centauri();
    let gravity = NewtonianGravity::for_bodies(&constants, &bodies).unwrap();
    let dydt = gravity.derivative(0.0, &pack(&bodies));

    assert_eq!(dydt.len(), 12);
    // Position block: K2 · v
    assert_relative_eq!(dydt[1], 0.5 * constants.k2());
    assert_relative_eq!(dydt[4], -0.5 * constants.k2());
    assert_relative_eq!(dydt[5], 0.1 * constants.k2());
    // Velocity block: K1 · m / d² toward the partner
    assert_relative_eq!(dydt[6], constants.k1() / 4.0);
    assert_relative_eq!(dydt[9], -constants.k1() / 4.0);
}

#[test]
fn test_derivative_ignores_time() {
    let bodies = pair(1.0, 1.0, 2.0);
    let gravity = NewtonianGravity::for_bodies(&unit_constants(), &bodies).unwrap();
    let y = pack(&bodies);

    assert_eq!(gravity.derivative(0.0, &y), gravity.derivative(123.0, &y));
}

#[test]
fn test_coincident_bodies_give_non_finite_acceleration() {
    let bodies = vec![
        Body::new("a", 1.0, [0.0; 3], [0.3, 0.3, 0.3]),
        Body::new("b", 1.0, [0.0; 3], [0.3, 0.3, 0.3]),
    ];
    let gravity = NewtonianGravity::for_bodies(&unit_constants(), &bodies).unwrap();

    let dydt = gravity.derivative(0.0, &pack(&bodies));

    assert!(dydt.rows(6, 6).iter().any(|v| !v.is_finite()));
}

#[test]
fn test_rejects_non_positive_mass() {
    let result = NewtonianGravity::new(&unit_constants(), vec![1.0, -2.0]);

    match result {
        Err(NBodyError::NonPositiveMass { name, mass }) => {
            assert_eq!(name, "#1");
            assert_eq!(mass, -2.0);
        }
        other => panic!("expected NonPositiveMass, got {other:?}"),
    }
}

#[test]
fn test_check_state_detects_mass_count_mismatch() {
    let gravity = NewtonianGravity::new(&unit_constants(), vec![1.0, 1.0, 1.0]).unwrap();

    assert!(matches!(
        gravity.check_state(&DVector::zeros(12)),
        Err(NBodyError::MassCountMismatch { bodies: 2, masses: 3 })
    ));
    assert!(matches!(
        gravity.check_state(&DVector::zeros(13)),
        Err(NBodyError::StateLengthMismatch { expected: 18, actual: 13 })
    ));
    assert!(gravity.check_state(&DVector::zeros(18)).is_ok());
}

#[test]
fn test_accelerations_checks_position_count() {
    let gravity = NewtonianGravity::new(&unit_constants(), vec![1.0, 1.0]).unwrap();

    let result = gravity.accelerations(&[Vector3::zeros()]);
    assert!(matches!(result, Err(NBodyError::MassCountMismatch { .. })));

    let accels = gravity
        .accelerations(&[Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0)])
        .unwrap();
    assert_relative_eq!(accels[0].x, 1.0);
    assert_relative_eq!(accels[1].x, -1.0);
}
