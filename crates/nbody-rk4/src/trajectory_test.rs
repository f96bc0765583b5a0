use nalgebra::{DVector, Vector3};

use crate::body::Body;
use crate::state::pack;
use crate::trajectory::{Frame, Trajectory};

fn make_bodies() -> Vec<Body> {
    vec![
        Body::new("a", 1.0, [4.0, 5.0, 6.0], [1.0, 2.0, 3.0]),
        Body::new("b", 2.0, [10.0, 11.0, 12.0], [7.0, 8.0, 9.0]),
    ]
}

fn make_trajectory() -> Trajectory {
    let bodies = make_bodies();
    let mut trajectory = Trajectory::with_capacity(&bodies, 3);
    let y0 = pack(&bodies);
    let y1 = y0.map(|v| v * 10.0);
    let y2 = y0.map(|v| v * 100.0);
    trajectory.push(0.0, y0);
    trajectory.push(0.5, y1);
    trajectory.push(1.0, y2);
    trajectory
}

#[test]
fn test_step_row_axis_indexing() {
    let trajectory = make_trajectory();

    // Rows 0..N are positions
    assert_eq!(trajectory[0][0], [1.0, 2.0, 3.0]);
    assert_eq!(trajectory[0][1][2], 9.0);
    // Rows N..2N are velocities
    assert_eq!(trajectory[0][2], [4.0, 5.0, 6.0]);
    assert_eq!(trajectory[1][3][0], 100.0);
    assert_eq!(trajectory[2][1][1], 800.0);
}

#[test]
fn test_metadata() {
    let trajectory = make_trajectory();

    assert_eq!(trajectory.len(), 3);
    assert!(!trajectory.is_empty());
    assert_eq!(trajectory.body_count(), 2);
    assert_eq!(trajectory.masses(), &[1.0, 2.0]);
    assert_eq!(trajectory.names(), &["a".to_string(), "b".to_string()]);
    assert_eq!(trajectory.times(), vec![0.0, 0.5, 1.0]);
    assert_eq!(trajectory.frames().len(), 3);
}

#[test]
fn test_position_and_velocity_accessors() {
    let trajectory = make_trajectory();

    assert_eq!(trajectory.position(1, 1), Vector3::new(70.0, 80.0, 90.0));
    assert_eq!(trajectory.velocity(2, 0), Vector3::new(400.0, 500.0, 600.0));
    assert_eq!(trajectory[1].time(), 0.5);
    assert_eq!(trajectory[1].body_count(), 2);
}

#[test]
fn test_body_positions_slice_one_body() {
    let trajectory = make_trajectory();

    let orbit = trajectory.body_positions(0);
    assert_eq!(
        orbit,
        vec![
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(100.0, 200.0, 300.0),
        ]
    );
    assert_eq!(trajectory.body_velocities(1)[0], Vector3::new(10.0, 11.0, 12.0));
}

#[test]
fn test_bodies_at_rebuilds_snapshot() {
    let trajectory = make_trajectory();

    assert_eq!(trajectory.bodies_at(0).unwrap(), make_bodies());

    let later = trajectory.bodies_at(2).unwrap();
    assert_eq!(later[1].name, "b");
    assert_eq!(later[1].mass(), 2.0);
    assert_eq!(later[1].position, Vector3::new(700.0, 800.0, 900.0));

    assert!(trajectory.bodies_at(3).is_none());
}

#[test]
fn test_initial_and_final_frames() {
    let trajectory = make_trajectory();

    assert_eq!(trajectory.initial_frame().unwrap().time(), 0.0);
    assert_eq!(trajectory.final_frame().unwrap().time(), 1.0);
    assert_eq!(
        trajectory.final_bodies().unwrap(),
        trajectory.bodies_at(2).unwrap()
    );
}

#[test]
fn test_empty_trajectory() {
    let trajectory = Trajectory::with_capacity(&make_bodies(), 0);

    assert!(trajectory.is_empty());
    assert!(trajectory.final_frame().is_none());
    assert!(trajectory.final_bodies().is_none());
}

#[test]
fn test_frame_is_finite() {
    let finite = Frame::new(0.0, DVector::from_vec(vec![0.0; 6]));
    let broken = Frame::new(0.0, DVector::from_vec(vec![0.0, f64::NAN, 0.0, 0.0, 0.0, 0.0]));

    assert!(finite.is_finite());
    assert!(!broken.is_finite());
}

#[test]
#[should_panic(expected = "out of range")]
fn test_position_out_of_range_panics() {
    make_trajectory()[0].position(2);
}
