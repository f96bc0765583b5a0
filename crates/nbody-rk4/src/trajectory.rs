//! Time series of system states produced by the simulation driver
//!
//! A [`Trajectory`] is indexable as `trajectory[step][row][axis]`, where rows
//! `0..N` are body positions and rows `N..2N` are body velocities, both in
//! body order.

use std::ops::Index;

use nalgebra::Vector3;
use serde::Serialize;

use crate::body::Body;
use crate::state::{self, StateVector, DIM};

/// One sample of the system state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    time: f64,
    state: StateVector,
}

impl Frame {
    pub(crate) fn new(time: f64, state: StateVector) -> Self {
        Self { time, state }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Flat block-layout state vector
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn body_count(&self) -> usize {
        self.state.len() / (2 * DIM)
    }

    /// Position of body `body`
    ///
    /// # Panics
    ///
    /// If `body` is out of range.
    pub fn position(&self, body: usize) -> Vector3<f64> {
        assert!(body < self.body_count(), "body index {body} out of range");
        state::position(&self.state, body)
    }

    /// Velocity of body `body`
    ///
    /// # Panics
    ///
    /// If `body` is out of range.
    pub fn velocity(&self, body: usize) -> Vector3<f64> {
        assert!(body < self.body_count(), "body index {body} out of range");
        state::velocity(&self.state, self.body_count(), body)
    }

    /// True if every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.state.iter().all(|v| v.is_finite())
    }
}

impl Index<usize> for Frame {
    type Output = [f64];

    /// Row `row` of the `2N × 3` view: positions first, then velocities
    fn index(&self, row: usize) -> &[f64] {
        &self.state.as_slice()[DIM * row..DIM * (row + 1)]
    }
}

/// Ordered frames of one run plus the body metadata needed to read them
///
/// Frame 0 is always the initial condition. Masses and names never change
/// during a run, so they are stored once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    names: Vec<String>,
    masses: Vec<f64>,
    frames: Vec<Frame>,
}

impl Trajectory {
    pub(crate) fn with_capacity(bodies: &[Body], capacity: usize) -> Self {
        Self {
            names: bodies.iter().map(|b| b.name.clone()).collect(),
            masses: bodies.iter().map(Body::mass).collect(),
            frames: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, time: f64, state: StateVector) {
        self.frames.push(Frame::new(time, state));
    }

    /// Number of frames, including the initial one
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn times(&self) -> Vec<f64> {
        self.frames.iter().map(Frame::time).collect()
    }

    pub fn initial_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn final_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn position(&self, step: usize, body: usize) -> Vector3<f64> {
        self.frames[step].position(body)
    }

    pub fn velocity(&self, step: usize, body: usize) -> Vector3<f64> {
        self.frames[step].velocity(body)
    }

    /// Position history of one body, e.g. for plotting its orbit
    pub fn body_positions(&self, body: usize) -> Vec<Vector3<f64>> {
        self.frames.iter().map(|f| f.position(body)).collect()
    }

    pub fn body_velocities(&self, body: usize) -> Vec<Vector3<f64>> {
        self.frames.iter().map(|f| f.velocity(body)).collect()
    }

    /// Rebuilds the body collection as it was at `step`
    ///
    /// Returns `None` if `step` is out of range.
    pub fn bodies_at(&self, step: usize) -> Option<Vec<Body>> {
        let frame = self.frames.get(step)?;
        let bodies = self
            .names
            .iter()
            .zip(&self.masses)
            .enumerate()
            .map(|(i, (name, &mass))| {
                let mut body = Body::new(name.clone(), mass, [0.0; DIM], [0.0; DIM]);
                body.update_position(frame.position(i));
                body.update_velocity(frame.velocity(i));
                body
            })
            .collect();
        Some(bodies)
    }

    /// Bodies as they are in the last frame
    pub fn final_bodies(&self) -> Option<Vec<Body>> {
        self.bodies_at(self.frames.len().checked_sub(1)?)
    }
}

impl Index<usize> for Trajectory {
    type Output = Frame;

    fn index(&self, step: usize) -> &Frame {
        &self.frames[step]
    }
}
