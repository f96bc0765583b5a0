//! Scenario files
//!
//! A scenario describes one run: the unit system, the step parameters and
//! the initial bodies. It is a `serde`-deserializable YAML document:
//!
//! ```yaml
//! units:
//!   kind: alpha_centauri     # or `physical` / `reference`
//!
//! parameters:
//!   num_steps: 20000
//!   tau: 0.01
//!
//! bodies:
//!   - name: alpha cen A
//!     mass: 1.1
//!     position: [-0.5, 0.0, 0.0]
//!     velocity: [0.01, 0.01, 0.0]
//! ```
//!
//! `physical` takes an optional `g` (SI value by default); `reference`
//! takes an optional `g` and a `scale` with `mass`, `length`, `velocity` and
//! `time` in SI units. Masses, positions and velocities are given in the
//! units of the chosen system.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::body::{self, Body};
use crate::constants::{Constants, ReferenceScale, G_SI};
use crate::error::{NBodyError, Result};
use crate::simulation::Simulation;
use crate::trajectory::Trajectory;

fn default_g() -> f64 {
    G_SI
}

/// Unit system of a scenario
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitsConfig {
    /// Integrate directly in physical units
    Physical {
        #[serde(default = "default_g")]
        g: f64,
    },
    /// Integrate in units scaled by a custom reference scale
    Reference {
        #[serde(default = "default_g")]
        g: f64,
        scale: ReferenceScale,
    },
    /// Integrate in the built-in Alpha Centauri reference units
    #[default]
    AlphaCentauri,
}

impl UnitsConfig {
    pub fn constants(&self) -> Result<Constants> {
        match self {
            UnitsConfig::Physical { g } => Constants::physical(*g),
            UnitsConfig::Reference { g, scale } => Constants::from_reference(*g, *scale),
            UnitsConfig::AlphaCentauri => Ok(Constants::alpha_centauri()),
        }
    }
}

/// Step parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub num_steps: usize,
    pub tau: f64,
}

/// Initial state of one body
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl From<&BodyConfig> for Body {
    fn from(cfg: &BodyConfig) -> Self {
        Body::new(cfg.name.clone(), cfg.mass, cfg.velocity, cfg.position)
    }
}

/// Top-level scenario document
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub units: UnitsConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validates the document and turns it into a runnable scenario
    pub fn build(&self) -> Result<Scenario> {
        let constants = self.units.constants()?;
        let tau = self.parameters.tau;
        if !(tau.is_finite() && tau > 0.0) {
            return Err(NBodyError::InvalidStepSize(tau));
        }

        let bodies: Vec<Body> = self.bodies.iter().map(Body::from).collect();
        body::validate_bodies(&bodies)?;

        Ok(Scenario {
            constants,
            bodies,
            num_steps: self.parameters.num_steps,
            tau,
        })
    }
}

/// A validated, ready-to-run scenario
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub constants: Constants,
    pub bodies: Vec<Body>,
    pub num_steps: usize,
    pub tau: f64,
}

impl Scenario {
    pub fn run(&self) -> Result<Trajectory> {
        Simulation::new(self.constants).run(&self.bodies, self.num_steps, self.tau)
    }
}
