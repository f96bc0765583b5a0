//! Physical constants and the non-dimensional coupling constants
//!
//! The equations of motion are written as
//!
//! ```text
//! dv_i/dt = K1 · Σ_j m_j (r_j - r_i) / |r_j - r_i|³
//! dr_i/dt = K2 · v_i
//! ```
//!
//! In physical units `K1 = G` and `K2 = 1`. After rescaling by a reference
//! mass, length, velocity and time the couplings become
//! `K1 = G·t_ref·m_ref / (r_ref²·v_ref)` and `K2 = v_ref·t_ref / r_ref`,
//! which keeps every quantity close to unity.

use serde::{Deserialize, Serialize};

use crate::error::{NBodyError, Result};

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻² (CODATA 2018)
pub const G_SI: f64 = 6.674_30e-11;

/// Mass of the Sun in kilograms, used as the reference mass
pub const SOLAR_MASS_KG: f64 = 1.989e30;

/// Mean separation of Alpha Centauri A and B in meters
pub const ALPHA_CEN_AB_SEPARATION_M: f64 = 5.326e12;

/// Earth's mean orbital speed in m/s
pub const EARTH_ORBITAL_SPEED_M_S: f64 = 30_000.0;

/// Orbital period of Alpha Centauri A and B in years
pub const ALPHA_CEN_AB_PERIOD_YEARS: f64 = 79.91;

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 3600.0;

/// Reference quantities used to non-dimensionalize a system (SI units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceScale {
    /// Reference mass in kg
    pub mass: f64,
    /// Reference length in m
    pub length: f64,
    /// Reference velocity in m/s
    pub velocity: f64,
    /// Reference time in s
    pub time: f64,
}

impl ReferenceScale {
    /// Scale suited to the Alpha Centauri triple system
    ///
    /// One solar mass, the A–B separation, Earth's orbital speed and about
    /// half of the A–B orbital period.
    pub fn alpha_centauri() -> Self {
        Self {
            mass: SOLAR_MASS_KG,
            length: ALPHA_CEN_AB_SEPARATION_M,
            velocity: EARTH_ORBITAL_SPEED_M_S,
            time: 0.51 * ALPHA_CEN_AB_PERIOD_YEARS * SECONDS_PER_YEAR,
        }
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("mass", self.mass),
            ("length", self.length),
            ("velocity", self.velocity),
            ("time", self.time),
        ];
        for (label, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(NBodyError::InvalidReferenceScale(format!(
                    "reference {label} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Immutable set of constants shared by the dynamics and the diagnostics
///
/// Built once before a run and never changed while it is in progress.
///
/// # Examples
///
/// ```
/// use nbody_rk4::constants::Constants;
///
/// let physical = Constants::physical(1.0).unwrap();
/// assert_eq!(physical.k1(), 1.0);
/// assert_eq!(physical.k2(), 1.0);
///
/// let scaled = Constants::alpha_centauri();
/// assert!(scaled.is_dimensionless());
/// assert!(scaled.k1() > 0.1 && scaled.k1() < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constants {
    g: f64,
    k1: f64,
    k2: f64,
    reference: Option<ReferenceScale>,
}

impl Constants {
    /// Constants for integrating directly in physical units (`K1 = G`, `K2 = 1`)
    pub fn physical(g: f64) -> Result<Self> {
        validate_g(g)?;
        Ok(Self {
            g,
            k1: g,
            k2: 1.0,
            reference: None,
        })
    }

    /// Constants for integrating in units scaled by `scale`
    pub fn from_reference(g: f64, scale: ReferenceScale) -> Result<Self> {
        validate_g(g)?;
        scale.validate()?;
        Ok(Self::scaled(g, scale))
    }

    /// Non-dimensional constants for the Alpha Centauri reference scale
    pub fn alpha_centauri() -> Self {
        Self::scaled(G_SI, ReferenceScale::alpha_centauri())
    }

    fn scaled(g: f64, scale: ReferenceScale) -> Self {
        let k1 = g * scale.time * scale.mass / (scale.length * scale.length * scale.velocity);
        let k2 = scale.velocity * scale.time / scale.length;
        Self {
            g,
            k1,
            k2,
            reference: Some(scale),
        }
    }

    /// Gravitational constant in the units it was supplied in
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Acceleration coupling
    pub fn k1(&self) -> f64 {
        self.k1
    }

    /// Velocity-to-position coupling
    pub fn k2(&self) -> f64 {
        self.k2
    }

    pub fn reference(&self) -> Option<&ReferenceScale> {
        self.reference.as_ref()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.reference.is_some()
    }

    /// Converts a mass in kg to model units (identity in physical mode)
    pub fn to_dimensionless_mass(&self, kg: f64) -> f64 {
        self.reference.map_or(kg, |s| kg / s.mass)
    }

    pub fn to_physical_mass(&self, mass: f64) -> f64 {
        self.reference.map_or(mass, |s| mass * s.mass)
    }

    /// Converts a length in m to model units (identity in physical mode)
    pub fn to_dimensionless_length(&self, meters: f64) -> f64 {
        self.reference.map_or(meters, |s| meters / s.length)
    }

    pub fn to_physical_length(&self, length: f64) -> f64 {
        self.reference.map_or(length, |s| length * s.length)
    }

    /// Converts a speed in m/s to model units (identity in physical mode)
    pub fn to_dimensionless_velocity(&self, meters_per_sec: f64) -> f64 {
        self.reference
            .map_or(meters_per_sec, |s| meters_per_sec / s.velocity)
    }

    pub fn to_physical_velocity(&self, velocity: f64) -> f64 {
        self.reference.map_or(velocity, |s| velocity * s.velocity)
    }

    /// Converts a duration in s to model units (identity in physical mode)
    pub fn to_dimensionless_time(&self, seconds: f64) -> f64 {
        self.reference.map_or(seconds, |s| seconds / s.time)
    }

    pub fn to_physical_time(&self, time: f64) -> f64 {
        self.reference.map_or(time, |s| time * s.time)
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::alpha_centauri()
    }
}

fn validate_g(g: f64) -> Result<()> {
    if g.is_finite() && g > 0.0 {
        Ok(())
    } else {
        Err(NBodyError::InvalidReferenceScale(format!(
            "gravitational constant must be finite and positive, got {g}"
        )))
    }
}
