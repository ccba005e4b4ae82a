//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – integration scheme and engine switches
//! - [`ParametersConfig`] – step size, step count and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"       # or "euler"
//!   collisions: true
//!   auto_correct: false
//!
//! parameters:
//!   dt: 3600.0              # step size (s)
//!   steps: 100
//!   G: 6.6743e-11           # optional, CODATA value if omitted
//!   trail_cap: 1000         # optional
//!
//! bodies:
//!   - key: sun
//!     kind: star
//!     mass: 1.989e30
//!     radius: 6.9634e8
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!   - key: earth
//!     name: Earth
//!     kind: planet
//!     mass: 5.972e24
//!     radius: 6.371e6
//!     x: [1.49597870e11, 0.0, 0.0]
//!     v: [0.0, 29780.0, 0.0]
//!     color: [0.25, 0.41, 0.88]
//! ```
//!
//! These types only describe the file. `Scenario::build` validates them and
//! turns them into runtime bodies.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::simulation::integrator::Scheme;
use crate::simulation::states::{Body, BodyKind};

fn enabled() -> bool {
    true
}

/// Engine switches
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: Scheme, // time integrator, rk4 unless stated
    #[serde(default = "enabled")]
    pub collisions: bool, // merge overlapping bodies after every step
    #[serde(default)]
    pub auto_correct: bool, // recenter COM and zero momentum after every step
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: Scheme::default(),
            collisions: true,
            auto_correct: false,
        }
    }
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub dt: f64, // step size (s)
    pub steps: usize, // number of steps the driver runs
    #[serde(rename = "G", default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>, // gravitational constant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_cap: Option<usize>, // max trail length per body
}

/// Initial state of a single body
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub key: String, // unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // display label, defaults to the key
    pub kind: BodyKind,
    pub mass: f64, // kg
    pub radius: f64, // m
    pub x: Vec<f64>, // initial position (m), three components
    pub v: Vec<f64>, // initial velocity (m/s), three components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
}

impl From<&Body> for BodyConfig {
    fn from(b: &Body) -> Self {
        Self {
            key: b.key.clone(),
            name: Some(b.name.clone()),
            kind: b.kind,
            mass: b.m,
            radius: b.radius,
            x: b.x.iter().copied().collect(),
            v: b.v.iter().copied().collect(),
            color: Some(b.color),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_yaml::from_reader(reader).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }
}
