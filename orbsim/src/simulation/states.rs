//! Core state types for the N-body simulation.
//!
//! - `Body`   one celestial object (validated at construction)
//! - `System` the ordered body collection plus the simulation clock `t`
//!
//! Iteration order of `System::bodies` is insertion order. Pair enumeration
//! in the force sum and survivor selection in collision merges both depend
//! on it, so it is never re-sorted.

use std::collections::VecDeque;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::simulation::orbits::{orbital_elements, OrbitalElements};
use crate::simulation::params::Parameters;

pub type NVec3 = Vector3<f64>;

/// Display category of a body. Has no effect on the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Asteroid,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub key: String, // unique within a System
    pub name: String, // display label
    pub kind: BodyKind,
    pub m: f64, // mass (kg)
    pub radius: f64, // radius (m)
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
    pub a: NVec3, // acceleration of the last step, transient
    pub color: [f32; 3], // RGB in 0..1, display only
    pub trail: VecDeque<NVec3>, // past positions, oldest at the front
    pub orbit: Option<OrbitalElements>, // set by `System::calculate_orbit`
}

impl Body {
    /// Validate and build a body. Mass and radius must be positive and finite.
    pub fn new(
        key: impl Into<String>,
        kind: BodyKind,
        m: f64,
        radius: f64,
        x: NVec3,
        v: NVec3,
    ) -> Result<Self> {
        let key = key.into();
        // `!(m > 0.0)` also rejects NaN
        if !(m > 0.0) || !m.is_finite() {
            return Err(SimError::InvalidBody { key, field: "mass", value: m });
        }
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SimError::InvalidBody { key, field: "radius", value: radius });
        }

        Ok(Self {
            name: key.clone(),
            key,
            kind,
            m,
            radius,
            x,
            v,
            a: NVec3::zeros(),
            color: [1.0, 1.0, 1.0],
            trail: VecDeque::new(),
            orbit: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// `force / m`, refusing to divide by a non-positive mass.
    pub fn acceleration_from(&self, force: &NVec3) -> Result<NVec3> {
        if !(self.m > 0.0) {
            return Err(SimError::DegenerateAcceleration {
                key: self.key.clone(),
                mass: self.m,
            });
        }
        Ok(force / self.m)
    }

    /// Append the current position to the trail, evicting from the front
    /// once `cap` entries are exceeded.
    pub fn record_trail(&mut self, cap: usize) {
        self.trail.push_back(self.x);
        while self.trail.len() > cap {
            self.trail.pop_front();
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }

    /// Potential energy of this body against every other body in `others`.
    /// Coincident bodies contribute nothing.
    pub fn potential_energy_with<'a>(&self, others: impl IntoIterator<Item = &'a Body>, g: f64) -> f64 {
        others
            .into_iter()
            .filter(|o| o.key != self.key)
            .map(|o| {
                let r = (self.x - o.x).norm();
                if r > 0.0 { -g * self.m * o.m / r } else { 0.0 }
            })
            .sum()
    }

    /// Overlap test used by the collision resolver
    pub fn collides_with(&self, other: &Body) -> bool {
        (self.x - other.x).norm() < self.radius + other.radius
    }
}

/// Ordered collection of uniquely keyed bodies and the simulation time.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // insertion-ordered
    pub t: f64, // time (s)
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from bodies in the given order, rejecting duplicate keys.
    pub fn with_bodies(bodies: impl IntoIterator<Item = Body>) -> Result<Self> {
        let mut sys = Self::new();
        for b in bodies {
            sys.insert(b)?;
        }
        Ok(sys)
    }

    pub fn insert(&mut self, body: Body) -> Result<()> {
        if self.index_of(&body.key).is_some() {
            return Err(SimError::DuplicateKey(body.key));
        }
        self.bodies.push(body);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Body> {
        let i = self.index_of(key)?;
        Some(self.bodies.remove(i))
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Derive and store orbital elements of `key` relative to `reference`.
    ///
    /// Degenerate geometry (same body, zero separation, zero relative speed,
    /// zero angular momentum) leaves `Body::orbit` untouched and returns
    /// `Ok(None)`.
    pub fn calculate_orbit(
        &mut self,
        key: &str,
        reference: &str,
        params: &Parameters,
    ) -> Result<Option<OrbitalElements>> {
        let i = self.index_of(key).ok_or_else(|| SimError::UnknownBody(key.to_string()))?;
        let j = self
            .index_of(reference)
            .ok_or_else(|| SimError::UnknownBody(reference.to_string()))?;
        if i == j {
            return Ok(None);
        }

        let elements = orbital_elements(&self.bodies[i], &self.bodies[j], params.g, params.energy_tolerance);
        if let Some(el) = elements {
            self.bodies[i].orbit = Some(el);
        }
        Ok(elements)
    }
}
