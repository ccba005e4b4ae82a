//! Read-only conservation diagnostics.

use serde::Serialize;

use super::conservation::center_of_mass;
use super::states::{NVec3, System};

pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Sum of `-G m_i m_j / r` over unique pairs; coincident pairs are skipped.
pub fn potential_energy(sys: &System, g: f64) -> f64 {
    let n = sys.bodies.len();
    let mut total = 0.0;
    for i in 0..n {
        let bi = &sys.bodies[i];
        for bj in &sys.bodies[(i + 1)..] {
            let r = (bj.x - bi.x).norm();
            if r > 0.0 {
                total -= g * bi.m * bj.m / r;
            }
        }
    }
    total
}

pub fn system_energy(sys: &System, g: f64) -> f64 {
    kinetic_energy(sys) + potential_energy(sys, g)
}

pub fn linear_momentum(sys: &System) -> NVec3 {
    sys.bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.m * b.v)
}

/// Σ x × (m v) about the origin
pub fn angular_momentum(sys: &System) -> NVec3 {
    sys.bodies
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.x.cross(&(b.m * b.v)))
}

/// Snapshot of the conserved quantities at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub t: f64,
    pub bodies: usize,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
    pub momentum: NVec3,
    pub angular_momentum: NVec3,
    pub center_of_mass: NVec3,
}

impl Diagnostics {
    pub fn measure(sys: &System, g: f64) -> Self {
        let kinetic = kinetic_energy(sys);
        let potential = potential_energy(sys, g);
        Self {
            t: sys.t,
            bodies: sys.len(),
            kinetic,
            potential,
            total: kinetic + potential,
            momentum: linear_momentum(sys),
            angular_momentum: angular_momentum(sys),
            center_of_mass: center_of_mass(sys),
        }
    }

    /// |E - E0| / |E0|, or the absolute drift when `E0` is zero
    pub fn relative_energy_drift(&self, initial: &Diagnostics) -> f64 {
        let de = (self.total - initial.total).abs();
        if initial.total == 0.0 { de } else { de / initial.total.abs() }
    }
}
