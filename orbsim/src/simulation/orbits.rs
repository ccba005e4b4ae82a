//! Two-body orbital mechanics.
//!
//! Closed-form helpers for circular orbits, escape speed, Kepler's third law
//! and Hohmann transfers, plus derivation of orbital elements for one body
//! relative to another. Every function takes the gravitational constant
//! explicitly; masses are in kg, distances in m, speeds in m/s.

use std::f64::consts::PI;

use super::states::Body;

/// Speed of a circular orbit of radius `r` around `central_mass`.
pub fn circular_velocity(g: f64, central_mass: f64, r: f64) -> f64 {
    (g * central_mass / r).sqrt()
}

/// Escape speed at distance `r`; always `sqrt(2)` times the circular speed.
pub fn escape_velocity(g: f64, central_mass: f64, r: f64) -> f64 {
    (2.0 * g * central_mass / r).sqrt()
}

/// Kepler III: `2π sqrt(a³ / GM)`.
pub fn orbital_period(g: f64, central_mass: f64, semi_major_axis: f64) -> f64 {
    2.0 * PI * (semi_major_axis.powi(3) / (g * central_mass)).sqrt()
}

/// Burns for a Hohmann transfer between circular orbits `r1` and `r2`.
///
/// Signs follow the direction of travel: raising an orbit gives two positive
/// burns, lowering it two negative ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannTransfer {
    pub departure_dv: f64,
    pub arrival_dv: f64,
}

impl HohmannTransfer {
    pub fn new(g: f64, central_mass: f64, r1: f64, r2: f64) -> Self {
        let mu = g * central_mass;
        let a = 0.5 * (r1 + r2);

        let v1 = circular_velocity(g, central_mass, r1);
        let v2 = circular_velocity(g, central_mass, r2);

        // vis-viva on the transfer ellipse at both apsides
        let v_depart = (mu * (2.0 / r1 - 1.0 / a)).sqrt();
        let v_arrive = (mu * (2.0 / r2 - 1.0 / a)).sqrt();

        Self {
            departure_dv: v_depart - v1,
            arrival_dv: v2 - v_arrive,
        }
    }

    /// Total |Δv| of both burns
    pub fn total(&self) -> f64 {
        self.departure_dv.abs() + self.arrival_dv.abs()
    }
}

/// Osculating elements of a body relative to a reference body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// `+inf` for a parabolic orbit, negative for a hyperbolic one
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// `+inf` unless the orbit is bound
    pub period: f64,
    /// Specific orbital energy (J/kg)
    pub specific_energy: f64,
    /// Magnitude of the specific angular momentum (m²/s)
    pub specific_angular_momentum: f64,
}

impl OrbitalElements {
    pub fn is_bound(&self) -> bool {
        self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0
    }
}

/// Derive orbital elements of `body` around `reference`.
///
/// `mu` is `G (m_body + m_reference)`. The eccentricity comes from the
/// Laplace-Runge-Lenz vector. When `|ε| < energy_tolerance` the orbit is
/// treated as parabolic. Returns `None` for zero separation, zero relative
/// speed or zero angular momentum.
pub fn orbital_elements(body: &Body, reference: &Body, g: f64, energy_tolerance: f64) -> Option<OrbitalElements> {
    let r_vec = body.x - reference.x;
    let v_vec = body.v - reference.v;
    let r = r_vec.norm();
    let v = v_vec.norm();
    if r == 0.0 || v == 0.0 {
        return None;
    }

    let mu = g * (body.m + reference.m);
    let h_vec = r_vec.cross(&v_vec);
    let h = h_vec.norm();
    if h == 0.0 {
        return None;
    }

    let energy = 0.5 * v * v - mu / r;
    let semi_major_axis = if energy.abs() > energy_tolerance {
        -mu / (2.0 * energy)
    } else {
        f64::INFINITY
    };

    let e_vec = v_vec.cross(&h_vec) / mu - r_vec / r;

    let period = if semi_major_axis.is_finite() && semi_major_axis > 0.0 {
        2.0 * PI * (semi_major_axis.powi(3) / mu).sqrt()
    } else {
        f64::INFINITY
    };

    Some(OrbitalElements {
        semi_major_axis,
        eccentricity: e_vec.norm(),
        period,
        specific_energy: energy,
        specific_angular_momentum: h,
    })
}
