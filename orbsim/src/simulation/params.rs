//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is passed explicitly into the engine and the diagnostic
//! queries, so engines with different constants can coexist:
//! - gravitational constant `g`
//! - default step size `dt`
//! - trail length cap
//! - tolerance for the near-parabolic orbit cutoff

/// CODATA 2018 gravitational constant (m^3 kg^-1 s^-2)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

pub const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size (s)
    pub trail_cap: usize, // max trail entries per body
    pub energy_tolerance: f64, // |specific energy| below this counts as parabolic
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            dt: 3600.0,
            trail_cap: 1000,
            energy_tolerance: 1e-10,
        }
    }
}
