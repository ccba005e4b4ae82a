//! On-demand recentering of the system frame.
//!
//! Neither operation runs automatically; the engine calls
//! [`apply_correction`] only when `auto_correct` is enabled.

use tracing::info;

use super::states::{Body, NVec3, System};

/// Mass-weighted mean of `f` over all bodies, or zero for an empty system.
fn mass_weighted(sys: &System, f: impl Fn(&Body) -> NVec3) -> NVec3 {
    let total = sys.total_mass();
    if total == 0.0 {
        return NVec3::zeros();
    }
    sys.bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.m * f(b)) / total
}

pub fn center_of_mass(sys: &System) -> NVec3 {
    mass_weighted(sys, |b| b.x)
}

pub fn center_of_mass_velocity(sys: &System) -> NVec3 {
    mass_weighted(sys, |b| b.v)
}

/// Shift all positions so the centre of mass sits at the origin.
/// Returns the offset that was removed.
pub fn recenter_to_origin(sys: &mut System) -> NVec3 {
    let com = center_of_mass(sys);
    for b in sys.bodies.iter_mut() {
        b.x -= com;
    }
    info!(?com, "recentered positions");
    com
}

/// Remove the centre-of-mass velocity so total linear momentum is zero.
/// Returns the velocity that was removed.
pub fn zero_net_momentum(sys: &mut System) -> NVec3 {
    let v_com = center_of_mass_velocity(sys);
    for b in sys.bodies.iter_mut() {
        b.v -= v_com;
    }
    info!(?v_com, "removed net momentum");
    v_com
}

/// Recenter positions, then velocities.
pub fn apply_correction(sys: &mut System) {
    recenter_to_origin(sys);
    zero_net_momentum(sys);
}
