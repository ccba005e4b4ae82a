//! Fixed-step time integrators for the N-body system
//!
//! Provides semi-implicit (symplectic) Euler and classical RK4, both driven
//! by a `ForceSet`. Each call advances every body by one tick of `dt`,
//! appends one trail point per body and advances `sys.t`.
//!
//! A body with non-positive mass aborts the tick with
//! `SimError::DegenerateAcceleration` and leaves the system as it was.

use serde::{Deserialize, Serialize};

use super::forces::ForceSet;
use super::states::{NVec3, System};
use crate::error::Result;

/// Which time-stepping scheme the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "euler")] // velocity first, then position with the new velocity
    Euler,

    #[default]
    #[serde(rename = "rk4")] // classical 4th-order Runge-Kutta, four force evaluations
    Rk4,
}

/// Advance `sys` by one step of `dt` with the chosen scheme.
pub fn step(sys: &mut System, forces: &ForceSet, dt: f64, scheme: Scheme, trail_cap: usize) -> Result<()> {
    match scheme {
        Scheme::Euler => euler_step(sys, forces, dt, trail_cap),
        Scheme::Rk4 => rk4_step(sys, forces, dt, trail_cap),
    }
}

/// Accelerations for the current state, one per body.
fn accelerations(sys: &System, forces: &ForceSet, buf: &mut [NVec3]) -> Result<Vec<NVec3>> {
    forces.accumulate_forces(sys, buf);
    sys.bodies
        .iter()
        .zip(buf.iter())
        .map(|(b, f)| b.acceleration_from(f))
        .collect()
}

/// Semi-implicit Euler: one force evaluation per step.
/// v_n+1 = v_n + dt * a_n
/// x_n+1 = x_n + dt * v_n+1
pub fn euler_step(sys: &mut System, forces: &ForceSet, dt: f64, trail_cap: usize) -> Result<()> {
    let n = sys.bodies.len();
    if n == 0 {
        return Ok(());
    }

    // All accelerations are validated before any body moves
    let mut f = vec![NVec3::zeros(); n];
    let acc = accelerations(sys, forces, &mut f)?;

    for (b, a) in sys.bodies.iter_mut().zip(acc) {
        b.a = a;
        b.v += dt * a;
        b.x += dt * b.v;
        b.record_trail(trail_cap);
    }

    sys.t += dt;
    Ok(())
}

/// Overwrite every body's state with `x0 + h*kx`, `v0 + h*kv`.
fn set_stage(sys: &mut System, x0: &[NVec3], v0: &[NVec3], kx: &[NVec3], kv: &[NVec3], h: f64) {
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x = x0[i] + h * kx[i];
        b.v = v0[i] + h * kv[i];
    }
}

fn restore(sys: &mut System, x0: &[NVec3], v0: &[NVec3]) {
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x = x0[i];
        b.v = v0[i];
    }
}

type Stage = (Vec<NVec3>, Vec<NVec3>);

/// The four (dx/dt, dv/dt) slopes, evaluated in place on `sys`.
fn rk4_stages(sys: &mut System, forces: &ForceSet, x0: &[NVec3], v0: &[NVec3], dt: f64) -> Result<[Stage; 4]> {
    let half_dt = 0.5 * dt;
    let mut f = vec![NVec3::zeros(); sys.len()];
    let velocities = |sys: &System| -> Vec<NVec3> { sys.bodies.iter().map(|b| b.v).collect() };

    // k1 at (x_n, v_n)
    let k1v = accelerations(sys, forces, &mut f)?;
    let k1x = v0.to_vec();

    // k2 at (x_n, v_n) + dt/2 * k1
    set_stage(sys, x0, v0, &k1x, &k1v, half_dt);
    let k2v = accelerations(sys, forces, &mut f)?;
    let k2x = velocities(sys);

    // k3 at (x_n, v_n) + dt/2 * k2
    set_stage(sys, x0, v0, &k2x, &k2v, half_dt);
    let k3v = accelerations(sys, forces, &mut f)?;
    let k3x = velocities(sys);

    // k4 at (x_n, v_n) + dt * k3
    set_stage(sys, x0, v0, &k3x, &k3v, dt);
    let k4v = accelerations(sys, forces, &mut f)?;
    let k4x = velocities(sys);

    Ok([(k1x, k1v), (k2x, k2v), (k3x, k3v), (k4x, k4v)])
}

/// Classical RK4 on the state (x, v) with dx/dt = v, dv/dt = F(x)/m.
///
/// Stages are evaluated on the bodies themselves. Every stage starts again
/// from the snapshot taken at the top of the step, so perturbations never
/// stack.
pub fn rk4_step(sys: &mut System, forces: &ForceSet, dt: f64, trail_cap: usize) -> Result<()> {
    let n = sys.bodies.len();
    if n == 0 {
        return Ok(());
    }
    // Snapshot of x_n, v_n
    let x0: Vec<NVec3> = sys.bodies.iter().map(|b| b.x).collect();
    let v0: Vec<NVec3> = sys.bodies.iter().map(|b| b.v).collect();
    let [(k1x, k1v), (k2x, k2v), (k3x, k3v), (k4x, k4v)] = match rk4_stages(sys, forces, &x0, &v0, dt) {
        Ok(k) => k,
        Err(e) => {
            restore(sys, &x0, &v0);
            return Err(e);
        }
    };

    let w = dt / 6.0;
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.x = x0[i] + w * (k1x[i] + 2.0 * k2x[i] + 2.0 * k3x[i] + k4x[i]);
        b.v = v0[i] + w * (k1v[i] + 2.0 * k2v[i] + 2.0 * k3v[i] + k4v[i]);
        b.a = k1v[i];
        b.record_trail(trail_cap);
    }

    sys.t += dt;
    Ok(())
}
