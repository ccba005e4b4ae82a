use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::simulation::engine::GravityEngine;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::Scheme;
use crate::simulation::orbits::circular_velocity;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyKind, NVec3, System};

/// A star with `n` small planets on circular orbits, deterministic layout.
pub fn ring_system(n: usize, g: f64) -> Result<System> {
    let star_mass = 1.989e30;
    let mut sys = System::new();
    sys.insert(Body::new("star", BodyKind::Star, star_mass, 6.9634e8, NVec3::zeros(), NVec3::zeros())?)?;

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let r = 5.0e10 + i_f * 1.0e9;
        let theta = i_f * 0.37;
        let v = circular_velocity(g, star_mass, r);
        let x = NVec3::new(r * theta.cos(), r * theta.sin(), 0.0);
        let vel = NVec3::new(-v * theta.sin(), v * theta.cos(), 0.0);
        sys.insert(Body::new(format!("p{i}"), BodyKind::Asteroid, 1.0e15, 1.0e3, x, vel)?)?;
    }
    Ok(sys)
}

/// Time one direct force evaluation for growing N
pub fn bench_forces() -> Result<()> {
    let params = Parameters::default();
    let forces = ForceSet::gravity(params.g);

    for n in [100, 200, 400, 800, 1600] {
        let sys = ring_system(n, params.g)?;

        // warm up
        let _ = forces.forces(&sys);

        let t0 = Instant::now();
        let _ = forces.forces(&sys);
        let elapsed = t0.elapsed().as_secs_f64();

        info!(n, seconds = elapsed, "force evaluation");
    }
    Ok(())
}

/// Time `steps` full ticks with each scheme for growing N
pub fn bench_step(steps: usize) -> Result<()> {
    let params = Parameters::default();

    for scheme in [Scheme::Euler, Scheme::Rk4] {
        let engine = GravityEngine::new(params.clone(), scheme);
        for n in [50, 100, 200, 400] {
            let mut sys = ring_system(n, params.g)?;
            let e0 = engine.system_energy(&sys);

            let t0 = Instant::now();
            engine.run(&mut sys, steps)?;
            let elapsed = t0.elapsed().as_secs_f64();

            let drift = ((engine.system_energy(&sys) - e0) / e0).abs();
            info!(?scheme, n, steps, seconds = elapsed, energy_drift = drift, "integration");
        }
    }
    Ok(())
}
