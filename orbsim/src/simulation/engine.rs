//! Runtime engine: integration scheme, collision handling and constants
//!
//! `GravityEngine` bundles the force laws, the `Parameters` and the engine
//! switches. The driver owns the `System` and lends it to `step` once per
//! tick.

use tracing::debug;

use super::collisions::{resolve_collisions, MergeEvent};
use super::conservation::apply_correction;
use super::diagnostics::{system_energy, Diagnostics};
use super::forces::{ForceMap, ForceSet};
use super::integrator::{self, Scheme};
use super::params::Parameters;
use super::states::System;
use crate::error::Result;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub merges: Vec<MergeEvent>,
}

pub struct GravityEngine {
    pub params: Parameters,
    pub scheme: Scheme, // euler or rk4, fixed for the engine's lifetime
    pub collisions: bool, // merge overlapping bodies after each step
    pub auto_correct: bool, // recenter position and momentum after each step
    forces: ForceSet,
}

impl GravityEngine {
    /// Engine with Newtonian gravity using `params.g`, collisions on and
    /// auto-correction off.
    pub fn new(params: Parameters, scheme: Scheme) -> Self {
        let forces = ForceSet::gravity(params.g);
        Self {
            params,
            scheme,
            collisions: true,
            auto_correct: false,
            forces,
        }
    }

    pub fn with_collisions(mut self, enabled: bool) -> Self {
        self.collisions = enabled;
        self
    }

    pub fn with_auto_correct(mut self, enabled: bool) -> Self {
        self.auto_correct = enabled;
        self
    }

    /// Replace the force laws, e.g. with a test double
    pub fn with_forces(mut self, forces: ForceSet) -> Self {
        self.forces = forces;
        self
    }

    pub fn forces(&self, sys: &System) -> ForceMap {
        self.forces.forces(sys)
    }

    /// Advance one tick of `params.dt`
    pub fn step(&self, sys: &mut System) -> Result<StepReport> {
        self.step_dt(sys, self.params.dt)
    }

    /// Advance one tick of `dt`, then merge collisions and recenter if the
    /// engine is configured to.
    pub fn step_dt(&self, sys: &mut System, dt: f64) -> Result<StepReport> {
        integrator::step(sys, &self.forces, dt, self.scheme, self.params.trail_cap)?;

        let merges = if self.collisions {
            resolve_collisions(sys)
        } else {
            Vec::new()
        };

        if self.auto_correct {
            apply_correction(sys);
        }

        debug!(t = sys.t, bodies = sys.len(), merges = merges.len(), "step");
        Ok(StepReport { merges })
    }

    /// Run `steps` ticks, collecting every merge along the way
    pub fn run(&self, sys: &mut System, steps: usize) -> Result<StepReport> {
        let mut report = StepReport::default();
        for _ in 0..steps {
            report.merges.extend(self.step(sys)?.merges);
        }
        Ok(report)
    }

    pub fn system_energy(&self, sys: &System) -> f64 {
        system_energy(sys, self.params.g)
    }

    pub fn diagnostics(&self, sys: &System) -> Diagnostics {
        Diagnostics::measure(sys, self.params.g)
    }
}
