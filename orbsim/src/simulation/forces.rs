//! Force contributors for the n-body engine
//!
//! Defines the `ForceLaw` trait, direct Newtonian gravity, and `ForceSet`
//! which sums every registered law into one net force per body.

use tracing::trace;

use crate::simulation::states::{NVec3, System};

/// Net force per body, stored in the same order as `System::bodies`
#[derive(Debug, Clone, PartialEq)]
pub struct ForceMap {
    keys: Vec<String>,
    forces: Vec<NVec3>,
}

impl ForceMap {
    pub fn get(&self, key: &str) -> Option<NVec3> {
        self.keys.iter().position(|k| k == key).map(|i| self.forces[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NVec3)> {
        self.keys.iter().map(String::as_str).zip(self.forces.iter())
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

/// A force source operating on a [`System`].
/// Implementations add their contribution into `out[i]` for each body.
pub trait ForceLaw {
    fn force(&self, sys: &System, out: &mut [NVec3]);
}

/// Collection of force terms whose contributions are summed per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Gravity alone, the usual configuration
    pub fn gravity(g: f64) -> Self {
        Self::new().with(NewtonianGravity { g })
    }

    pub fn with(mut self, term: impl ForceLaw + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Set `out[i]` to the sum of all terms' contributions on body `i`
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec3]) {
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        for term in &self.terms {
            term.force(sys, out);
        }
    }

    /// Keyed net forces for the current state of `sys`
    pub fn forces(&self, sys: &System) -> ForceMap {
        let mut forces = vec![NVec3::zeros(); sys.len()];
        self.accumulate_forces(sys, &mut forces);
        ForceMap {
            keys: sys.bodies.iter().map(|b| b.key.clone()).collect(),
            forces,
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact pairwise Newtonian gravity, no softening (direct n^2 sum)
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl ForceLaw for NewtonianGravity {
    fn force(&self, sys: &System, out: &mut [NVec3]) {
        let n = sys.bodies.len();

        // Each unordered pair (i, j) with i < j, once
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // Displacement from i to j: i is pulled along +r, j along -r
                let r_vec = bj.x - bi.x;
                let r = r_vec.norm();

                // Coincident bodies exert no force on each other
                if r == 0.0 {
                    trace!(a = %bi.key, b = %bj.key, "skipping coincident pair");
                    continue;
                }

                let magnitude = self.g * bi.m * bj.m / (r * r);
                let f = magnitude * (r_vec / r);

                // Same vector applied with opposite signs, so the pair sums to zero exactly
                out[j] -= f;
                out[i] += f;
            }
        }
    }
}
