pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{Body, BodyKind, System, NVec3};
pub use simulation::params::{Parameters, GRAVITATIONAL_CONSTANT, ASTRONOMICAL_UNIT};
pub use simulation::forces::{ForceLaw, ForceMap, ForceSet, NewtonianGravity};
pub use simulation::integrator::{step, euler_step, rk4_step, Scheme};
pub use simulation::collisions::{find_collisions, merge_bodies, resolve_collisions, MergeEvent};
pub use simulation::conservation::{
    apply_correction, center_of_mass, center_of_mass_velocity, recenter_to_origin, zero_net_momentum,
};
pub use simulation::orbits::{
    circular_velocity, escape_velocity, orbital_elements, orbital_period, HohmannTransfer, OrbitalElements,
};
pub use simulation::diagnostics::{
    angular_momentum, kinetic_energy, linear_momentum, potential_energy, system_energy, Diagnostics,
};
pub use simulation::engine::{GravityEngine, StepReport};
pub use simulation::scenario::{presets, Scenario};

pub use configuration::config::{BodyConfig, EngineConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_forces, bench_step, ring_system};
