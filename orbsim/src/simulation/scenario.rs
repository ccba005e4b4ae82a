//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - the engine (`GravityEngine`, with its `Parameters`)
//! - the system state (`System` with bodies at t = 0)
//! - the number of steps the driver should run
//!
//! Built-in presets are provided for the solar system, a binary star and a
//! triple star.

use tracing::info;

use crate::configuration::config::{BodyConfig, EngineConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::GravityEngine;
use crate::simulation::orbits::circular_velocity;
use crate::simulation::params::{Parameters, ASTRONOMICAL_UNIT};
use crate::simulation::states::{Body, BodyKind, NVec3, System};

pub struct Scenario {
    pub engine: GravityEngine,
    pub system: System,
    pub steps: usize,
}

fn vec3(key: &str, field: &str, c: &[f64]) -> Result<NVec3> {
    match c {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidConfig(format!(
            "body `{key}`: `{field}` needs 3 components, got {}",
            c.len()
        ))),
    }
}

impl BodyConfig {
    /// Validate into a runtime body
    pub fn build(&self) -> Result<Body> {
        let x = vec3(&self.key, "x", &self.x)?;
        let v = vec3(&self.key, "v", &self.v)?;
        let mut body = Body::new(self.key.clone(), self.kind, self.mass, self.radius, x, v)?;
        if let Some(name) = &self.name {
            body = body.with_name(name.clone());
        }
        if let Some(color) = self.color {
            body = body.with_color(color);
        }
        Ok(body)
    }
}

impl Scenario {
    pub fn build(cfg: ScenarioConfig) -> Result<Self> {
        let defaults = Parameters::default();
        let p_cfg = cfg.parameters;
        if !(p_cfg.dt > 0.0) {
            return Err(SimError::InvalidConfig(format!("dt must be positive, got {}", p_cfg.dt)));
        }
        let params = Parameters {
            g: p_cfg.g.unwrap_or(defaults.g),
            dt: p_cfg.dt,
            trail_cap: p_cfg.trail_cap.unwrap_or(defaults.trail_cap),
            ..defaults
        };

        let bodies = cfg.bodies.iter().map(BodyConfig::build).collect::<Result<Vec<_>>>()?;
        let system = System::with_bodies(bodies)?;

        info!(bodies = system.len(), scheme = ?cfg.engine.integrator, dt = params.dt, "scenario built");
        Ok(Self {
            engine: engine_from(cfg.engine, params),
            system,
            steps: p_cfg.steps,
        })
    }

    /// A named preset run with the given engine settings
    pub fn preset(name: &str, engine: EngineConfig, params: Parameters, steps: usize) -> Result<Self> {
        let system = match name {
            "solar_system" => presets::solar_system(params.g)?,
            "binary_system" => presets::binary_system(params.g)?,
            "triple_system" => presets::triple_system(params.g)?,
            other => {
                return Err(SimError::InvalidConfig(format!(
                    "unknown preset `{other}`, expected one of: {}",
                    presets::NAMES.join(", ")
                )))
            }
        };
        Ok(Self {
            engine: engine_from(engine, params),
            system,
            steps,
        })
    }
}

fn engine_from(cfg: EngineConfig, params: Parameters) -> GravityEngine {
    GravityEngine::new(params, cfg.integrator)
        .with_collisions(cfg.collisions)
        .with_auto_correct(cfg.auto_correct)
}

pub mod presets {
    use super::*;

    pub const NAMES: [&str; 3] = ["solar_system", "binary_system", "triple_system"];

    fn on_x_axis(
        key: &str,
        name: &str,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        x: f64,
        vy: f64,
        color: [f32; 3],
    ) -> Result<Body> {
        Ok(Body::new(key, kind, mass, radius, NVec3::new(x, 0.0, 0.0), NVec3::new(0.0, vy, 0.0))?
            .with_name(name)
            .with_color(color))
    }

    /// Sun, the eight planets and the Moon, all starting on the +x axis on
    /// circular orbits.
    pub fn solar_system(g: f64) -> Result<System> {
        let sun_mass = 1.989e30;
        let au = ASTRONOMICAL_UNIT;

        let mut sys = System::new();
        sys.insert(on_x_axis("sun", "Sun", BodyKind::Star, sun_mass, 6.9634e8, 0.0, 0.0, [1.0, 0.8, 0.0])?)?;

        // key, name, mass (kg), radius (m), distance (AU), color
        let planets: [(&str, &str, f64, f64, f64, [f32; 3]); 8] = [
            ("mercury", "Mercury", 3.301e23, 2.4397e6, 0.387, [0.55, 0.47, 0.33]),
            ("venus", "Venus", 4.867e24, 6.0518e6, 0.723, [1.0, 0.77, 0.29]),
            ("earth", "Earth", 5.972e24, 6.371e6, 1.0, [0.25, 0.41, 0.88]),
            ("mars", "Mars", 6.417e23, 3.3895e6, 1.524, [0.8, 0.2, 0.2]),
            ("jupiter", "Jupiter", 1.898e27, 6.9911e7, 5.203, [0.85, 0.65, 0.2]),
            ("saturn", "Saturn", 5.683e26, 5.8232e7, 9.537, [0.95, 0.82, 0.38]),
            ("uranus", "Uranus", 8.681e25, 2.5362e7, 19.191, [0.4, 0.8, 0.9]),
            ("neptune", "Neptune", 1.024e26, 2.4622e7, 30.07, [0.2, 0.4, 0.9]),
        ];
        for (key, name, mass, radius, dist, color) in planets {
            let r = dist * au;
            let v = circular_velocity(g, sun_mass, r);
            sys.insert(on_x_axis(key, name, BodyKind::Planet, mass, radius, r, v, color)?)?;

            if key == "earth" {
                // The Moon rides along with Earth
                let moon_dist = 3.844e8;
                let moon_v = v + circular_velocity(g, mass, moon_dist);
                sys.insert(on_x_axis(
                    "moon",
                    "Moon",
                    BodyKind::Moon,
                    7.342e22,
                    1.7371e6,
                    r + moon_dist,
                    moon_v,
                    [0.8, 0.8, 0.8],
                )?)?;
            }
        }
        Ok(sys)
    }

    /// Two stars on a mutual circular orbit, each with one planet on a
    /// circular orbit around its own star.
    pub fn binary_system(g: f64) -> Result<System> {
        let primary_mass = 2.0e30;
        let secondary_mass = 1.5e30;
        let total = primary_mass + secondary_mass;
        let separation = 2.0e11;

        // Equal and opposite momenta about the origin
        let v_rel = circular_velocity(g, total, separation);
        let primary_v = v_rel * secondary_mass / total;
        let secondary_v = -v_rel * primary_mass / total;

        let planet_a_v = primary_v + circular_velocity(g, primary_mass, 1.0e11);
        let planet_b_v = secondary_v - circular_velocity(g, secondary_mass, 1.5e11);

        System::with_bodies([
            on_x_axis("primary", "Primary", BodyKind::Star, primary_mass, 6.9634e8, -1.0e11, primary_v, [1.0, 0.8, 0.0])?,
            on_x_axis("secondary", "Secondary", BodyKind::Star, secondary_mass, 6.0e8, 1.0e11, secondary_v, [1.0, 0.6, 0.0])?,
            on_x_axis("planet_a", "Planet A", BodyKind::Planet, 6e24, 6.371e6, -2.0e11, planet_a_v, [0.2, 0.8, 0.2])?,
            on_x_axis("planet_b", "Planet B", BodyKind::Planet, 4e24, 5.0e6, 2.5e11, planet_b_v, [0.5, 0.2, 0.8])?,
        ])
    }

    /// Three stars on the corners of an equilateral triangle with a planet
    /// circling their centre of mass out of plane.
    pub fn triple_system(g: f64) -> Result<System> {
        let d = 1.0e11;
        let h = d * 3f64.sqrt() / 2.0;

        let stars = [
            Body::new("star_1", BodyKind::Star, 1.0e30, 5.0e8, NVec3::zeros(), NVec3::zeros())?
                .with_name("Star 1")
                .with_color([1.0, 1.0, 0.0]),
            Body::new("star_2", BodyKind::Star, 0.8e30, 4.5e8, NVec3::new(d, 0.0, 0.0), NVec3::new(0.0, 20.0, 0.0))?
                .with_name("Star 2")
                .with_color([1.0, 0.6, 0.0]),
            Body::new(
                "star_3",
                BodyKind::Star,
                0.6e30,
                4.0e8,
                NVec3::new(d / 2.0, h, 0.0),
                NVec3::new(-10.0 * 3f64.sqrt(), 10.0, 0.0),
            )?
            .with_name("Star 3")
            .with_color([1.0, 0.3, 0.0]),
        ];

        let total: f64 = stars.iter().map(|b| b.m).sum();
        let com = stars.iter().fold(NVec3::zeros(), |acc, b| acc + b.m * b.x) / total;
        let r = 3.0 * d;
        let planet = Body::new(
            "planet",
            BodyKind::Planet,
            5e24,
            6.0e6,
            com + NVec3::new(r, 0.0, 0.0),
            NVec3::new(0.0, 0.0, circular_velocity(g, total, r)),
        )?
        .with_name("Planet")
        .with_color([0.2, 0.8, 0.2]);

        let [s1, s2, s3] = stars;
        System::with_bodies([s1, s2, s3, planet])
    }
}
