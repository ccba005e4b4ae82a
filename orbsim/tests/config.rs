use approx::assert_relative_eq;

use orbsim::{
    circular_velocity, find_collisions, presets, Body, BodyConfig, BodyKind, EngineConfig, NVec3, Parameters,
    Scenario, ScenarioConfig, Scheme, SimError, System, GRAVITATIONAL_CONSTANT,
};

const TWO_BODY: &str = r#"
engine:
  integrator: "euler"
  collisions: false

parameters:
  dt: 60.0
  steps: 10

bodies:
  - key: sun
    kind: star
    mass: 1.989e30
    radius: 6.9634e8
    x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
  - key: earth
    name: Earth
    kind: planet
    mass: 5.972e24
    radius: 6.371e6
    x: [1.49597870e11, 0.0, 0.0]
    v: [0.0, 29780.0, 0.0]
    color: [0.25, 0.41, 0.88]
"#;

fn with_field(field: &str, value: &str) -> String {
    TWO_BODY.replace(&format!("    {field}: "), &format!("    {field}: {value} #"))
}

// ==================================================================================
// Body construction
// ==================================================================================

#[test]
fn construction_rejects_bad_mass_and_radius() {
    let mut sys = System::new();

    let cases = [
        (0.0, 1.0, "mass"),
        (-5.0, 1.0, "mass"),
        (f64::NAN, 1.0, "mass"),
        (1.0, -1.0, "radius"),
        (1.0, 0.0, "radius"),
    ];
    for (m, r, field) in cases {
        match Body::new("rock", BodyKind::Asteroid, m, r, NVec3::zeros(), NVec3::zeros()) {
            Err(SimError::InvalidBody { key, field: f, .. }) => {
                assert_eq!(key, "rock");
                assert_eq!(f, field);
            }
            Ok(b) => {
                sys.insert(b).unwrap();
                panic!("accepted mass {m} radius {r}");
            }
            Err(e) => panic!("unexpected error {e}"),
        }
    }
    assert!(sys.is_empty());
}

#[test]
fn duplicate_keys_are_rejected() {
    let rock = || Body::new("rock", BodyKind::Asteroid, 1.0, 1.0, NVec3::zeros(), NVec3::zeros()).unwrap();
    let mut sys = System::with_bodies([rock()]).unwrap();

    assert_eq!(sys.insert(rock()), Err(SimError::DuplicateKey("rock".to_string())));
    assert_eq!(sys.len(), 1);
    assert!(sys.remove("rock").is_some());
    assert!(sys.remove("rock").is_none());
}

// ==================================================================================
// Scenario files
// ==================================================================================

#[test]
fn scenario_from_yaml() {
    let cfg = ScenarioConfig::from_yaml_str(TWO_BODY).unwrap();
    assert_eq!(cfg.engine.integrator, Scheme::Euler);
    assert!(!cfg.engine.auto_correct);

    let scenario = Scenario::build(cfg).unwrap();
    assert_eq!(scenario.steps, 10);
    assert_eq!(scenario.engine.scheme, Scheme::Euler);
    assert!(!scenario.engine.collisions);
    assert_eq!(scenario.engine.params.dt, 60.0);
    assert_eq!(scenario.engine.params.g, GRAVITATIONAL_CONSTANT);

    let keys: Vec<&str> = scenario.system.keys().collect();
    assert_eq!(keys, ["sun", "earth"]);
    let earth = scenario.system.get("earth").unwrap();
    assert_eq!(earth.name, "Earth");
    assert_eq!(earth.kind, BodyKind::Planet);
    assert_eq!(earth.v, NVec3::new(0.0, 29780.0, 0.0));
    assert_eq!(scenario.system.get("sun").unwrap().name, "sun");
}

#[test]
fn engine_section_defaults() {
    let yaml = "parameters: { dt: 1.0, steps: 1, G: 1.0 }\nbodies: []\n";
    let scenario = Scenario::build(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();

    assert_eq!(scenario.engine.scheme, Scheme::Rk4);
    assert!(scenario.engine.collisions);
    assert!(!scenario.engine.auto_correct);
    assert_eq!(scenario.engine.params.g, 1.0);
    assert!(scenario.system.is_empty());
}

#[test]
fn invalid_body_in_file_fails_the_build() {
    let yaml = with_field("mass", "0.0");
    let err = Scenario::build(ScenarioConfig::from_yaml_str(&yaml).unwrap()).err().unwrap();
    assert!(matches!(err, SimError::InvalidBody { field: "mass", .. }), "{err}");
}

#[test]
fn short_vectors_and_duplicates_are_config_errors() {
    let mut cfg = ScenarioConfig::from_yaml_str(TWO_BODY).unwrap();
    cfg.bodies[1].x = vec![1.0, 2.0];
    assert!(matches!(Scenario::build(cfg).err().unwrap(), SimError::InvalidConfig(_)));

    let mut cfg = ScenarioConfig::from_yaml_str(TWO_BODY).unwrap();
    cfg.bodies[1].key = "sun".to_string();
    assert_eq!(Scenario::build(cfg).err().unwrap(), SimError::DuplicateKey("sun".to_string()));

    assert!(matches!(ScenarioConfig::from_yaml_str("bodies: 3"), Err(SimError::InvalidConfig(_))));
}

#[test]
fn body_config_survives_a_yaml_round_trip() {
    let scenario = Scenario::build(ScenarioConfig::from_yaml_str(TWO_BODY).unwrap()).unwrap();
    let earth = scenario.system.get("earth").unwrap();

    let cfg = ScenarioConfig {
        engine: EngineConfig::default(),
        parameters: ScenarioConfig::from_yaml_str(TWO_BODY).unwrap().parameters,
        bodies: vec![BodyConfig::from(earth)],
    };
    let reloaded = ScenarioConfig::from_yaml_str(&cfg.to_yaml_string().unwrap()).unwrap();
    let rebuilt = reloaded.bodies[0].build().unwrap();

    assert_eq!(rebuilt.key, earth.key);
    assert_eq!(rebuilt.name, earth.name);
    assert_eq!(rebuilt.m, earth.m);
    assert_eq!(rebuilt.x, earth.x);
    assert_eq!(rebuilt.color, earth.color);
}

// ==================================================================================
// Presets
// ==================================================================================

#[test]
fn solar_system_preset() {
    let sys = presets::solar_system(GRAVITATIONAL_CONSTANT).unwrap();
    assert_eq!(sys.len(), 10);
    assert_eq!(sys.bodies[0].key, "sun");
    assert_eq!(sys.get("moon").unwrap().kind, BodyKind::Moon);
    assert_relative_eq!(sys.get("earth").unwrap().v.y, 29780.0, max_relative = 0.01);
    assert!(orbsim::find_collisions(&sys).is_empty());
}

#[test]
fn binary_preset_runs() {
    let mut scenario = Scenario::preset("binary_system", EngineConfig::default(), Parameters::default(), 5).unwrap();
    assert_eq!(scenario.system.len(), 4);

    let steps = scenario.steps;
    scenario.engine.run(&mut scenario.system, steps).unwrap();
    assert_eq!(scenario.system.t, 5.0 * 3600.0);

    match Scenario::preset("andromeda", EngineConfig::default(), Parameters::default(), 1) {
        Err(SimError::InvalidConfig(msg)) => {
            for name in presets::NAMES {
                assert!(msg.contains(name), "{msg}");
            }
        }
        Err(e) => panic!("unexpected error {e}"),
        Ok(_) => panic!("unknown preset accepted"),
    }
}

#[test]
fn every_preset_starts_without_overlaps() {
    for name in presets::NAMES {
        let scenario = Scenario::preset(name, EngineConfig::default(), Parameters::default(), 1).unwrap();
        assert!(find_collisions(&scenario.system).is_empty(), "{name} starts with overlapping bodies");
    }
}

#[test]
fn binary_preset_uses_metres_and_balanced_stars() {
    let sys = presets::binary_system(GRAVITATIONAL_CONSTANT).unwrap();
    let primary = sys.get("primary").unwrap();
    let secondary = sys.get("secondary").unwrap();

    assert_eq!(primary.radius, 6.9634e8);
    assert_eq!(sys.get("planet_a").unwrap().radius, 6.371e6);

    let p_stars = primary.m * primary.v + secondary.m * secondary.v;
    assert!(p_stars.norm() < 1e-12 * primary.m * primary.v.norm(), "{p_stars:?}");
}

#[test]
fn triple_preset_has_planet_on_circular_orbit_about_the_stars() {
    let sys = presets::triple_system(GRAVITATIONAL_CONSTANT).unwrap();
    assert_eq!(sys.keys().collect::<Vec<_>>(), ["star_1", "star_2", "star_3", "planet"]);

    let star_mass = 1.0e30 + 0.8e30 + 0.6e30;
    let planet = sys.get("planet").unwrap();
    assert_eq!(planet.kind, BodyKind::Planet);
    assert_relative_eq!(
        planet.v.norm(),
        circular_velocity(GRAVITATIONAL_CONSTANT, star_mass, 3.0e11),
        max_relative = 1e-12
    );

    // equilateral triangle
    let s = |k: &str| sys.get(k).unwrap().x;
    assert_relative_eq!((s("star_1") - s("star_2")).norm(), 1.0e11, max_relative = 1e-12);
    assert_relative_eq!((s("star_2") - s("star_3")).norm(), 1.0e11, max_relative = 1e-12);
    assert_relative_eq!((s("star_3") - s("star_1")).norm(), 1.0e11, max_relative = 1e-12);
}
