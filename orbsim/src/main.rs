use orbsim::{
    bench_forces, bench_step, presets, BodyConfig, EngineConfig, Parameters, Scenario, ScenarioConfig, Scheme,
};

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeArg {
    Euler,
    Rk4,
}

impl From<SchemeArg> for Scheme {
    fn from(s: SchemeArg) -> Self {
        match s {
            SchemeArg::Euler => Scheme::Euler,
            SchemeArg::Rk4 => Scheme::Rk4,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML; bare file names are looked up in `scenarios/`
    #[arg(short, long, default_value = "two_body.yaml")]
    file: String,

    /// Run a built-in preset instead of a file
    #[arg(short, long, value_parser = PossibleValuesParser::new(presets::NAMES))]
    preset: Option<String>,

    /// Override the number of steps
    #[arg(short, long)]
    steps: Option<usize>,

    /// Override the step size in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Override the integration scheme
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,

    /// Print the final bodies as scenario YAML
    #[arg(long)]
    dump: bool,

    /// Run the timing benchmarks and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let mut config_path = PathBuf::from(file_name);
    if !config_path.exists() {
        config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    }
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn build(args: &Args) -> Result<Scenario> {
    let mut scenario = match &args.preset {
        Some(name) => Scenario::preset(name, EngineConfig::default(), Parameters::default(), 24 * 365)?,
        None => Scenario::build(load_scenario_from_yaml(&args.file)?)?,
    };

    if let Some(steps) = args.steps {
        scenario.steps = steps;
    }
    if let Some(dt) = args.dt {
        anyhow::ensure!(dt > 0.0, "dt must be positive, got {dt}");
        scenario.engine.params.dt = dt;
    }
    if let Some(scheme) = args.scheme {
        scenario.engine.scheme = scheme.into();
    }
    Ok(scenario)
}

fn run(args: Args) -> Result<()> {
    if args.bench {
        bench_forces()?;
        bench_step(args.steps.unwrap_or(100))?;
        return Ok(());
    }

    let Scenario { engine, mut system, steps } = build(&args)?;
    let initial = engine.diagnostics(&system);
    info!(bodies = system.len(), steps, dt = engine.params.dt, scheme = ?engine.scheme, "starting run");

    let report = engine.run(&mut system, steps)?;

    let last = engine.diagnostics(&system);
    info!(
        t = last.t,
        bodies = last.bodies,
        merges = report.merges.len(),
        energy_drift = last.relative_energy_drift(&initial),
        "run finished"
    );
    print!("{}", serde_yaml::to_string(&[&initial, &last])?);

    if args.dump {
        let bodies: Vec<BodyConfig> = system.bodies.iter().map(BodyConfig::from).collect();
        print!("{}", serde_yaml::to_string(&bodies)?);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
