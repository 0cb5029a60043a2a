use nbody2d::{Integrator, Scenario, ScenarioConfig, TrajectoryWriter};
use nbody2d::{bench_forces, bench_integrators};
use clap::Parser;
use anyhow::Result;

use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "2D Newtonian N-body simulator")]
struct Args {
    /// Scenario YAML; relative paths that do not exist are looked up in scenarios/
    #[arg(short, long = "file", default_value = "two_body.yaml")]
    file_name: PathBuf,

    /// Override the scenario's integrator (euler, semieuler, verlet)
    #[arg(long)]
    method: Option<Integrator>,

    /// Override the scenario's step count
    #[arg(long)]
    steps: Option<u64>,

    /// Open the 2D viewer instead of running headless
    #[arg(long)]
    view: bool,

    /// Time the integrators and force passes, then exit
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn resolve_scenario_path(file_name: &Path) -> PathBuf {
    if file_name.is_absolute() || file_name.exists() {
        return file_name.to_path_buf();
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let config_path = resolve_scenario_path(&args.file_name);
    let mut cfg = ScenarioConfig::from_path(&config_path)?;

    if let Some(method) = args.method {
        cfg.engine.integrator = method;
    }
    if let Some(steps) = args.steps {
        cfg.parameters.steps = steps;
    }

    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let scenario = Scenario::build_scenario(cfg, base_dir)?;
    tracing::info!(
        config = %config_path.display(),
        method = %scenario.engine.integrator,
        dt = scenario.parameters.h0,
        steps = scenario.parameters.steps,
        output_every = scenario.parameters.output_every,
        G = scenario.parameters.G,
        eps2 = scenario.parameters.eps2,
        trajectory = %scenario.trajectory.display(),
        include_energy = scenario.include_energy,
        "configuration loaded"
    );
    Ok(scenario)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_integrators();
        bench_forces();
        return Ok(());
    }

    // Refuse --view before anything touches the trajectory file
    if args.view && !cfg!(feature = "viewer") {
        anyhow::bail!("--view needs the `viewer` feature (cargo run --features viewer)");
    }

    let mut scenario = load_scenario(&args)?;
    let mut writer = TrajectoryWriter::create(&scenario.trajectory, scenario.include_energy)?;

    #[cfg(feature = "viewer")]
    if args.view {
        return nbody2d::run_2d(scenario, writer);
    }

    let summary = scenario.run(&mut writer)?;
    writer.finish()?;

    println!("Simulation finished.");
    println!("Steps: {}, dt: {}, method: {}", summary.steps, scenario.parameters.h0, scenario.engine.integrator);
    println!("Output written to {}.", scenario.trajectory.display());
    Ok(())
}
