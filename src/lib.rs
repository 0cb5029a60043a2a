pub mod simulation;
pub mod configuration;
pub mod output;
#[cfg(feature = "viewer")]
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, GravitySystem, NVec2};
pub use simulation::forces::pair_force;
pub use simulation::integrator::Integrator;
pub use simulation::scenario::{Scenario, RunSummary};
pub use configuration::config::{EngineConfig, ParametersConfig, OutputConfig, BodyConfig, ScenarioConfig};
pub use configuration::bodies::{load_bodies_csv, parse_bodies_csv};
pub use output::trajectory::TrajectoryWriter;
#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;
pub use benchmark::benchmark::{bench_integrators, bench_forces};
