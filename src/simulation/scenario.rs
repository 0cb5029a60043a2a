//! Build and drive fully-initialized simulation scenarios from configuration
//!
//! Takes a validated `ScenarioConfig` (YAML-facing) and produces the runtime
//! bundle `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`GravitySystem` with bodies at t = 0)
//! - the elapsed time and completed step count
//!
//! The headless driver (`Scenario::run`) and the viewer both advance the
//! scenario through `Scenario::advance`, so they share the same cadence.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::configuration::bodies::load_bodies_csv;
use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::output::trajectory::TrajectoryWriter;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, GravitySystem, NVec2};

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: GravitySystem,
    pub trajectory: PathBuf, // resolved trajectory CSV path
    pub include_energy: bool,
    pub t: f64, // elapsed simulated time
    pub step: u64, // completed steps
}

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub t: f64,
    pub samples: u64,
    pub initial_energy: f64,
    pub final_energy: f64,
}

impl RunSummary {
    /// (E - E0) / |E0 + 1e-12|
    pub fn relative_drift(&self) -> f64 {
        relative_drift(self.initial_energy, self.final_energy)
    }
}

pub fn relative_drift(e0: f64, e: f64) -> f64 {
    (e - e0) / (e0 + 1e-12).abs()
}

impl Scenario {
    /// Validate `cfg` and build the runtime scenario
    ///
    /// Relative `bodies_file` and `output.trajectory` paths are resolved
    /// against `base_dir` (normally the directory holding the YAML file).
    pub fn build_scenario(cfg: ScenarioConfig, base_dir: &Path) -> Result<Self> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            h0: p_cfg.h0,
            steps: p_cfg.steps,
            output_every: p_cfg.output_every,
            eps2: p_cfg.eps2,
            G: p_cfg.G,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            integrator: cfg.engine.integrator,
            parallel: cfg.engine.parallel,
        };

        let mut system = GravitySystem::new(parameters.G, parameters.eps2);
        system.set_parallel(engine.parallel);

        // Inline bodies first, then the CSV ones, both in file order
        for bc in &cfg.bodies {
            system.add_body(body_from_config(bc));
        }
        if let Some(file) = cfg.bodies_file.as_deref().filter(|f| !f.trim().is_empty()) {
            for body in load_bodies_csv(&base_dir.join(file))? {
                system.add_body(body);
            }
        }

        if system.body_count() == 0 {
            bail!("simulation has no bodies loaded");
        }

        Ok(Self {
            engine,
            parameters,
            system,
            trajectory: base_dir.join(&cfg.output.trajectory),
            include_energy: cfg.output.include_energy,
            t: 0.0,
            step: 0,
        })
    }

    pub fn finished(&self) -> bool {
        self.step >= self.parameters.steps
    }

    /// Advance the system by one step of `h0` with the configured integrator
    pub fn advance(&mut self) {
        self.system.step(self.engine.integrator, self.parameters.h0);
        self.t += self.parameters.h0;
        self.step += 1;
    }

    /// Whether the state after the latest step should be logged
    pub fn sample_due(&self) -> bool {
        self.step % self.parameters.output_every == 0
    }

    /// Run every remaining step, logging the initial state and every
    /// `output_every`-th step to `writer`
    pub fn run<W: Write>(&mut self, writer: &mut TrajectoryWriter<W>) -> Result<RunSummary> {
        let initial_energy = self.system.total_energy();

        writer.write_header(&self.system)?;
        if self.step == 0 {
            writer.log_state(self.t, &self.system)?;
        }

        tracing::info!(
            method = %self.engine.integrator,
            dt = self.parameters.h0,
            steps = self.parameters.steps,
            bodies = self.system.body_count(),
            energy = initial_energy,
            "starting run"
        );

        // Progress roughly every tenth of the run
        let report_every = (self.parameters.steps / 10).max(1);

        while !self.finished() {
            self.advance();
            if self.sample_due() {
                writer.log_state(self.t, &self.system)?;
            }
            if self.step % report_every == 0 {
                tracing::debug!(
                    step = self.step,
                    t = self.t,
                    energy = self.system.total_energy(),
                    "progress"
                );
            }
        }
        writer.flush()?;

        let summary = RunSummary {
            steps: self.step,
            t: self.t,
            samples: writer.rows(),
            initial_energy,
            final_energy: self.system.total_energy(),
        };

        tracing::info!(
            steps = summary.steps,
            t = summary.t,
            samples = summary.samples,
            drift = summary.relative_drift(),
            "run finished"
        );

        Ok(summary)
    }
}

fn body_from_config(bc: &BodyConfig) -> Body {
    Body::new(
        bc.m,
        NVec2::new(bc.x[0], bc.x[1]),
        NVec2::new(bc.v[0], bc.v[1]),
    )
}
