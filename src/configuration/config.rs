//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator choice and force-pass options
//! - [`ParametersConfig`] – step size, step count, output cadence and physical constants
//! - [`OutputConfig`]     – where the trajectory CSV goes and whether it carries energy
//! - [`BodyConfig`]       – initial state for each inline body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "euler", "semieuler"
//!   parallel: false
//!
//! parameters:
//!   h0: 0.001               # fixed step size
//!   steps: 10000            # number of steps
//!   output_every: 10        # steps between trajectory rows
//!   G: 1.0                  # gravitational constant
//!   eps2: 0.0               # softening epsilon^2
//!
//! output:
//!   trajectory: "results/trajectory.csv"
//!   include_energy: true
//!
//! bodies_file: "two_body.csv"   # optional, mass,x,y,vx,vy per line
//! bodies:
//!   - x: [ -0.5, 0.0 ]
//!     v: [  0.0, -0.7071067811865476 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0 ]
//!     v: [  0.0, 0.7071067811865476 ]
//!     m: 1.0
//! ```
//!
//! The engine then maps this configuration into its runtime `Scenario`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::simulation::integrator::Integrator;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: Integrator, // Time integrator used for advancing the system state
    #[serde(default)]
    pub parallel: bool, // `true` - shard the pair loop across rayon workers
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub h0: f64, // time step size
    pub steps: u64, // number of steps
    #[serde(default = "default_output_every")]
    pub output_every: u64, // steps between trajectory rows
    #[serde(default = "default_G")]
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening - prevent singular forces at very small separations
}

fn default_output_every() -> u64 {
    1
}

#[allow(non_snake_case)]
fn default_G() -> f64 {
    1.0
}

/// Trajectory output settings
#[derive(Deserialize, Debug, Clone)]
pub struct OutputConfig {
    pub trajectory: String, // path of the CSV trajectory file
    #[serde(default)]
    pub include_energy: bool, // append an E_total column
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position [x, y]
    pub v: Vec<f64>, // Initial velocity [vx, vy]
    pub m: f64,      // Mass of the body
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Integrator and force-pass options
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub output: OutputConfig, // Trajectory output
    #[serde(default)]
    pub bodies_file: Option<String>, // CSV with initial conditions, relative to the YAML file
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Inline bodies, inserted before the CSV ones
}

impl ScenarioConfig {
    /// Read and parse a scenario file. Does not validate.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open scenario file {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg = serde_yaml::from_reader(reader)
            .with_context(|| format!("could not parse scenario file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Check every field and report all violations at once
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        let p = &self.parameters;

        if !(p.h0 > 0.0) || !p.h0.is_finite() {
            problems.push(format!("h0 must be a finite value greater than 0, got {}", p.h0));
        }
        if p.steps == 0 {
            problems.push("steps must be greater than 0".to_string());
        }
        if p.output_every == 0 {
            problems.push("output_every must be greater than 0".to_string());
        }
        if !(p.eps2 >= 0.0) {
            problems.push(format!("eps2 must be >= 0, got {}", p.eps2));
        }
        if self.output.trajectory.trim().is_empty() {
            problems.push("output.trajectory is empty".to_string());
        }
        let no_file = self.bodies_file.as_deref().map_or(true, |f| f.trim().is_empty());
        if no_file && self.bodies.is_empty() {
            problems.push("no bodies: set bodies_file or list inline bodies".to_string());
        }
        for (i, b) in self.bodies.iter().enumerate() {
            if b.x.len() != 2 || b.v.len() != 2 {
                problems.push(format!("body {} needs 2-component x and v", i + 1));
            }
        }

        if !problems.is_empty() {
            bail!("invalid scenario:\n  {}", problems.join("\n  "));
        }
        Ok(())
    }
}
