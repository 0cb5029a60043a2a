//! Fixed-step time integrators for the 2D N-body system
//!
//! Provides explicit Euler, semi-implicit Euler and velocity-Verlet, all
//! driven by the system's own force accumulators. Each one advances every
//! body's position and velocity in place by `dt`; none of them touch `G` or
//! `eps2`.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::Deserialize;

use super::states::{GravitySystem, NVec2};

/// Which stepping scheme advances the system
/// Parsed case-insensitively: `"euler"`, `"semieuler"` or `"verlet"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum Integrator {
    Euler, // first order, energy drifts
    SemiEuler, // symplectic Euler, velocity first
    #[default]
    Verlet, // velocity Verlet, symplectic and time-reversible
}

impl Integrator {
    pub const ALL: [Integrator; 3] = [Integrator::Euler, Integrator::SemiEuler, Integrator::Verlet];

    pub fn name(self) -> &'static str {
        match self {
            Integrator::Euler => "euler",
            Integrator::SemiEuler => "semieuler",
            Integrator::Verlet => "verlet",
        }
    }

    /// Force passes per step
    pub fn force_evaluations(self) -> usize {
        match self {
            Integrator::Euler | Integrator::SemiEuler => 1,
            Integrator::Verlet => 2,
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Integrator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(Integrator::Euler),
            "semieuler" | "semi-euler" | "semi_euler" => Ok(Integrator::SemiEuler),
            "verlet" => Ok(Integrator::Verlet),
            other => bail!("method must be 'euler', 'semieuler' or 'verlet', got '{other}'"),
        }
    }
}

impl TryFrom<String> for Integrator {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl GravitySystem {
    /// Advance by one step of `dt` with the given scheme
    pub fn step(&mut self, integrator: Integrator, dt: f64) {
        match integrator {
            Integrator::Euler => self.step_euler(dt),
            Integrator::SemiEuler => self.step_semi_euler(dt),
            Integrator::Verlet => self.step_verlet(dt),
        }
    }

    /// Explicit Euler
    /// Positions move with the velocity from the start of the step,
    /// then velocities take the full kick
    pub fn step_euler(&mut self, dt: f64) {
        self.compute_forces();

        for b in self.bodies.iter_mut() {
            let a = b.acceleration();
            // x_n+1 = x_n + dt v_n
            b.x += b.v * dt;
            // v_n+1 = v_n + dt a_n
            b.v += a * dt;
        }
    }

    /// Semi-implicit (symplectic) Euler
    /// Velocities take the kick first, positions move with the new velocity
    pub fn step_semi_euler(&mut self, dt: f64) {
        self.compute_forces();

        for b in self.bodies.iter_mut() {
            let a = b.acceleration();
            // v_n+1 = v_n + dt a_n
            b.v += a * dt;
            // x_n+1 = x_n + dt v_n+1
            b.x += b.v * dt;
        }
    }

    /// Velocity-Verlet
    /// Uses two force evaluations per step. Does nothing for an empty system.
    pub fn step_verlet(&mut self, dt: f64) {
        let n = self.bodies.len();
        if n == 0 { // no bodies, return
            return;
        }

        // a_n from x_n
        self.compute_forces();
        let a_old: Vec<NVec2> = self.bodies.iter().map(|b| b.acceleration()).collect();

        // Drift: x_n+1 = x_n + dt v_n + (1/2) dt^2 a_n
        for (b, a) in self.bodies.iter_mut().zip(a_old.iter()) {
            b.x += b.v * dt + *a * (0.5 * dt * dt);
        }

        // a_n+1 from x_n+1
        self.compute_forces();

        // Kick with the average: v_n+1 = v_n + (1/2) dt (a_n + a_n+1)
        for (b, a) in self.bodies.iter_mut().zip(a_old.iter()) {
            let a_new = b.acceleration();
            b.v += (*a + a_new) * (0.5 * dt);
        }
    }
}
