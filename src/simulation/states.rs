//! Core state types for the 2D N-body simulation.
//!
//! Defines the body and system structs:
//! - `NVec2` the 2D vector used for position, velocity and force
//! - `Body` one point mass with its per-pass force accumulator
//! - `GravitySystem` the ordered body list plus `G` and `eps2`
//!
//! Force computation, energy and the integrators live in their own modules
//! as further `impl GravitySystem` blocks.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub m: f64, // mass
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub f: NVec2, // force accumulator, only meaningful inside one force pass
}

impl Body {
    /// New body with a cleared force accumulator
    pub fn new(m: f64, x: NVec2, v: NVec2) -> Self {
        Self {
            m,
            x,
            v,
            f: NVec2::zeros(),
        }
    }

    pub fn clear_force(&mut self) {
        self.f = NVec2::zeros();
    }

    pub fn add_force(&mut self, f: NVec2) {
        self.f += f;
    }

    /// `f / m`, unguarded: a non-positive mass yields inf or NaN
    pub fn acceleration(&self) -> NVec2 {
        self.f / self.m
    }
}

/// 2D Newtonian gravity system
///
/// Owns every body for the lifetime of the run. Insertion order is the body's
/// identity and also fixes the pairwise summation order, so two systems built
/// from the same inputs step bit-for-bit identically (on the serial force path).
#[derive(Debug, Clone)]
pub struct GravitySystem {
    pub(crate) bodies: Vec<Body>, // insertion order = index = identity
    pub(crate) g: f64, // gravitational constant
    pub(crate) eps2: f64, // softening added to r^2
    parallel: bool, // use the rayon force pass
}

impl Default for GravitySystem {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl GravitySystem {
    pub fn new(g: f64, eps2: f64) -> Self {
        Self {
            bodies: Vec::new(),
            g,
            eps2,
            parallel: false,
        }
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn set_g(&mut self, g: f64) {
        self.g = g;
    }

    pub fn eps2(&self) -> f64 {
        self.eps2
    }

    pub fn set_eps2(&mut self, eps2: f64) {
        self.eps2 = eps2;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Switch `compute_forces` between the serial and the rayon pair loop
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}
