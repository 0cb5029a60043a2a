//! High-level runtime engine settings
//!
//! Selects the integrator and the force pass used when running a `Scenario`

use crate::simulation::integrator::Integrator;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: Integrator, // euler, semieuler or verlet
    pub parallel: bool, // false = serial pair loop, true = rayon pair loop
}
