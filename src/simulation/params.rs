//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - integration step size and step count,
//! - output cadence for the trajectory log,
//! - softening and gravitational constant (`eps2`, `G`)

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64, // step size
    pub steps: u64, // number of steps to run
    pub output_every: u64, // steps between trajectory samples
    pub eps2: f64, // softening
    pub G: f64, // gravitational constant
}
