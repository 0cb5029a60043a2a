//! Energy diagnostic
//!
//! Read-only kinetic + softened potential energy, used to judge how well an
//! integrator conserves the system's Hamiltonian

use crate::simulation::states::GravitySystem;

impl GravitySystem {
    /// Sum of 0.5 * m * |v|^2 over all bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.m * b.v.norm_squared())
            .sum()
    }

    /// Sum of -G m_i m_j / sqrt(|r_ij|^2 + eps2) over unordered pairs
    ///
    /// A pair whose softened distance is exactly zero contributes nothing.
    pub fn potential_energy(&self) -> f64 {
        let n = self.bodies.len();
        let mut potential = 0.0;

        for i in 0..n {
            let bi = &self.bodies[i];
            for j in (i + 1)..n {
                let bj = &self.bodies[j];
                let r = bj.x - bi.x;
                let dist = (r.x * r.x + r.y * r.y + self.eps2).sqrt();
                if dist > 0.0 {
                    potential -= self.g * bi.m * bj.m / dist;
                }
            }
        }

        potential
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
