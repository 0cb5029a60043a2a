//! Pairwise Newtonian gravity for the 2D system
//!
//! Fills every body's force accumulator with the direct O(n^2) sum over
//! unordered pairs, either serially or sharded by row across rayon workers

use rayon::prelude::*;

use crate::simulation::states::{Body, GravitySystem, NVec2};

/// Softened gravitational force that body `j` exerts on body `i`
///
/// The returned vector points from `i` toward `j`; body `j` feels its exact
/// negation. With `eps2 == 0` and coincident bodies this divides by zero and
/// the resulting inf/NaN is returned as-is.
pub fn pair_force(bi: &Body, bj: &Body, g: f64, eps2: f64) -> NVec2 {
    // r is the displacement vector from i to j
    let r = bj.x - bi.x;

    // Softened squared distance: d2 = |r|^2 + eps2
    let d2 = r.x * r.x + r.y * r.y + eps2;

    // 1 / |r_soft| and 1 / |r_soft|^3
    let inv_r = 1.0 / d2.sqrt();
    let inv_r3 = inv_r * inv_r * inv_r;

    // |F| / |r| folded into one factor so the unnormalized r can be scaled
    // directly: F = G m_i m_j r / |r_soft|^3
    let force_mag = g * bi.m * bj.m * inv_r3;

    r * force_mag
}

impl GravitySystem {
    /// Recompute the force accumulator of every body at the current positions
    pub fn compute_forces(&mut self) {
        if self.parallel() {
            self.compute_forces_parallel();
        } else {
            self.compute_forces_serial();
        }
    }

    /// Single-threaded pair loop, the reference summation order
    pub fn compute_forces_serial(&mut self) {
        for b in self.bodies.iter_mut() {
            b.clear_force();
        }

        let n = self.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                let f = pair_force(&self.bodies[i], &self.bodies[j], self.g, self.eps2);

                // Equal and opposite: i is pulled along +r, j along -r
                self.bodies[i].add_force(f);
                self.bodies[j].add_force(-f);
            }
        }
    }

    /// Rayon pair loop
    ///
    /// Each worker folds its rows into a private buffer of length n, the
    /// buffers are summed, and only then written into the accumulators. Sums
    /// match the serial pass up to floating-point reassociation.
    pub fn compute_forces_parallel(&mut self) {
        let n = self.bodies.len();
        let (g, eps2) = (self.g, self.eps2);
        let bodies = &self.bodies;

        let totals = (0..n)
            .into_par_iter()
            .fold(
                || vec![NVec2::zeros(); n],
                |mut acc, i| {
                    for j in (i + 1)..n {
                        let f = pair_force(&bodies[i], &bodies[j], g, eps2);
                        acc[i] += f;
                        acc[j] -= f;
                    }
                    acc
                },
            )
            .reduce(
                || vec![NVec2::zeros(); n],
                |mut lhs, rhs| {
                    for (a, b) in lhs.iter_mut().zip(rhs.iter()) {
                        *a += *b;
                    }
                    lhs
                },
            );

        for (b, f) in self.bodies.iter_mut().zip(totals) {
            b.clear_force();
            b.add_force(f);
        }
    }
}
