use std::time::Instant;

use crate::simulation::integrator::Integrator;
use crate::simulation::states::{Body, GravitySystem, NVec2};

/// Helper to build a manual system of size `n`
/// Bodies sit on a perturbed ring so no two coincide; no rand needed
pub fn make_system(n: usize, parallel: bool) -> GravitySystem {
    let mut sys = GravitySystem::new(1.0, 1e-4);
    sys.set_parallel(parallel);

    for i in 0..n {
        let i_f = i as f64;
        let angle = i_f * std::f64::consts::TAU / n as f64;
        let radius = 1.0 + 0.1 * (i_f * 0.37).sin();
        let x = NVec2::new(radius * angle.cos(), radius * angle.sin());
        // slow tangential drift
        let v = NVec2::new(-angle.sin(), angle.cos()) * 0.1;

        sys.add_body(Body::new(1.0 / n as f64, x, v));
    }

    sys
}

/// Mean seconds per step for each integrator over a range of N
/// Prints CSV `N,method,seconds`
pub fn bench_integrators() {
    println!("N,method,seconds");

    for n in [100, 200, 400, 800, 1600] {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 400 { 20 } else { 3 };

        for method in Integrator::ALL {
            let mut sys = make_system(n, false);

            // Warm-up
            sys.step(method, 1e-3);

            let t0 = Instant::now();
            for _ in 0..steps {
                sys.step(method, 1e-3);
            }
            let per_step = t0.elapsed().as_secs_f64() / steps as f64;

            println!("{},{},{:.9}", n, method, per_step);
        }
    }
}

/// Serial versus rayon force pass
pub fn bench_forces() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let mut serial = make_system(n, false);
        let mut parallel = make_system(n, true);

        // Warm up
        serial.compute_forces();
        parallel.compute_forces();

        let t0 = Instant::now();
        serial.compute_forces();
        let dt_serial = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        parallel.compute_forces();
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s", dt_serial, dt_parallel);
    }
}
