//! Initial conditions from CSV
//!
//! One body per line, either `mass,x,y,vx,vy` or, with six or more columns,
//! `mass,x,y,speed,direction_deg,...` where the direction is measured in
//! degrees from +x. Blank lines and `#` comments are skipped, and so is any
//! line that is too short or does not parse. Only failing to open the file is
//! an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::simulation::states::{Body, NVec2};

pub fn load_bodies_csv(path: &Path) -> Result<Vec<Body>> {
    let file = File::open(path)
        .with_context(|| format!("could not open bodies file {}", path.display()))?;
    let bodies = parse_bodies_csv(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), count = bodies.len(), "loaded bodies");
    Ok(bodies)
}

/// Parse every well-formed line of `reader`, in order
pub fn parse_bodies_csv<R: BufRead>(reader: R) -> Result<Vec<Body>> {
    let mut bodies = Vec::new();

    // Raw byte lines: a record that is not UTF-8 is malformed, not an I/O error
    for (lineno, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            tracing::debug!(line = lineno + 1, "skipping non UTF-8 body record");
            continue;
        };
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_body_line(line) {
            Some(body) => bodies.push(body),
            None => tracing::debug!(line = lineno + 1, "skipping malformed body record"),
        }
    }

    Ok(bodies)
}

fn parse_body_line(line: &str) -> Option<Body> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    if tokens.len() < 5 {
        return None;
    }

    let num = |i: usize| tokens[i].parse::<f64>().ok();
    let m = num(0)?;
    let x = NVec2::new(num(1)?, num(2)?);

    let v = if tokens.len() == 5 {
        NVec2::new(num(3)?, num(4)?)
    } else {
        let speed = num(3)?;
        let direction = num(4)?.to_radians();
        NVec2::new(speed * direction.cos(), speed * direction.sin())
    };

    Some(Body::new(m, x, v))
}
