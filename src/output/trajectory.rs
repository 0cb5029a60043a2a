//! CSV trajectory log
//!
//! Columns are `t`, then `x{i},y{i},vx{i},vy{i}` for every body in insertion
//! order (1-based), then `E_total` when energy is requested.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::simulation::states::GravitySystem;

pub struct TrajectoryWriter<W: Write> {
    out: W,
    include_energy: bool,
    wrote_header: bool,
    rows: u64,
}

impl TrajectoryWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`, making parent directories
    pub fn create(path: &Path, include_energy: bool) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("could not create output directory {}", dir.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("could not open output file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), include_energy))
    }
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(out: W, include_energy: bool) -> Self {
        Self {
            out,
            include_energy,
            wrote_header: false,
            rows: 0,
        }
    }

    /// Number of state rows written so far (header excluded)
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Write the header line; later calls do nothing
    pub fn write_header(&mut self, system: &GravitySystem) -> Result<()> {
        if self.wrote_header {
            return Ok(());
        }

        write!(self.out, "t")?;
        for i in 1..=system.body_count() {
            write!(self.out, ",x{i},y{i},vx{i},vy{i}")?;
        }
        if self.include_energy {
            write!(self.out, ",E_total")?;
        }
        writeln!(self.out)?;

        self.wrote_header = true;
        Ok(())
    }

    pub fn log_state(&mut self, t: f64, system: &GravitySystem) -> Result<()> {
        write!(self.out, "{t}")?;
        for b in system.bodies() {
            write!(self.out, ",{},{},{},{}", b.x.x, b.x.y, b.v.x, b.v.y)?;
        }
        if self.include_energy {
            write!(self.out, ",{}", system.total_energy())?;
        }
        writeln!(self.out)?;

        self.rows += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
