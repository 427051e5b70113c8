use crate::{
    config::{Config, RunConfig},
    converter::{Converter, JobOutcome},
    job::Job,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs one conversion job per eligible input file, strictly sequentially in
/// discovery order. A failed job is recorded and the batch keeps going; only
/// an unlistable input directory or invalid run config is fatal, and both are
/// checked before any job starts.
pub fn run_batch<C: Converter>(
    cfg: &Config,
    run: &RunConfig,
    converter: &C,
) -> Result<Vec<JobOutcome>> {
    run.validate()?;

    let files = list_input_files(&run.input_dir)?;
    let mut outcomes = Vec::new();

    for name in &files {
        let Some(job) = Job::from_file(cfg, run, name) else {
            continue;
        };
        info!("converting {} -> {}", name, job.output_dir.display());
        outcomes.push(converter.convert(&job));
    }

    Ok(outcomes)
}

fn list_input_files(input_dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("reading input directory: {}", input_dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| "reading input directory entry")?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    // read_dir order is platform-dependent; sort so discovery order (and the
    // catalog built from it) is reproducible across runs.
    names.sort();
    Ok(names)
}

/// Output units are the directories directly under the output root; files at
/// the root (the catalog itself, the run report) are not units.
pub fn list_output_units(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(output_dir)
        .with_context(|| format!("reading output directory: {}", output_dir.display()))?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| "reading output directory entry")?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        if file_type.is_dir() {
            units.push(entry.path());
        }
    }
    units.sort();
    Ok(units)
}
