use crate::{
    batch, catalog,
    config::{Config, RunConfig},
    converter::Converter,
    report::{JobEntry, RunReport},
    scan,
    util::{ensure_dir, now_rfc3339},
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Sequences the whole run: batch conversion, output tree scan, envelope
/// aggregation, catalog write. Jobs run one at a time on this thread; every
/// later stage assumes each job's files are complete before the next starts.
pub struct Pipeline<C: Converter> {
    cfg: Config,
    converter: C,
}

pub struct RunSummary {
    pub report: RunReport,
    pub catalog_path: PathBuf,
}

impl<C: Converter> Pipeline<C> {
    pub fn new(cfg: &Config, converter: C) -> Self {
        Self {
            cfg: cfg.clone(),
            converter,
        }
    }

    pub fn run(&self, run: &RunConfig) -> Result<RunSummary> {
        let started = now_rfc3339();

        ensure_dir(&run.output_dir)?;
        let outcomes = batch::run_batch(&self.cfg, run, &self.converter)?;
        let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
        info!("batch finished: {} jobs, {} failed", outcomes.len(), failed);

        let units = batch::list_output_units(&run.output_dir)?;
        let fragments = scan::find_fragments(&units, &self.cfg.converter.fragment_filename);
        info!(
            "found {} fragments across {} output units",
            fragments.len(),
            units.len()
        );

        let agg = catalog::aggregate(
            &run.output_dir,
            &fragments,
            &self.cfg.converter.fragment_filename,
        );
        let catalog_path = catalog::write_catalog(
            &run.output_dir,
            &self.cfg.output.catalog_filename,
            &agg.records,
        )?;
        info!(
            "catalog written: {} ({} records, {} skipped)",
            catalog_path.display(),
            agg.records.len(),
            agg.skipped.len()
        );

        let report = RunReport {
            started,
            finished: now_rfc3339(),
            jobs_attempted: outcomes.len(),
            jobs_failed: failed,
            fragments_found: fragments.len(),
            fragments_skipped: agg.skipped.len(),
            catalog_records: agg.records.len(),
            jobs: outcomes.iter().map(JobEntry::from_outcome).collect(),
        };

        Ok(RunSummary {
            report,
            catalog_path,
        })
    }
}
