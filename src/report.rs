use crate::converter::{JobOutcome, JobStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started: String,
    pub finished: String,
    pub jobs_attempted: usize,
    pub jobs_failed: usize,
    pub fragments_found: usize,
    pub fragments_skipped: usize,
    pub catalog_records: usize,
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobEntry {
    pub unit: String,
    pub status: JobStatus,
    pub diagnostics: Option<String>,
}

impl JobEntry {
    pub fn from_outcome(outcome: &JobOutcome) -> Self {
        Self {
            unit: outcome.unit_name.clone(),
            status: outcome.status,
            diagnostics: outcome.diagnostics.clone(),
        }
    }
}
