pub mod process;
pub mod types;

use crate::job::Job;
use anyhow::Result;

pub use process::ProcessConverter;
pub use types::{ConverterDiag, JobOutcome, JobStatus};

pub trait Converter {
    fn doctor(&self) -> Result<ConverterDiag>;
    /// Runs one job to completion, blocking until the external process exits
    /// and its pipes are drained. Process failure is an outcome, not an error.
    fn convert(&self, job: &Job) -> JobOutcome;
    /// Triggers the converter's own resume mode; no further arguments.
    fn resume(&self) -> Result<()>;
}
