use super::{types::*, Converter};
use crate::{config::Config, job::Job};
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info, warn};

/// Gateway to the external polygon-city CLI. One synchronous process per job.
pub struct ProcessConverter {
    bin: PathBuf,
}

impl ProcessConverter {
    pub fn new(cfg: &Config) -> Result<Self> {
        let bin = resolve_bin(&cfg.converter.bin)?;
        Ok(Self { bin })
    }
}

fn resolve_bin(raw: &str) -> Result<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("converter.bin is empty");
    }
    let p = Path::new(raw);
    if p.components().count() > 1 {
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
        bail!("converter not found: {}", p.display());
    }
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(raw);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(anyhow!("converter not found on PATH: {raw}"))
}

impl Converter for ProcessConverter {
    fn doctor(&self) -> Result<ConverterDiag> {
        Ok(ConverterDiag {
            bin: self.bin.display().to_string(),
            ok: true,
        })
    }

    fn convert(&self, job: &Job) -> JobOutcome {
        info!("spawning {} for {}", self.bin.display(), job.unit_name);
        debug!(args = ?job.args, "converter arguments");

        // `output()` waits for exit and drains both pipes, so the unit's
        // files are fully written before the next job starts.
        let out = match Command::new(&self.bin)
            .args(&job.args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(out) => out,
            Err(err) => {
                warn!("job {} failed to spawn: {err}", job.unit_name);
                return JobOutcome {
                    unit_name: job.unit_name.clone(),
                    status: JobStatus::Failed,
                    output_dir: job.output_dir.clone(),
                    diagnostics: Some(format!("spawn failed: {err}")),
                };
            }
        };

        if out.status.success() {
            JobOutcome {
                unit_name: job.unit_name.clone(),
                status: JobStatus::Succeeded,
                output_dir: job.output_dir.clone(),
                diagnostics: None,
            }
        } else {
            let diag = describe_failure(&out.status, &out.stderr);
            warn!("job {} failed: {diag}", job.unit_name);
            JobOutcome {
                unit_name: job.unit_name.clone(),
                status: JobStatus::Failed,
                output_dir: job.output_dir.clone(),
                diagnostics: Some(diag),
            }
        }
    }

    fn resume(&self) -> Result<()> {
        info!("resuming existing converter jobs");
        let status = Command::new(&self.bin)
            .arg("resume")
            .status()
            .with_context(|| format!("spawning {} resume", self.bin.display()))?;
        if !status.success() {
            bail!("resume failed: {}", describe_status(&status));
        }
        Ok(())
    }
}

fn describe_failure(status: &ExitStatus, stderr: &[u8]) -> String {
    let mut diag = describe_status(status);
    let tail = stderr_tail(stderr);
    if !tail.is_empty() {
        diag.push_str("; stderr: ");
        diag.push_str(&tail);
    }
    diag
}

fn describe_status(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit code {code}");
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return format!("terminated by signal {sig}");
        }
    }
    "terminated abnormally".to_string()
}

fn stderr_tail(stderr: &[u8]) -> String {
    const MAX: usize = 1024;
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= MAX {
        return text.to_string();
    }
    let start = text.len() - MAX;
    // Keep the tail on a char boundary.
    let start = (start..text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(start);
    text[start..].to_string()
}
