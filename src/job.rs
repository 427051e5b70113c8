use crate::config::{Config, RunConfig};
use std::path::{Path, PathBuf};

/// One conversion job for one eligible input file. Built fresh per file,
/// consumed once by the converter gateway, never retained.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub unit_name: String,
    pub output_dir: PathBuf,
    pub args: Vec<String>,
}

impl Job {
    /// Pure function of (config, run config, file name). Returns `None` when
    /// the file's extension does not match the configured source extension.
    ///
    /// The argument order is the converter's wire contract:
    /// `-e <epsg> -m <key> [-p <prefix>] [-el <url>] [-w <url>] [-l <text>]
    ///  -o <output-dir> <input-file>`.
    pub fn from_file(cfg: &Config, run: &RunConfig, file_name: &str) -> Option<Job> {
        let path = Path::new(file_name);
        let ext = path.extension()?.to_str()?;
        if ext != cfg.converter.source_extension {
            return None;
        }
        let bare = path.file_stem()?.to_str()?;

        let unit_name = match &run.prefix {
            Some(prefix) => format!("{prefix}{bare}"),
            None => bare.to_string(),
        };
        let output_dir = run.output_dir.join(&unit_name);
        let input = run.input_dir.join(file_name);

        let mut args = vec![
            "-e".to_string(),
            run.epsg.clone(),
            "-m".to_string(),
            run.mapzen_key.clone(),
        ];
        if let Some(prefix) = &run.prefix {
            args.push("-p".to_string());
            args.push(prefix.clone());
        }
        if let Some(url) = &run.elevation_url {
            args.push("-el".to_string());
            args.push(url.clone());
        }
        if let Some(url) = &run.wof_url {
            args.push("-w".to_string());
            args.push(url.clone());
        }
        if let Some(text) = &run.license {
            args.push("-l".to_string());
            args.push(text.clone());
        }
        args.push("-o".to_string());
        args.push(output_dir.display().to_string());
        args.push(input.display().to_string());

        Some(Job {
            input,
            unit_name,
            output_dir,
            args,
        })
    }
}
