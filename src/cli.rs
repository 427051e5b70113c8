use crate::{
    config::{Config, RunConfig},
    converter::{Converter, ProcessConverter},
    pipeline::Pipeline,
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "polygon-batch")]
#[command(about = "Batch driver for the polygon-city converter (GML -> GeoJSON + combined spatial index)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./polygon-batch.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the external converter is resolvable.
    Doctor {},
    /// Convert every eligible file in a directory and build the combined index.
    Run {
        /// Directory containing the GML source files.
        input: PathBuf,
        /// EPSG code for the input data.
        #[arg(short, long)]
        epsg: String,
        /// Mapzen Elevation API key.
        #[arg(short, long)]
        mapzen: String,
        /// Output directory.
        #[arg(short, long)]
        output: PathBuf,
        /// Prefix for building IDs.
        #[arg(short, long)]
        prefix: Option<String>,
        /// Elevation endpoint.
        #[arg(long)]
        elevation: Option<String>,
        /// Who's On First endpoint.
        #[arg(short, long)]
        wof: Option<String>,
        /// License text.
        #[arg(short, long)]
        license: Option<String>,
    },
    /// Resume processing of existing converter jobs.
    Resume {},
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;

    match &args.cmd {
        Command::Doctor {} => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            doctor(&cfg)
        }
        Command::Resume {} => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            let converter = ProcessConverter::new(&cfg)?;
            converter.resume()
        }
        Command::Run {
            input,
            epsg,
            mapzen,
            output,
            prefix,
            elevation,
            wof,
            license,
        } => {
            let run = RunConfig {
                epsg: epsg.clone(),
                mapzen_key: mapzen.clone(),
                prefix: prefix.clone(),
                elevation_url: elevation.clone(),
                wof_url: wof.clone(),
                license: license.clone(),
                input_dir: input.clone(),
                output_dir: output.clone(),
            };
            run_cmd(&args, &cfg, &run)
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("polygon-batch.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("polygon-batch.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config) -> Result<()> {
    let converter = ProcessConverter::new(cfg)?;
    let diag = converter.doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn run_cmd(args: &Args, cfg: &Config, run: &RunConfig) -> Result<()> {
    run.validate()?;
    ensure_dir(&run.output_dir)?;

    let log_path = resolve_log_path(cfg, Some(&run.output_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!(
        "epsg={} input={} output={}",
        run.epsg,
        run.input_dir.display(),
        run.output_dir.display()
    );
    if let Some(prefix) = &run.prefix {
        info!("prefix={prefix}");
    }

    // Resolving the converter binary up front keeps "tool missing" a fatal
    // precondition instead of N identical job failures.
    let converter = ProcessConverter::new(cfg)?;
    let pipeline = Pipeline::new(cfg, converter);
    let summary = pipeline.run(run)?;

    if cfg.output.write_report_json {
        std::fs::write(
            run.output_dir.join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&summary.report)?,
        )?;
    }

    if cfg.output.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "catalog": summary.catalog_path,
                "jobs_attempted": summary.report.jobs_attempted,
                "jobs_failed": summary.report.jobs_failed,
                "catalog_records": summary.report.catalog_records,
            }))?
        );
    }

    Ok(())
}

fn resolve_log_path(cfg: &Config, out_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    // A file at the output root is not an output unit; a logs/ subdirectory
    // would show up in the unit listing.
    if let Some(out_dir) = out_dir {
        return Some(out_dir.join("polygon-batch.log"));
    }

    Some(PathBuf::from("polygon-batch.log"))
}
