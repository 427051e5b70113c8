use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: Converter,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            converter: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Converter {
    pub bin: String,
    /// Extension of eligible geometry sources, matched exactly (case-sensitive).
    pub source_extension: String,
    /// Per-unit index file the converter leaves inside each output directory.
    pub fragment_filename: String,
}
impl Default for Converter {
    fn default() -> Self {
        Self {
            bin: "polygon-city".into(),
            source_extension: "gml".into(),
            fragment_filename: "index.geojson".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    pub catalog_filename: String,
    pub write_report_json: bool,
    pub report_filename: String,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            catalog_filename: "index.geojson".into(),
            write_report_json: true,
            report_filename: "report.json".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}

/// Immutable configuration for one batch run. Validated once before any job
/// starts, never re-checked per file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub epsg: String,
    pub mapzen_key: String,
    pub prefix: Option<String>,
    pub elevation_url: Option<String>,
    pub wof_url: Option<String>,
    pub license: Option<String>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epsg.trim().is_empty() {
            bail!("EPSG code not specified");
        }
        if self.mapzen_key.trim().is_empty() {
            bail!("Mapzen Elevation key not specified");
        }
        if self.input_dir.as_os_str().is_empty() {
            bail!("input directory not specified");
        }
        if self.output_dir.as_os_str().is_empty() {
            bail!("output directory not specified");
        }
        Ok(())
    }
}
