//! Configuration file loading for roimodel.
//!
//! Discovers and loads `roimodel.toml` from the working root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use roimodel_core::settings::{ExportSettings, LogoFailurePolicy, StoreSettings};
use roimodel_core::{CalcOptions, CostModel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "roimodel.toml";

/// Top-level configuration from roimodel.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoimodelConfig {
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub model: ModelConfig,
}

/// Scenario store section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON file per scenario.
    pub dir: Option<Utf8PathBuf>,
}

/// Export section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub out_dir: Option<Utf8PathBuf>,

    /// JPEG logo embedded in PDF reports.
    pub logo: Option<Utf8PathBuf>,

    pub logo_timeout_ms: Option<u64>,

    pub on_logo_failure: Option<LogoFailurePolicy>,
}

/// Calculation section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub cost_model: Option<CostModel>,
}

/// Discover the roimodel.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a roimodel.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<RoimodelConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<RoimodelConfig> {
    let config: RoimodelConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<RoimodelConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(RoimodelConfig::default()),
    }
}

/// Export flags as given on the command line; `None` means not given.
#[derive(Debug, Clone, Default)]
pub struct ExportOverrides {
    pub out_dir: Option<Utf8PathBuf>,
    pub logo: Option<Utf8PathBuf>,
    pub logo_timeout_ms: Option<u64>,
    pub on_logo_failure: Option<LogoFailurePolicy>,
}

/// Builder for merging config file with CLI arguments.
///
/// Relative paths from either source resolve against `root`.
pub struct ConfigMerger {
    config: RoimodelConfig,
    root: Utf8PathBuf,
}

impl ConfigMerger {
    pub fn new(config: RoimodelConfig, root: &Utf8Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    pub fn calc_options(&self, cli_cost_model: Option<CostModel>) -> CalcOptions {
        CalcOptions {
            cost_model: cli_cost_model
                .or(self.config.model.cost_model)
                .unwrap_or_default(),
        }
    }

    pub fn merge_store_args(&self, cli_dir: Option<&Utf8Path>) -> StoreSettings {
        let dir = cli_dir
            .map(Utf8Path::to_path_buf)
            .or_else(|| self.config.store.dir.clone())
            .unwrap_or_else(|| StoreSettings::default().dir);
        StoreSettings {
            dir: self.root.join(dir),
        }
    }

    pub fn merge_export_args(
        &self,
        cli: ExportOverrides,
        cli_cost_model: Option<CostModel>,
    ) -> ExportSettings {
        let defaults = ExportSettings::default();
        let export = &self.config.export;

        let out_dir = cli
            .out_dir
            .or_else(|| export.out_dir.clone())
            .unwrap_or(defaults.out_dir);
        let logo_path = cli
            .logo
            .or_else(|| export.logo.clone())
            .map(|p| self.root.join(p));
        let logo_timeout = cli
            .logo_timeout_ms
            .or(export.logo_timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.logo_timeout);
        let on_logo_failure = cli
            .on_logo_failure
            .or(export.on_logo_failure)
            .unwrap_or(defaults.on_logo_failure);

        ExportSettings {
            out_dir: self.root.join(out_dir),
            formats: defaults.formats,
            logo_path,
            logo_timeout,
            on_logo_failure,
            calc: self.calc_options(cli_cost_model),
        }
    }
}

/// Parse CLI params from key=value strings. Later entries win.
pub fn parse_cli_params(params: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for entry in params {
        let mut parts = entry.splitn(2, '=');
        let key = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid param '{}': missing key", entry))?;
        let value = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid param '{}': missing value", entry))?;
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}

/// [`parse_cli_params`] for numeric field values.
pub fn parse_field_values(params: &[String]) -> anyhow::Result<BTreeMap<String, f64>> {
    parse_cli_params(params)?
        .into_iter()
        .map(|(key, raw)| {
            let value = raw
                .parse::<f64>()
                .with_context(|| format!("invalid value for '{}': '{}'", key, raw))?;
            Ok((key, value))
        })
        .collect()
}
