//! Clap-free settings for the scenario store and the export pipeline.

use camino::Utf8PathBuf;
use roimodel_domain::CalcOptions;
use roimodel_render::ExportFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound on waiting for the report logo.
pub const DEFAULT_LOGO_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for the file-backed scenario store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub dir: Utf8PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(".roimodel/scenarios"),
        }
    }
}

/// What to do when the logo cannot be loaded in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoFailurePolicy {
    /// Render the report without a logo.
    #[default]
    Skip,
    /// Fail the PDF export.
    Fail,
}

/// Settings for the export pipeline.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub out_dir: Utf8PathBuf,
    pub formats: Vec<ExportFormat>,

    // Logo
    pub logo_path: Option<Utf8PathBuf>,
    pub logo_timeout: Duration,
    pub on_logo_failure: LogoFailurePolicy,

    pub calc: CalcOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("artifacts/roimodel"),
            formats: ExportFormat::ALL.to_vec(),
            logo_path: None,
            logo_timeout: DEFAULT_LOGO_TIMEOUT,
            on_logo_failure: LogoFailurePolicy::default(),
            calc: CalcOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_export_everything_and_skip_missing_logos() {
        let settings = ExportSettings::default();
        assert_eq!(settings.formats.len(), 4);
        assert_eq!(settings.on_logo_failure, LogoFailurePolicy::Skip);
        assert_eq!(settings.logo_timeout, DEFAULT_LOGO_TIMEOUT);
    }

    #[test]
    fn failure_policy_parses_snake_case() {
        let policy: LogoFailurePolicy = serde_json::from_str("\"fail\"").expect("parse");
        assert_eq!(policy, LogoFailurePolicy::Fail);
    }
}
