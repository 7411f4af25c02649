//! Export pipeline: calculate, acquire the logo, render, write.
//!
//! Rendering is I/O-agnostic; the logo comes through a [`LogoSource`] and artifacts
//! are written through a [`WritePort`].

use crate::ports::{LogoSource, WritePort};
use crate::settings::{ExportSettings, LogoFailurePolicy};
use camino::{Utf8Path, Utf8PathBuf};
use roimodel_domain::{DegenerateInput, calculate_with, degenerate_inputs, get_template};
use roimodel_render::{ExportError, ExportFormat, Logo, export};
use roimodel_types::{DepartmentResult, InputSnapshot};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Error type for pipeline results.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Outcome of [`run_export`].
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub result: DepartmentResult,
    pub artifacts: Vec<Artifact>,
    /// Zero or negative inputs; advisory only.
    pub warnings: Vec<DegenerateInput>,
    pub logo_embedded: bool,
}

/// Load the logo, waiting at most `timeout`.
///
/// Under [`LogoFailurePolicy::Skip`] a failed or late logo yields `Ok(None)`.
pub async fn acquire_logo(
    source: &dyn LogoSource,
    timeout: Duration,
    policy: LogoFailurePolicy,
) -> Result<Option<Logo>, ExportError> {
    let loaded = match tokio::time::timeout(timeout, source.load_logo()).await {
        Ok(Ok(bytes)) => Logo::from_jpeg(bytes),
        Ok(Err(err)) => Err(ExportError::LogoUnavailable {
            message: format!("{err:#}"),
        }),
        Err(_) => Err(ExportError::LogoTimeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    };

    match (loaded, policy) {
        (Ok(logo), _) => {
            debug!(width = logo.width(), height = logo.height(), "logo loaded");
            Ok(Some(logo))
        }
        (Err(err), LogoFailurePolicy::Skip) => {
            warn!(error = %err, "rendering report without logo");
            Ok(None)
        }
        (Err(err), LogoFailurePolicy::Fail) => Err(err),
    }
}

/// Calculate `snapshot` and render it in every format of `settings.formats`.
///
/// The caller writes the artifacts, via [`write_export_artifacts`] or otherwise.
pub async fn run_export(
    settings: &ExportSettings,
    snapshot: &InputSnapshot,
    logo: Option<&dyn LogoSource>,
) -> Result<ExportOutcome, PipelineError> {
    let department = snapshot.department;
    let template = get_template(department);
    let result = calculate_with(department, snapshot, &settings.calc);

    let warnings = degenerate_inputs(template, snapshot);
    for w in &warnings {
        debug!(key = %w.key, value = w.value, "degenerate input");
    }

    let wants_pdf = settings.formats.contains(&ExportFormat::Pdf);
    let logo = match logo {
        Some(source) if wants_pdf => {
            acquire_logo(source, settings.logo_timeout, settings.on_logo_failure).await?
        }
        _ => None,
    };

    let mut artifacts = Vec::with_capacity(settings.formats.len());
    for &format in &settings.formats {
        let bytes = export(format, department, snapshot, &result, template, logo.as_ref())?;
        artifacts.push(Artifact {
            format,
            file_name: format.file_name(department),
            bytes,
        });
    }

    Ok(ExportOutcome {
        result,
        artifacts,
        warnings,
        logo_embedded: logo.is_some(),
    })
}

/// Write every artifact into `out_dir`. Returns the written paths.
pub fn write_export_artifacts(
    outcome: &ExportOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    writer.create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(outcome.artifacts.len());
    for artifact in &outcome.artifacts {
        let path = out_dir.join(&artifact.file_name);
        writer.write_file(&path, &artifact.bytes)?;
        info!(format = %artifact.format, path = %path, bytes = artifact.bytes.len(), "wrote export");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticLogoSource;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use roimodel_domain::init_inputs;
    use roimodel_types::Department;

    struct SlowLogo;

    #[async_trait]
    impl LogoSource for SlowLogo {
        async fn load_logo(&self) -> anyhow::Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }
    }

    struct BrokenLogo;

    #[async_trait]
    impl LogoSource for BrokenLogo {
        async fn load_logo(&self) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("asset server unreachable")
        }
    }

    fn tiny_jpeg() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x02, 0x00, 0x04];
        bytes.extend([0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
        bytes.extend([0xFF, 0xD9]);
        bytes
    }

    fn pdf_only(policy: LogoFailurePolicy) -> ExportSettings {
        ExportSettings {
            formats: vec![ExportFormat::Pdf],
            logo_timeout: Duration::from_millis(20),
            on_logo_failure: policy,
            ..ExportSettings::default()
        }
    }

    #[tokio::test]
    async fn slow_logo_times_out_and_is_skipped() {
        let snap = init_inputs(Department::Support);
        let outcome = run_export(&pdf_only(LogoFailurePolicy::Skip), &snap, Some(&SlowLogo))
            .await
            .expect("export");
        assert!(!outcome.logo_embedded);
        assert_eq!(outcome.artifacts.len(), 1);
    }

    #[tokio::test]
    async fn slow_logo_fails_export_under_fail_policy() {
        let snap = init_inputs(Department::Support);
        let err = run_export(&pdf_only(LogoFailurePolicy::Fail), &snap, Some(&SlowLogo))
            .await
            .expect_err("timeout");
        assert!(matches!(
            err,
            PipelineError::Export(ExportError::LogoTimeout { timeout_ms: 20 })
        ));
    }

    #[tokio::test]
    async fn broken_logo_reports_source_error() {
        let err = acquire_logo(
            &BrokenLogo,
            Duration::from_secs(1),
            LogoFailurePolicy::Fail,
        )
        .await
        .expect_err("broken");
        assert!(err.to_string().contains("asset server unreachable"));
    }

    #[tokio::test]
    async fn valid_logo_is_embedded() {
        let snap = init_inputs(Department::Hr);
        let source = StaticLogoSource::new(tiny_jpeg());
        let outcome = run_export(&pdf_only(LogoFailurePolicy::Fail), &snap, Some(&source))
            .await
            .expect("export");
        assert!(outcome.logo_embedded);
    }

    #[tokio::test]
    async fn logo_is_not_loaded_without_pdf() {
        let snap = init_inputs(Department::Finance);
        let settings = ExportSettings {
            formats: vec![ExportFormat::Json, ExportFormat::Csv],
            on_logo_failure: LogoFailurePolicy::Fail,
            ..ExportSettings::default()
        };
        let outcome = run_export(&settings, &snap, Some(&BrokenLogo))
            .await
            .expect("export");
        let names: Vec<&str> = outcome
            .artifacts
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["finance_roi_results.json", "finance_roi_results.csv"]
        );
    }

    #[tokio::test]
    async fn degenerate_inputs_are_reported_not_fatal() {
        let mut snap = init_inputs(Department::Support);
        snap.fields
            .get_mut("aiImplementationCost")
            .expect("field")
            .value = 0.0;
        let settings = ExportSettings {
            formats: vec![ExportFormat::Json],
            ..ExportSettings::default()
        };
        let outcome = run_export(&settings, &snap, None).await.expect("export");
        assert_eq!(outcome.result.roi(), Some(0.0));
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.key == "aiImplementationCost")
        );
    }
}
