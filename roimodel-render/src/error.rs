use thiserror::Error;

/// Failures surfaced to the caller instead of producing a corrupt artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialize {format} export: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },

    #[error("logo unavailable: {message}")]
    LogoUnavailable { message: String },

    #[error("logo load timed out after {timeout_ms} ms")]
    LogoTimeout { timeout_ms: u64 },

    #[error("pdf generation failed: {message}")]
    Pdf { message: String },
}

impl ExportError {
    /// True for failures caused by the logo asset rather than the report itself.
    pub fn is_logo_failure(&self) -> bool {
        matches!(
            self,
            ExportError::LogoUnavailable { .. } | ExportError::LogoTimeout { .. }
        )
    }
}
