//! Report exporters for computed results.
//!
//! Every renderer is a read-only view over an already computed result; none of them
//! mutate the snapshot or the result.

mod csv;
mod document;
mod error;
mod json;
mod mailto;
mod pdf;

pub use csv::render_csv;
pub use document::{ReportDocument, executive_summary, format_amount, humanize_key};
pub use error::ExportError;
pub use json::render_json;
pub use mailto::render_mailto;
pub use pdf::{Logo, render_pdf};

use roimodel_types::{Department, DepartmentResult, InputSnapshot, Template, naming};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
    Pdf,
    Email,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Pdf,
        ExportFormat::Email,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Email => "email",
        }
    }

    pub fn file_name(self, department: Department) -> String {
        match self {
            ExportFormat::Json => naming::json_file_name(department),
            ExportFormat::Csv => naming::csv_file_name(department),
            ExportFormat::Pdf => naming::pdf_file_name(department),
            ExportFormat::Email => naming::share_file_name(department),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `result` in `format`.
///
/// `logo` is only used for PDF output; acquiring it is the caller's job.
pub fn export(
    format: ExportFormat,
    department: Department,
    snapshot: &InputSnapshot,
    result: &DepartmentResult,
    template: &Template,
    logo: Option<&Logo>,
) -> Result<Vec<u8>, ExportError> {
    debug!(format = %format, department = %department, "rendering export");
    match format {
        ExportFormat::Json => render_json(result).map(String::into_bytes),
        ExportFormat::Csv => Ok(render_csv(department, result).into_bytes()),
        ExportFormat::Pdf => {
            let doc = ReportDocument::build(template, snapshot, result);
            render_pdf(&doc, logo)
        }
        ExportFormat::Email => {
            let doc = ReportDocument::build(template, snapshot, result);
            Ok(render_mailto(&doc).into_bytes())
        }
    }
}
