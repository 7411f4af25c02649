use crate::ExportError;
use roimodel_types::DepartmentResult;

/// The result object alone, pretty-printed with two-space indentation.
pub fn render_json(result: &DepartmentResult) -> Result<String, ExportError> {
    serde_json::to_string_pretty(result).map_err(|e| ExportError::Serialize {
        format: "json",
        message: e.to_string(),
    })
}
