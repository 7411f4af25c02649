use crate::Department;
use serde::Serialize;

/// How a field's value is entered and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    Text,
}

/// One input slot of a department template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Unique within its template.
    pub key: &'static str,
    pub label: &'static str,
    pub value_type: ValueType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_source: Option<&'static str>,
}

impl FieldSpec {
    /// Seed value for a fresh snapshot.
    pub fn default_value(&self) -> f64 {
        self.benchmark_value.unwrap_or(0.0)
    }
}

/// Field schema and benchmark data for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub department: Department,
    pub display_name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Template {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    /// Fields carrying a benchmark citation.
    pub fn benchmarks(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.fields
            .iter()
            .filter(|f| f.benchmark_value.is_some() || f.benchmark_source.is_some())
    }
}
