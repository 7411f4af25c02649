use crate::Department;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Whether a cost field is displayed per year or per month.
///
/// The stored value is always annual; the mode only affects display and write-back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[default]
    Annual,
    Monthly,
}

impl UnitMode {
    /// Stored (annual) value as shown to the user.
    pub fn to_display(self, annual: f64) -> f64 {
        match self {
            UnitMode::Annual => annual,
            UnitMode::Monthly => annual / 12.0,
        }
    }

    /// User-entered value converted back to the canonical annual value.
    pub fn to_annual(self, display: f64) -> f64 {
        match self {
            UnitMode::Annual => display,
            UnitMode::Monthly => display * 12.0,
        }
    }
}

/// Coerce-not-fail numeric access: absent or non-finite values read as zero.
///
/// Every numeric read in the engine goes through this function.
pub fn as_number(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// A single field value. `value` is always the canonical (annual) number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldInput {
    #[serde(deserialize_with = "lenient_number")]
    pub value: f64,

    #[serde(default)]
    pub unit: UnitMode,
}

impl FieldInput {
    pub fn annual(value: f64) -> Self {
        Self {
            value,
            unit: UnitMode::Annual,
        }
    }

    pub fn display_value(&self) -> f64 {
        self.unit.to_display(self.value)
    }
}

/// Current field values for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSnapshot {
    pub department: Department,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldInput>,
}

impl InputSnapshot {
    pub fn new(department: Department) -> Self {
        Self {
            department,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldInput> {
        self.fields.get(key)
    }

    /// Canonical numeric value of `key`, zero when missing.
    pub fn number(&self, key: &str) -> f64 {
        as_number(self.fields.get(key).map(|f| f.value))
    }

    pub fn unit(&self, key: &str) -> UnitMode {
        self.fields.get(key).map(|f| f.unit).unwrap_or_default()
    }

    pub fn display_value(&self, key: &str) -> Option<f64> {
        self.fields.get(key).map(FieldInput::display_value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }
}

// Stored scenarios may carry numbers as strings or junk; those read as numbers or zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    Ok(as_number(parsed))
}
