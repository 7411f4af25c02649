//! Scenario input store: seeding, validated updates, unit toggles, department switches.

use crate::engine::{CalcOptions, calculate_with};
use crate::error::InputError;
use crate::templates::get_template;
use roimodel_types::{Department, DepartmentResult, FieldInput, InputSnapshot, UnitMode, fields};
use tracing::debug;

/// Fresh snapshot with every template field at its benchmark (or zero), in annual mode.
pub fn init_inputs(department: Department) -> InputSnapshot {
    let template = get_template(department);
    let mut snapshot = InputSnapshot::new(department);
    for field in template.fields {
        snapshot
            .fields
            .insert(field.key.to_string(), FieldInput::annual(field.default_value()));
    }
    snapshot
}

/// Bring a loaded snapshot in line with its template.
///
/// Unknown keys are dropped; missing keys are seeded from the benchmark.
pub fn reconcile(mut snapshot: InputSnapshot) -> InputSnapshot {
    let template = get_template(snapshot.department);
    snapshot.fields.retain(|key, _| {
        let known = template.has_field(key);
        if !known {
            debug!(key = %key, department = %template.department, "dropping unknown field");
        }
        known
    });
    for field in template.fields {
        snapshot
            .fields
            .entry(field.key.to_string())
            .or_insert_with(|| FieldInput::annual(field.default_value()));
    }
    snapshot
}

/// Write `value`, given in the field's current display unit, as the canonical annual value.
pub fn set_field(
    snapshot: &InputSnapshot,
    key: &str,
    value: f64,
) -> Result<InputSnapshot, InputError> {
    ensure_field(snapshot.department, key)?;
    let mut next = snapshot.clone();
    let unit = next.unit(key);
    next.fields.insert(
        key.to_string(),
        FieldInput {
            value: unit.to_annual(value),
            unit,
        },
    );
    Ok(next)
}

/// Change how a cost field is displayed. The stored annual value is unchanged.
pub fn set_unit_mode(
    snapshot: &InputSnapshot,
    key: &str,
    mode: UnitMode,
) -> Result<InputSnapshot, InputError> {
    ensure_field(snapshot.department, key)?;
    if !fields::is_unit_aware(key) {
        return Err(InputError::UnitModeUnsupported {
            key: key.to_string(),
        });
    }
    let mut next = snapshot.clone();
    let entry = next
        .fields
        .entry(key.to_string())
        .or_insert_with(|| FieldInput::annual(0.0));
    entry.unit = mode;
    Ok(next)
}

fn ensure_field(department: Department, key: &str) -> Result<(), InputError> {
    if get_template(department).has_field(key) {
        Ok(())
    } else {
        Err(InputError::InvalidField {
            department,
            key: key.to_string(),
        })
    }
}

/// The active department's mutable inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct InputStore {
    snapshot: InputSnapshot,
    options: CalcOptions,
}

impl InputStore {
    pub fn new(department: Department) -> Self {
        Self::with_options(department, CalcOptions::default())
    }

    pub fn with_options(department: Department, options: CalcOptions) -> Self {
        Self {
            snapshot: init_inputs(department),
            options,
        }
    }

    /// Adopt a previously saved snapshot after reconciling it with its template.
    pub fn from_snapshot(snapshot: InputSnapshot, options: CalcOptions) -> Self {
        Self {
            snapshot: reconcile(snapshot),
            options,
        }
    }

    pub fn department(&self) -> Department {
        self.snapshot.department
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> InputSnapshot {
        self.snapshot
    }

    pub fn options(&self) -> &CalcOptions {
        &self.options
    }

    pub fn set_field(&mut self, key: &str, value: f64) -> Result<(), InputError> {
        self.snapshot = set_field(&self.snapshot, key, value)?;
        Ok(())
    }

    pub fn set_unit_mode(&mut self, key: &str, mode: UnitMode) -> Result<(), InputError> {
        self.snapshot = set_unit_mode(&self.snapshot, key, mode)?;
        Ok(())
    }

    /// Value of `key` in its display unit.
    pub fn display_value(&self, key: &str) -> Option<f64> {
        self.snapshot.display_value(key)
    }

    /// Reset to `department`'s template defaults. The previous inputs are discarded.
    pub fn switch_department(&mut self, department: Department) {
        debug!(from = %self.snapshot.department, to = %department, "switching department");
        self.snapshot = init_inputs(department);
    }

    pub fn calculate(&self) -> DepartmentResult {
        calculate_with(self.snapshot.department, &self.snapshot, &self.options)
    }
}
