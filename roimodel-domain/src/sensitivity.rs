//! Sensitivity controls: each axis drives exactly one snapshot field and recalculates.

use crate::error::InputError;
use crate::inputs::InputStore;
use crate::templates::get_template;
use roimodel_types::{Department, DepartmentResult, UnitMode, fields};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityAxis {
    ImplementationCost,
    HumanCost,
    Volume,
}

impl SensitivityAxis {
    pub const ALL: [SensitivityAxis; 3] = [
        SensitivityAxis::ImplementationCost,
        SensitivityAxis::HumanCost,
        SensitivityAxis::Volume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SensitivityAxis::ImplementationCost => "implementation-cost",
            SensitivityAxis::HumanCost => "human-cost",
            SensitivityAxis::Volume => "volume",
        }
    }
}

impl fmt::Display for SensitivityAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive slider bounds, in the field's display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// One evaluated point of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub value: f64,
    pub result: DepartmentResult,
}

/// Monthly-volume field for `department`; the name differs per template.
pub fn volume_field(department: Department) -> Option<&'static str> {
    match department {
        Department::Support => Some("ticketsPerMonth"),
        Department::Hr => Some("requestsPerMonth"),
        Department::Finance => Some("invoicesPerMonth"),
        Department::Sales | Department::Mortgage => Some("leadsPerMonth"),
        Department::Custom => None,
    }
}

/// Field driven by `axis`, if `department`'s template has one.
pub fn axis_field(department: Department, axis: SensitivityAxis) -> Result<&'static str, InputError> {
    let key = match axis {
        SensitivityAxis::ImplementationCost => Some(fields::AI_IMPLEMENTATION_COST),
        SensitivityAxis::HumanCost => Some(fields::HUMAN_ANNUAL_COST),
        SensitivityAxis::Volume => volume_field(department),
    };
    key.filter(|k| get_template(department).has_field(k))
        .ok_or(InputError::AxisUnavailable { department, axis })
}

/// Bounds for `axis` given the driven field's unit mode.
pub fn axis_range(axis: SensitivityAxis, unit: UnitMode) -> AxisRange {
    let annual = match axis {
        SensitivityAxis::ImplementationCost => AxisRange {
            min: 0.0,
            max: 1_000_000.0,
        },
        SensitivityAxis::HumanCost => AxisRange {
            min: 20_000.0,
            max: 300_000.0,
        },
        SensitivityAxis::Volume => {
            return AxisRange {
                min: 0.0,
                max: 100_000.0,
            };
        }
    };
    AxisRange {
        min: unit.to_display(annual.min),
        max: unit.to_display(annual.max),
    }
}

/// Move one slider to `value` (display unit, clamped) and recalculate.
pub fn apply(
    store: &mut InputStore,
    axis: SensitivityAxis,
    value: f64,
) -> Result<DepartmentResult, InputError> {
    let key = axis_field(store.department(), axis)?;
    let range = axis_range(axis, store.snapshot().unit(key));
    let clamped = range.clamp(value);
    debug!(axis = %axis, field = key, requested = value, applied = clamped, "sensitivity step");
    store.set_field(key, clamped)?;
    Ok(store.calculate())
}

/// Evaluate `steps` evenly spaced values of `axis` between `from` and `to`.
///
/// Works on a copy; the caller's store is not modified.
pub fn sweep(
    store: &InputStore,
    axis: SensitivityAxis,
    from: f64,
    to: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, InputError> {
    let key = axis_field(store.department(), axis)?;
    let range = axis_range(axis, store.snapshot().unit(key));
    let (from, to) = (range.clamp(from), range.clamp(to));

    let mut points = Vec::with_capacity(steps);
    let mut scratch = store.clone();
    for i in 0..steps {
        let value = if steps <= 1 {
            from
        } else {
            from + (to - from) * (i as f64) / ((steps - 1) as f64)
        };
        let result = apply(&mut scratch, axis, value)?;
        points.push(SweepPoint { value, result });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::init_inputs;

    #[test]
    fn volume_field_exists_in_template() {
        for d in Department::ALL {
            if let Some(key) = volume_field(d) {
                assert!(get_template(d).has_field(key), "{d}.{key}");
            }
        }
    }

    #[test]
    fn custom_has_no_controls() {
        for axis in SensitivityAxis::ALL {
            assert!(matches!(
                axis_field(Department::Custom, axis),
                Err(InputError::AxisUnavailable { .. })
            ));
        }
    }

    #[test]
    fn apply_touches_only_the_driven_field() {
        let mut store = InputStore::new(Department::Support);
        let before = store.snapshot().clone();
        apply(&mut store, SensitivityAxis::Volume, 4000.0).expect("apply");

        let after = store.snapshot();
        for (key, input) in &after.fields {
            if key == "ticketsPerMonth" {
                assert_eq!(input.value, 4000.0);
            } else {
                assert_eq!(Some(input), before.get(key), "{key} changed");
            }
        }
    }

    #[test]
    fn apply_clamps_to_range() {
        let mut store = InputStore::new(Department::Sales);
        apply(&mut store, SensitivityAxis::ImplementationCost, 5_000_000.0).expect("apply");
        assert_eq!(
            store.snapshot().number(fields::AI_IMPLEMENTATION_COST),
            1_000_000.0
        );
        apply(&mut store, SensitivityAxis::HumanCost, 1.0).expect("apply");
        assert_eq!(store.snapshot().number(fields::HUMAN_ANNUAL_COST), 20_000.0);
    }

    #[test]
    fn human_cost_range_follows_unit_mode() {
        let mut store = InputStore::new(Department::Hr);
        store
            .set_unit_mode(fields::HUMAN_ANNUAL_COST, UnitMode::Monthly)
            .expect("toggle");
        apply(&mut store, SensitivityAxis::HumanCost, 5_000.0).expect("apply");
        assert_eq!(store.snapshot().number(fields::HUMAN_ANNUAL_COST), 60_000.0);

        let range = axis_range(SensitivityAxis::HumanCost, UnitMode::Monthly);
        assert_eq!(range.max, 25_000.0);
    }

    #[test]
    fn sweep_leaves_store_untouched() {
        let store = InputStore::new(Department::Support);
        let points = sweep(&store, SensitivityAxis::ImplementationCost, 0.0, 100_000.0, 5)
            .expect("sweep");
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[4].value, 100_000.0);
        assert_eq!(points[0].result.roi(), Some(0.0));
        assert_eq!(store.snapshot(), &init_inputs(Department::Support));
    }
}
