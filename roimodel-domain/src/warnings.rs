use roimodel_types::{InputSnapshot, Template, ValueType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateKind {
    Zero,
    Negative,
}

/// Advisory flag for a numeric input that is zero or negative.
///
/// Never blocks calculation or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegenerateInput {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub kind: DegenerateKind,
}

/// Numeric fields of `template` whose value in `snapshot` is zero or negative.
pub fn degenerate_inputs(template: &Template, snapshot: &InputSnapshot) -> Vec<DegenerateInput> {
    template
        .fields
        .iter()
        .filter(|f| f.value_type == ValueType::Number)
        .filter_map(|f| {
            let value = snapshot.number(f.key);
            let kind = if value < 0.0 {
                DegenerateKind::Negative
            } else if value == 0.0 {
                DegenerateKind::Zero
            } else {
                return None;
            };
            Some(DegenerateInput {
                key: f.key,
                label: f.label,
                value,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get_template, init_inputs, set_field};
    use roimodel_types::Department;

    #[test]
    fn benchmarks_are_not_degenerate() {
        for d in Department::ALL {
            assert!(degenerate_inputs(get_template(d), &init_inputs(d)).is_empty(), "{d}");
        }
    }

    #[test]
    fn flags_zero_and_negative() {
        let snap = init_inputs(Department::Support);
        let snap = set_field(&snap, "ticketsPerMonth", 0.0).expect("set");
        let snap = set_field(&snap, "avgHandleTime", -2.0).expect("set");

        let flagged = degenerate_inputs(get_template(Department::Support), &snap);
        assert_eq!(flagged.len(), 2);
        let tickets = flagged.iter().find(|w| w.key == "ticketsPerMonth").expect("tickets");
        assert_eq!(tickets.kind, DegenerateKind::Zero);
        let handle = flagged.iter().find(|w| w.key == "avgHandleTime").expect("handle");
        assert_eq!(handle.kind, DegenerateKind::Negative);
    }

    #[test]
    fn only_fields_of_the_given_template_are_checked() {
        let snap = init_inputs(Department::Support);
        let flagged = degenerate_inputs(get_template(Department::Sales), &snap);
        // Sales keys missing from a support snapshot read as zero.
        assert!(flagged.iter().any(|w| w.key == "leadsPerMonth"));
        assert!(flagged.iter().all(|w| w.key != "ticketsPerMonth"));
    }
}
