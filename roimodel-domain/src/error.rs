use crate::sensitivity::SensitivityAxis;
use roimodel_types::Department;
use thiserror::Error;

/// Rejected input mutations. The snapshot is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("field '{key}' is not part of the {department} template")]
    InvalidField { department: Department, key: String },

    #[error("field '{key}' does not support a monthly/annual toggle")]
    UnitModeUnsupported { key: String },

    #[error("no {axis} control for the {department} department")]
    AxisUnavailable {
        department: Department,
        axis: SensitivityAxis,
    },
}
