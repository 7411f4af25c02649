//! Shared DTOs (schemas-as-code) for the roimodel workspace.
//!
//! # Design constraints
//! - Snapshots and scenarios are written to a persistent store and must round-trip losslessly.
//! - Results are derived data: they serialize for export but are never read back.
//! - Prefer adding optional fields over changing semantics.

pub mod department;
pub mod result;
pub mod scenario;
pub mod snapshot;
pub mod template;

pub use department::{Department, UnknownDepartment};
pub use result::{
    CustomResult, DepartmentResult, FinanceResult, HrResult, MortgageResult, SalesResult,
    SupportResult,
};
pub use scenario::Scenario;
pub use snapshot::{FieldInput, InputSnapshot, UnitMode, as_number};
pub use template::{FieldSpec, Template, ValueType};

/// Well-known field keys shared by several templates.
pub mod fields {
    pub const HUMAN_ANNUAL_COST: &str = "humanAnnualCost";
    pub const AI_IMPLEMENTATION_COST: &str = "aiImplementationCost";

    /// Fields that accept a monthly/annual unit toggle.
    pub const UNIT_AWARE: &[&str] = &[HUMAN_ANNUAL_COST, AI_IMPLEMENTATION_COST];

    pub fn is_unit_aware(key: &str) -> bool {
        UNIT_AWARE.contains(&key)
    }
}

/// Storage keys and artifact file names.
pub mod naming {
    use crate::Department;

    pub const SCENARIO_KEY_PREFIX: &str = "roi-scenario-";

    pub fn scenario_key(name: &str) -> String {
        format!("{SCENARIO_KEY_PREFIX}{name}")
    }

    /// Inverse of [`scenario_key`]; `None` for keys outside the scenario namespace.
    pub fn scenario_name(key: &str) -> Option<&str> {
        key.strip_prefix(SCENARIO_KEY_PREFIX)
    }

    pub fn json_file_name(department: Department) -> String {
        format!("{}_roi_results.json", department.as_str())
    }

    pub fn csv_file_name(department: Department) -> String {
        format!("{}_roi_results.csv", department.as_str())
    }

    pub fn pdf_file_name(department: Department) -> String {
        format!("{}_roi_report.pdf", department.as_str())
    }

    pub fn share_file_name(department: Department) -> String {
        format!("{}_roi_share.txt", department.as_str())
    }
}
