use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Business function whose formula and field schema apply to a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Support,
    Hr,
    Finance,
    Sales,
    Mortgage,
    Custom,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Support,
        Department::Hr,
        Department::Finance,
        Department::Sales,
        Department::Mortgage,
        Department::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Support => "support",
            Department::Hr => "hr",
            Department::Finance => "finance",
            Department::Sales => "sales",
            Department::Mortgage => "mortgage",
            Department::Custom => "custom",
        }
    }

    /// Departments whose staffing is derived from volume and handle time.
    pub fn is_workload(self) -> bool {
        matches!(
            self,
            Department::Support | Department::Hr | Department::Finance
        )
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown department '{0}' (expected one of: support, hr, finance, sales, mortgage, custom)")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}
