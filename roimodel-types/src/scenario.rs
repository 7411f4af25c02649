use crate::{Department, InputSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, persisted snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique within a store; re-saving under the same name overwrites.
    pub name: String,
    pub department: Department,
    pub inputs: InputSnapshot,
    pub saved_at: DateTime<Utc>,
}
