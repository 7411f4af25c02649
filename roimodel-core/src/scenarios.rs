//! Named scenarios persisted through a [`KeyValueStore`].

use crate::ports::KeyValueStore;
use chrono::{DateTime, Utc};
use roimodel_domain::{CalcOptions, calculate_with, reconcile};
use roimodel_types::{Department, DepartmentResult, InputSnapshot, Scenario, naming};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario not found: {name}")]
    NotFound { name: String },

    #[error("scenario name must not be empty")]
    EmptyName,

    #[error("scenario {name} is not a valid snapshot: {message}")]
    Corrupt { name: String, message: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ScenarioError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ScenarioError::NotFound { .. } => 2,
            _ => 1,
        }
    }
}

/// Stored value: the snapshot itself plus the time it was saved.
///
/// Values written without `savedAt` still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredScenario {
    #[serde(flatten)]
    inputs: InputSnapshot,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// A listed scenario replayed under another department's formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub scenario: Scenario,
    pub result: DepartmentResult,
}

/// Result of [`ScenarioBook::list_all`].
#[derive(Debug, Default)]
pub struct ScenarioListing {
    pub scenarios: Vec<Scenario>,
    /// One [`ScenarioError::Corrupt`] per entry that could not be decoded.
    pub skipped: Vec<ScenarioError>,
}

pub struct ScenarioBook<S> {
    store: S,
}

impl<S: KeyValueStore> ScenarioBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save under `name`, replacing any scenario of the same name.
    pub fn save(&self, name: &str, snapshot: &InputSnapshot) -> Result<Scenario, ScenarioError> {
        self.save_at(name, snapshot, Utc::now())
    }

    pub fn save_at(
        &self,
        name: &str,
        snapshot: &InputSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<Scenario, ScenarioError> {
        let name = validate_name(name)?;
        let stored = StoredScenario {
            inputs: snapshot.clone(),
            saved_at: Some(saved_at),
        };
        let json = serde_json::to_string(&stored).map_err(|e| ScenarioError::Corrupt {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(&naming::scenario_key(name), &json)?;
        debug!(name, department = %snapshot.department, "saved scenario");
        Ok(Scenario {
            name: name.to_string(),
            department: snapshot.department,
            inputs: snapshot.clone(),
            saved_at,
        })
    }

    /// Load the snapshot saved under `name`, reconciled with its department's template.
    pub fn load(&self, name: &str) -> Result<InputSnapshot, ScenarioError> {
        Ok(self.get(name)?.inputs)
    }

    pub fn get(&self, name: &str) -> Result<Scenario, ScenarioError> {
        let name = validate_name(name)?;
        let raw = self
            .store
            .get(&naming::scenario_key(name))?
            .ok_or_else(|| ScenarioError::NotFound {
                name: name.to_string(),
            })?;
        decode(name, &raw)
    }

    pub fn delete(&self, name: &str) -> Result<(), ScenarioError> {
        let name = validate_name(name)?;
        if self.store.remove(&naming::scenario_key(name))? {
            debug!(name, "deleted scenario");
            Ok(())
        } else {
            Err(ScenarioError::NotFound {
                name: name.to_string(),
            })
        }
    }

    /// Every readable scenario in the store, sorted by name.
    ///
    /// Keys outside the scenario namespace are ignored. Unreadable entries are logged and
    /// left out; [`list_all`](Self::list_all) reports them.
    pub fn list(&self) -> Result<Vec<Scenario>, ScenarioError> {
        let listing = self.list_all()?;
        for err in &listing.skipped {
            warn!(error = %err, "skipping unreadable scenario");
        }
        Ok(listing.scenarios)
    }

    /// Like [`list`](Self::list), but returns the entries that failed to decode.
    ///
    /// Store failures still fail the whole listing.
    pub fn list_all(&self) -> Result<ScenarioListing, ScenarioError> {
        let mut keys = self.store.keys()?;
        keys.sort();
        let mut listing = ScenarioListing::default();
        for key in &keys {
            let Some(name) = naming::scenario_name(key) else {
                continue;
            };
            let Some(raw) = self.store.get(key)? else {
                // Removed between keys() and get().
                continue;
            };
            match decode(name, &raw) {
                Ok(scenario) => listing.scenarios.push(scenario),
                Err(err) => listing.skipped.push(err),
            }
        }
        Ok(listing)
    }

    /// Recompute every listed scenario with `department`'s formula, whatever it was saved under.
    pub fn compare(
        &self,
        department: Department,
        options: &CalcOptions,
    ) -> Result<Vec<ScenarioComparison>, ScenarioError> {
        let comparisons = self
            .list()?
            .into_iter()
            .map(|scenario| {
                if scenario.department != department {
                    debug!(
                        name = %scenario.name,
                        saved = %scenario.department,
                        current = %department,
                        "replaying scenario across departments"
                    );
                }
                let result = calculate_with(department, &scenario.inputs, options);
                ScenarioComparison { scenario, result }
            })
            .collect();
        Ok(comparisons)
    }
}

fn validate_name(name: &str) -> Result<&str, ScenarioError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ScenarioError::EmptyName)
    } else {
        Ok(trimmed)
    }
}

fn decode(name: &str, raw: &str) -> Result<Scenario, ScenarioError> {
    let stored: StoredScenario =
        serde_json::from_str(raw).map_err(|e| ScenarioError::Corrupt {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    let inputs = reconcile(stored.inputs);
    Ok(Scenario {
        name: name.to_string(),
        department: inputs.department,
        inputs,
        saved_at: stored.saved_at.unwrap_or(DateTime::UNIX_EPOCH),
    })
}
