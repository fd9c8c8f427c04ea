//! Inbound taxonomy feed records.
//!
//! The feed is a single JSON document:
//!
//! ```json
//! {
//!   "sectors":    [{"name": "Energy"}],
//!   "activities": [{"name": "Solar power", "description": "...", "reference": 1.0, "sector": "Energy"}],
//!   "objectives": [{"name": "Climate mitigation", "long_name": "...", "key": "mitigation"}],
//!   "matches":    [{"activity": "Solar power", "objective": "mitigation", "dnsh": [], ...}]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TaxoResult;
use crate::model::{Activity, Objective, Sector};

/// A parsed feed, split into node batches and the match list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyFeed {
    #[serde(default)]
    pub sectors: Vec<Sector>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl TaxonomyFeed {
    /// Parse a feed from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> TaxoResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a feed from a JSON string.
    pub fn from_json(json: &str) -> TaxoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
            && self.activities.is_empty()
            && self.objectives.is_empty()
            && self.matches.is_empty()
    }
}

/// One activity/objective match with its DNSH chain and
/// substantial-contribution criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Activity name.
    pub activity: String,
    /// Objective key.
    pub objective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_contribution_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_description: Option<String>,
    #[serde(default)]
    pub dnsh: Vec<DnshEntry>,
    #[serde(default)]
    pub substantial_contribution_criteria: Vec<String>,
}

impl MatchRecord {
    pub fn new(activity: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            objective: objective.into(),
            activity_contribution_type: None,
            contribution_description: None,
            dnsh: Vec::new(),
            substantial_contribution_criteria: Vec::new(),
        }
    }

    /// Every criteria text referenced by the record, DNSH criteria first,
    /// deduplicated in first-seen order.
    pub fn criteria_batch(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.dnsh
            .iter()
            .flat_map(|entry| entry.criteria.iter())
            .chain(self.substantial_contribution_criteria.iter())
            .map(String::as_str)
            .filter(|text| seen.insert(*text))
            .collect()
    }

    /// The match objective followed by every DNSH objective, deduplicated.
    pub fn objective_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        std::iter::once(self.objective.as_str())
            .chain(self.dnsh.iter().map(|entry| entry.objective.as_str()))
            .filter(|key| seen.insert(*key))
            .collect()
    }
}

/// A do-no-significant-harm counter-objective and its criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnshEntry {
    /// Objective key of the DNSH target.
    pub objective: String,
    #[serde(default)]
    pub criteria: Vec<String>,
}
