//! Node entity types.
//!
//! Each entity carries the store-assigned identity (`id`, absent until the
//! node has been written) next to its semantic key and attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxoError;

/// Store-assigned numeric identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl NodeId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for NodeId {
    type Err = TaxoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(NodeId)
            .map_err(|_| TaxoError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An economic sector grouping activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<i64>,
}

impl Sector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            reference: None,
        }
    }
}

/// An economic activity, deduplicated by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<f64>,
    /// Name of the sector this activity belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

impl Activity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            reference: None,
            sector: None,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }
}

/// A sustainability objective, deduplicated by its short key
/// (e.g. `mitigation`, `adaptation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub name: String,
    #[serde(default)]
    pub long_name: String,
    pub key: String,
}

impl Objective {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            long_name: String::new(),
            key: key.into(),
        }
    }
}

/// A qualifying criterion, shared by every edge that references the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub description: String,
}

impl Criteria {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parse() {
        assert_eq!("42".parse::<NodeId>().unwrap(), NodeId(42));
        assert_eq!(" 7 ".parse::<NodeId>().unwrap(), NodeId(7));
    }

    #[test]
    fn test_node_id_rejects_non_numeric() {
        let err = "abc".parse::<NodeId>().unwrap_err();
        assert!(matches!(err, TaxoError::InvalidId(ref s) if s == "abc"));
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_activity_without_optional_fields() {
        let activity: Activity = serde_json::from_str(r#"{"name": "Solar power"}"#).unwrap();
        assert_eq!(activity.name, "Solar power");
        assert!(activity.id.is_none());
        assert!(activity.sector.is_none());

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Solar power"}));
    }

    #[test]
    fn test_objective_roundtrips_long_name() {
        let objective: Objective = serde_json::from_str(
            r#"{"id": 3, "name": "Climate mitigation", "long_name": "Climate change mitigation", "key": "mitigation"}"#,
        )
        .unwrap();
        assert_eq!(objective.id, Some(NodeId(3)));
        assert_eq!(objective.long_name, "Climate change mitigation");
    }
}
