//! Main-objective traversal queries.
//!
//! Follows CONTRIBUTES edges from activities to the primary objectives and,
//! for the global shape, folds in each objective's DNSH chain and its
//! substantial-contribution criteria in the same row.

use serde::{Deserialize, Serialize};

use taxo_core::{Activity, NodeId, Objective};

use crate::error::GraphResult;
use crate::store::{Record, Statement, UnitOfWork};

/// Objective keys eligible as main objectives. Matches to any other key are
/// not returned by the traversals.
pub const PRIMARY_OBJECTIVE_KEYS: [&str; 2] = ["mitigation", "adaptation"];

/// How the starting activity is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitySelector {
    Id(NodeId),
    Name(String),
}

/// One Activity→Objective match with its contribution properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveMatch {
    pub activity: Activity,
    pub objective: Objective,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_contribution_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_description: Option<String>,
}

/// A DNSH target of an objective and the criteria attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnshLink {
    pub objective: String,
    pub key: String,
    #[serde(default)]
    pub criteria: Vec<String>,
}

/// A match together with its objective's DNSH chain and SC criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedObjectiveMatch {
    #[serde(flatten)]
    pub matched: ObjectiveMatch,
    pub dnsh: Vec<DnshLink>,
    pub substantial_contribution_criteria: Vec<String>,
}

const MATCH_COLUMNS: &str = "a {.*, id: id(a)} AS activity, \
     o {.*, id: id(o)} AS objective, \
     c.contribution_type AS activity_contribution_type, \
     c.description AS contribution_description";

const ORDERING: &str = "ORDER BY a.name, o.key";

fn primary_keys() -> Vec<&'static str> {
    PRIMARY_OBJECTIVE_KEYS.to_vec()
}

pub(crate) fn main_objectives_statement(selector: &ActivitySelector) -> Statement {
    let text = |filter: &str| {
        format!(
            "MATCH (a:Activity)-[c:CONTRIBUTES]->(o:Objective) \
             WHERE {filter} AND o.key IN $primary_keys \
             RETURN {columns} {ordering}",
            filter = filter,
            columns = MATCH_COLUMNS,
            ordering = ORDERING,
        )
    };

    let statement = match selector {
        ActivitySelector::Id(id) => Statement::new(text("id(a) = $id")).param("id", *id),
        ActivitySelector::Name(name) => {
            Statement::new(text("a.name = $name")).param("name", name.as_str())
        }
    };
    statement.param("primary_keys", primary_keys())
}

pub(crate) fn all_main_objectives_statement() -> Statement {
    Statement::new(format!(
        "MATCH (a:Activity)-[c:CONTRIBUTES]->(o:Objective) \
         WHERE o.key IN $primary_keys \
         RETURN {columns}, \
         [(o)-[:DNSH_LINK]->(d:Objective) | {{objective: d.name, key: d.key, \
         criteria: [(d)-[:DNSH_CRITERIA]->(dc:Criteria) | dc.description]}}] AS dnsh, \
         [(o)-[:SC_CRITERIA]->(sc:Criteria) | sc.description] AS substantial_contribution_criteria \
         {ordering}",
        columns = MATCH_COLUMNS,
        ordering = ORDERING,
    ))
    .param("primary_keys", primary_keys())
}

fn decode_match(record: &Record) -> GraphResult<ObjectiveMatch> {
    Ok(ObjectiveMatch {
        activity: record.get("activity")?,
        objective: record.get("objective")?,
        activity_contribution_type: record.get("activity_contribution_type")?,
        contribution_description: record.get("contribution_description")?,
    })
}

/// Primary-objective matches of one activity. Unknown activities and
/// activities without matches yield an empty list.
pub async fn main_objectives<W: UnitOfWork>(
    work: &mut W,
    selector: &ActivitySelector,
) -> GraphResult<Vec<ObjectiveMatch>> {
    work.fetch(main_objectives_statement(selector))
        .await?
        .iter()
        .map(decode_match)
        .collect()
}

/// Primary-objective matches of every activity, each with its DNSH chain and
/// substantial-contribution criteria.
pub async fn all_main_objectives<W: UnitOfWork>(
    work: &mut W,
) -> GraphResult<Vec<DetailedObjectiveMatch>> {
    work.fetch(all_main_objectives_statement())
        .await?
        .iter()
        .map(|record| {
            Ok(DetailedObjectiveMatch {
                matched: decode_match(record)?,
                dnsh: record.get::<Option<Vec<DnshLink>>>("dnsh")?.unwrap_or_default(),
                substantial_contribution_criteria: record
                    .get::<Option<Vec<String>>>("substantial_contribution_criteria")?
                    .unwrap_or_default(),
            })
        })
        .collect()
}
