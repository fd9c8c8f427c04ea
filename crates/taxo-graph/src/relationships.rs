//! Relationship builder.
//!
//! Creates the edges implied by the feed:
//! - (:Sector)-[:HAS_ACTIVITY]->(:Activity)
//! - (:Activity)-[:CONTRIBUTES {contribution_type?, description?}]->(:Objective)
//! - (:Objective)-[:DNSH_LINK]->(:Objective)
//! - (:Objective)-[:DNSH_CRITERIA]->(:Criteria)
//! - (:Objective)-[:SC_CRITERIA]->(:Criteria)
//!
//! Every edge is created only if no edge of the same kind and property shape
//! already joins the two endpoints, so re-running ingestion adds nothing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use taxo_core::{Activity, MatchRecord, TaxoError};

use crate::error::GraphResult;
use crate::repository::criteria;
use crate::store::{Statement, UnitOfWork};

/// The relationship kinds of the taxonomy graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    HasActivity,
    Contributes,
    DnshLink,
    DnshCriteria,
    ScCriteria,
}

/// Label and key property of one edge endpoint.
struct Endpoint {
    label: &'static str,
    key: &'static str,
}

const SECTOR: Endpoint = Endpoint { label: "Sector", key: "name" };
const ACTIVITY: Endpoint = Endpoint { label: "Activity", key: "name" };
const OBJECTIVE: Endpoint = Endpoint { label: "Objective", key: "key" };
const CRITERIA: Endpoint = Endpoint { label: "Criteria", key: "description" };

impl EdgeKind {
    pub const ALL: [EdgeKind; 5] = [
        EdgeKind::HasActivity,
        EdgeKind::Contributes,
        EdgeKind::DnshLink,
        EdgeKind::DnshCriteria,
        EdgeKind::ScCriteria,
    ];

    /// The Neo4j relationship type.
    pub fn rel_type(self) -> &'static str {
        match self {
            EdgeKind::HasActivity => "HAS_ACTIVITY",
            EdgeKind::Contributes => "CONTRIBUTES",
            EdgeKind::DnshLink => "DNSH_LINK",
            EdgeKind::DnshCriteria => "DNSH_CRITERIA",
            EdgeKind::ScCriteria => "SC_CRITERIA",
        }
    }

    fn endpoints(self) -> (Endpoint, Endpoint) {
        match self {
            EdgeKind::HasActivity => (SECTOR, ACTIVITY),
            EdgeKind::Contributes => (ACTIVITY, OBJECTIVE),
            EdgeKind::DnshLink => (OBJECTIVE, OBJECTIVE),
            EdgeKind::DnshCriteria | EdgeKind::ScCriteria => (OBJECTIVE, CRITERIA),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rel_type())
    }
}

impl FromStr for EdgeKind {
    type Err = TaxoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "has_activity" => Ok(EdgeKind::HasActivity),
            "contributes" => Ok(EdgeKind::Contributes),
            "dnsh_link" | "dnsh" => Ok(EdgeKind::DnshLink),
            "dnsh_criteria" => Ok(EdgeKind::DnshCriteria),
            "sc_criteria" => Ok(EdgeKind::ScCriteria),
            _ => Err(TaxoError::validation(format!("unknown edge kind '{}'", s))),
        }
    }
}

/// Property subset of an Activity→Objective edge, resolved once per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionShape<'a> {
    Both {
        contribution_type: &'a str,
        description: &'a str,
    },
    TypeOnly(&'a str),
    DescriptionOnly(&'a str),
    Neither,
}

impl<'a> ContributionShape<'a> {
    /// Blank strings count as absent.
    pub fn resolve(contribution_type: Option<&'a str>, description: Option<&'a str>) -> Self {
        let present = |v: Option<&'a str>| v.filter(|s| !s.trim().is_empty());
        match (present(contribution_type), present(description)) {
            (Some(contribution_type), Some(description)) => Self::Both {
                contribution_type,
                description,
            },
            (Some(contribution_type), None) => Self::TypeOnly(contribution_type),
            (None, Some(description)) => Self::DescriptionOnly(description),
            (None, None) => Self::Neither,
        }
    }

    pub fn of(record: &'a MatchRecord) -> Self {
        Self::resolve(
            record.activity_contribution_type.as_deref(),
            record.contribution_description.as_deref(),
        )
    }

    /// Names of the properties the edge carries.
    pub fn property_names(&self) -> &'static [&'static str] {
        match self {
            Self::Both { .. } => &["contribution_type", "description"],
            Self::TypeOnly(_) => &["contribution_type"],
            Self::DescriptionOnly(_) => &["description"],
            Self::Neither => &[],
        }
    }

    fn property_map(&self) -> String {
        let names = self.property_names();
        if names.is_empty() {
            return String::new();
        }
        let entries: Vec<String> = names.iter().map(|n| format!("{n}: ${n}")).collect();
        format!(" {{{}}}", entries.join(", "))
    }

    /// Predicate matching an existing edge `r` of exactly this shape.
    fn shape_predicate(&self) -> String {
        ["contribution_type", "description"]
            .iter()
            .map(|name| {
                if self.property_names().contains(name) {
                    format!("r.{name} = ${name}")
                } else {
                    format!("r.{name} IS NULL")
                }
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    fn bind(&self, statement: Statement) -> Statement {
        match *self {
            Self::Both {
                contribution_type,
                description,
            } => statement
                .param("contribution_type", contribution_type)
                .param("description", description),
            Self::TypeOnly(contribution_type) => {
                statement.param("contribution_type", contribution_type)
            }
            Self::DescriptionOnly(description) => statement.param("description", description),
            Self::Neither => statement,
        }
    }
}

/// Statement creating `kind` between two endpoints unless an edge of the same
/// shape already exists. Returns `created` (0 or 1).
pub(crate) fn merge_edge_statement(
    kind: EdgeKind,
    from: &str,
    to: &str,
    shape: ContributionShape<'_>,
) -> Statement {
    let (source, target) = kind.endpoints();
    let rel = kind.rel_type();

    let (guard, properties) = if kind == EdgeKind::Contributes {
        (
            format!("MATCH (from)-[r:{rel}]->(to) WHERE {}", shape.shape_predicate()),
            shape.property_map(),
        )
    } else {
        (format!("MATCH (from)-[:{rel}]->(to)"), String::new())
    };

    let text = format!(
        "MATCH (from:{from_label} {{{from_key}: $from}}) \
         MATCH (to:{to_label} {{{to_key}: $to}}) \
         WHERE NOT EXISTS {{ {guard} }} \
         CREATE (from)-[:{rel}{properties}]->(to) \
         RETURN count(*) AS created",
        from_label = source.label,
        from_key = source.key,
        to_label = target.label,
        to_key = target.key,
    );

    let statement = Statement::new(text).param("from", from).param("to", to);
    if kind == EdgeKind::Contributes {
        shape.bind(statement)
    } else {
        statement
    }
}

async fn merge_edge<W: UnitOfWork>(
    work: &mut W,
    kind: EdgeKind,
    from: &str,
    to: &str,
    shape: ContributionShape<'_>,
) -> GraphResult<usize> {
    let created: i64 = match work.fetch_one(merge_edge_statement(kind, from, to, shape)).await? {
        Some(record) => record.get("created")?,
        None => 0,
    };
    Ok(created.max(0) as usize)
}

/// A record whose edges could not be built because endpoints are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityFailure {
    /// What was being linked, e.g. `match #3 (Solar power -> mitigation)`.
    pub subject: String,
    /// Missing endpoints, e.g. `objective 'water'`.
    pub missing: Vec<String>,
}

impl fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: missing {}", self.subject, self.missing.join(", "))
    }
}

/// Edges created for one match record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeCounts {
    pub relationships_created: usize,
    pub criteria_upserted: usize,
}

/// Result of building one match record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Built(EdgeCounts),
    Rejected(IntegrityFailure),
}

/// Result of linking sectors to activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkReport {
    pub relationships_created: usize,
    pub failures: Vec<IntegrityFailure>,
}

fn match_check_statement(record: &MatchRecord) -> Statement {
    Statement::new(
        "OPTIONAL MATCH (a:Activity {name: $activity}) \
         WITH count(a) AS activities \
         UNWIND $objective_keys AS key \
         OPTIONAL MATCH (o:Objective {key: key}) \
         WITH activities, key, count(o) AS found \
         RETURN activities, collect(CASE WHEN found = 0 THEN key END) AS missing_objectives",
    )
    .param("activity", record.activity.as_str())
    .param("objective_keys", record.objective_keys())
}

/// Names of the endpoints `record` refers to that are not in the store.
async fn missing_endpoints<W: UnitOfWork>(
    work: &mut W,
    record: &MatchRecord,
) -> GraphResult<Vec<String>> {
    let (activities, missing_objectives): (i64, Vec<String>) =
        match work.fetch_one(match_check_statement(record)).await? {
            Some(row) => (row.get("activities")?, row.get("missing_objectives")?),
            None => (
                0,
                record.objective_keys().iter().map(|k| k.to_string()).collect(),
            ),
        };

    let mut missing = Vec::new();
    if activities == 0 {
        missing.push(format!("activity '{}'", record.activity));
    }
    missing.extend(missing_objectives.iter().map(|k| format!("objective '{}'", k)));
    Ok(missing)
}

/// Build every edge implied by one match record.
///
/// A record referring to an activity or objective that does not exist is
/// rejected as a whole and nothing is written for it. Store failures are
/// returned as errors.
pub async fn build_match_edges<W: UnitOfWork>(
    work: &mut W,
    index: usize,
    record: &MatchRecord,
) -> GraphResult<RecordOutcome> {
    let missing = missing_endpoints(work, record).await?;
    if !missing.is_empty() {
        let failure = IntegrityFailure {
            subject: format!("match #{} ({} -> {})", index, record.activity, record.objective),
            missing,
        };
        warn!(%failure, "Skipping match record");
        return Ok(RecordOutcome::Rejected(failure));
    }

    let mut counts = EdgeCounts::default();

    let shape = ContributionShape::of(record);
    counts.relationships_created += merge_edge(
        work,
        EdgeKind::Contributes,
        &record.activity,
        &record.objective,
        shape,
    )
    .await?;

    // Criteria nodes must exist before edges reference them.
    let batch = record.criteria_batch();
    counts.criteria_upserted = criteria::bulk_upsert_descriptions(work, &batch).await?;

    for dnsh in &record.dnsh {
        counts.relationships_created += merge_edge(
            work,
            EdgeKind::DnshLink,
            &record.objective,
            &dnsh.objective,
            ContributionShape::Neither,
        )
        .await?;

        for text in &dnsh.criteria {
            counts.relationships_created += merge_edge(
                work,
                EdgeKind::DnshCriteria,
                &dnsh.objective,
                text,
                ContributionShape::Neither,
            )
            .await?;
        }
    }

    for text in &record.substantial_contribution_criteria {
        counts.relationships_created += merge_edge(
            work,
            EdgeKind::ScCriteria,
            &record.objective,
            text,
            ContributionShape::Neither,
        )
        .await?;
    }

    debug!(
        activity = %record.activity,
        objective = %record.objective,
        shape = ?shape,
        created = counts.relationships_created,
        "Built match edges"
    );

    Ok(RecordOutcome::Built(counts))
}

fn pair_check_statement(kind: EdgeKind, from: &str, to: &str) -> Statement {
    let (source, target) = kind.endpoints();
    Statement::new(format!(
        "OPTIONAL MATCH (from:{from_label} {{{from_key}: $from}}) \
         WITH count(from) AS from_count \
         OPTIONAL MATCH (to:{to_label} {{{to_key}: $to}}) \
         RETURN from_count, count(to) AS to_count",
        from_label = source.label,
        from_key = source.key,
        to_label = target.label,
        to_key = target.key,
    ))
    .param("from", from)
    .param("to", to)
}

/// Link every activity that names a sector to that sector.
pub async fn link_sector_activities<W: UnitOfWork>(
    work: &mut W,
    activities: &[Activity],
) -> GraphResult<LinkReport> {
    let mut report = LinkReport::default();

    for activity in activities {
        let Some(sector) = activity.sector.as_deref() else {
            debug!(activity = %activity.name, "Activity has no sector");
            continue;
        };

        let (sectors, found): (i64, i64) = match work
            .fetch_one(pair_check_statement(EdgeKind::HasActivity, sector, &activity.name))
            .await?
        {
            Some(row) => (row.get("from_count")?, row.get("to_count")?),
            None => (0, 0),
        };

        if sectors == 0 || found == 0 {
            let mut missing = Vec::new();
            if sectors == 0 {
                missing.push(format!("sector '{}'", sector));
            }
            if found == 0 {
                missing.push(format!("activity '{}'", activity.name));
            }
            let failure = IntegrityFailure {
                subject: format!("activity {} -> sector {}", activity.name, sector),
                missing,
            };
            warn!(%failure, "Skipping sector link");
            report.failures.push(failure);
            continue;
        }

        report.relationships_created += merge_edge(
            work,
            EdgeKind::HasActivity,
            sector,
            &activity.name,
            ContributionShape::Neither,
        )
        .await?;
    }

    Ok(report)
}

/// One edge, identified by kind and endpoint semantic keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRef {
    pub kind: EdgeKind,
    pub from: String,
    pub to: String,
}

impl EdgeRef {
    pub fn new(kind: EdgeKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Delete the edge(s) of `edge.kind` between the two endpoints, whatever
/// their properties. Returns whether anything was deleted.
pub async fn delete_edge<W: UnitOfWork>(work: &mut W, edge: &EdgeRef) -> GraphResult<bool> {
    let (source, target) = edge.kind.endpoints();
    let statement = Statement::new(format!(
        "MATCH (from:{from_label} {{{from_key}: $from}})-[r:{rel}]->(to:{to_label} {{{to_key}: $to}}) \
         DELETE r \
         RETURN count(*) AS deleted",
        from_label = source.label,
        from_key = source.key,
        rel = edge.kind.rel_type(),
        to_label = target.label,
        to_key = target.key,
    ))
    .param("from", edge.from.as_str())
    .param("to", edge.to.as_str());

    let deleted: i64 = match work.fetch_one(statement).await? {
        Some(record) => record.get("deleted")?,
        None => 0,
    };
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{GraphStore, ParamValue};
    use crate::testutil::{store_failure, RecordingStore};
    use serde_json::json;
    use taxo_core::DnshEntry;

    /// Every endpoint exists and every merge creates one edge.
    fn healthy_store() -> RecordingStore {
        RecordingStore::with_responder(|stmt| {
            let text = stmt.text();
            if text.contains("missing_objectives") {
                Ok(vec![json!({"activities": 1, "missing_objectives": []})])
            } else if text.contains("from_count") {
                Ok(vec![json!({"from_count": 1, "to_count": 1})])
            } else if text.contains("AS created") {
                Ok(vec![json!({"created": 1})])
            } else {
                Ok(vec![])
            }
        })
    }

    fn solar_match() -> MatchRecord {
        let mut record = MatchRecord::new("Solar power", "mitigation");
        record.activity_contribution_type = Some("direct".to_string());
        record.substantial_contribution_criteria = vec!["Installed capacity > threshold".to_string()];
        record
    }

    fn contributes_statement(store: &RecordingStore) -> Statement {
        store
            .statements_containing("[:CONTRIBUTES")
            .into_iter()
            .next()
            .expect("CONTRIBUTES statement")
    }

    #[test]
    fn test_shape_resolution_covers_all_four_combinations() {
        assert_eq!(
            ContributionShape::resolve(Some("direct"), Some("text")),
            ContributionShape::Both { contribution_type: "direct", description: "text" }
        );
        assert_eq!(
            ContributionShape::resolve(Some("direct"), None),
            ContributionShape::TypeOnly("direct")
        );
        assert_eq!(
            ContributionShape::resolve(None, Some("text")),
            ContributionShape::DescriptionOnly("text")
        );
        assert_eq!(ContributionShape::resolve(None, None), ContributionShape::Neither);
        assert_eq!(ContributionShape::resolve(Some("  "), Some("")), ContributionShape::Neither);
    }

    #[test]
    fn test_edge_properties_match_shape() {
        let cases = [
            (ContributionShape::Both { contribution_type: "enabling", description: "d" }, 2),
            (ContributionShape::TypeOnly("enabling"), 1),
            (ContributionShape::DescriptionOnly("d"), 1),
            (ContributionShape::Neither, 0),
        ];

        for (shape, expected) in cases {
            let stmt = merge_edge_statement(EdgeKind::Contributes, "Solar power", "mitigation", shape);
            let create = stmt.text().split("CREATE").nth(1).unwrap();

            assert_eq!(shape.property_names().len(), expected);
            for name in ["contribution_type", "description"] {
                let carried = shape.property_names().contains(&name);
                assert_eq!(create.contains(&format!("{name}: ${name}")), carried, "{shape:?}");
                assert_eq!(stmt.get_param(name).is_some(), carried, "{shape:?}");
            }
            assert!(stmt.params().values().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn test_guard_distinguishes_shapes() {
        let stmt = merge_edge_statement(
            EdgeKind::Contributes,
            "Solar power",
            "mitigation",
            ContributionShape::TypeOnly("direct"),
        );
        assert!(stmt
            .text()
            .contains("WHERE r.contribution_type = $contribution_type AND r.description IS NULL"));

        let plain = merge_edge_statement(EdgeKind::DnshLink, "mitigation", "water", ContributionShape::Neither);
        assert!(plain.text().contains("NOT EXISTS { MATCH (from)-[:DNSH_LINK]->(to) }"));
        assert!(plain.text().contains("MATCH (from:Objective {key: $from})"));
    }

    #[tokio::test]
    async fn test_type_only_match_builds_sc_edge_and_criteria() {
        let store = healthy_store();
        let mut work = store.begin().await.unwrap();

        let outcome = build_match_edges(&mut work, 0, &solar_match()).await.unwrap();
        assert_eq!(
            outcome,
            RecordOutcome::Built(EdgeCounts { relationships_created: 2, criteria_upserted: 1 })
        );

        let contributes = contributes_statement(&store);
        assert_eq!(
            contributes.get_param("contribution_type").and_then(ParamValue::as_str),
            Some("direct")
        );
        assert!(contributes.get_param("description").is_none());

        let criteria = store.statements_containing("MERGE (n:Criteria");
        assert_eq!(criteria.len(), 1);

        let sc = store.statements_containing("[:SC_CRITERIA]");
        assert_eq!(sc.len(), 1);
        assert_eq!(sc[0].get_param("from").and_then(ParamValue::as_str), Some("mitigation"));
        assert_eq!(
            sc[0].get_param("to").and_then(ParamValue::as_str),
            Some("Installed capacity > threshold")
        );
    }

    #[tokio::test]
    async fn test_shared_criteria_upserted_once_and_linked_twice() {
        let store = healthy_store();
        let mut work = store.begin().await.unwrap();

        let mut record = solar_match();
        record.dnsh = vec![DnshEntry {
            objective: "water".to_string(),
            criteria: vec!["Installed capacity > threshold".to_string()],
        }];

        build_match_edges(&mut work, 0, &record).await.unwrap();

        assert_eq!(store.statements_containing("MERGE (n:Criteria").len(), 1);

        let dnsh_link = store.statements_containing("[:DNSH_LINK]");
        assert_eq!(dnsh_link.len(), 1);
        assert_eq!(dnsh_link[0].get_param("to").and_then(ParamValue::as_str), Some("water"));

        let dnsh_criteria = store.statements_containing("[:DNSH_CRITERIA]");
        assert_eq!(dnsh_criteria.len(), 1);
        assert_eq!(dnsh_criteria[0].get_param("from").and_then(ParamValue::as_str), Some("water"));

        assert_eq!(store.statements_containing("[:SC_CRITERIA]").len(), 1);
    }

    #[tokio::test]
    async fn test_criteria_upserted_before_edges_reference_them() {
        let store = healthy_store();
        let mut work = store.begin().await.unwrap();

        build_match_edges(&mut work, 0, &solar_match()).await.unwrap();

        let texts: Vec<String> = store.statements().iter().map(|s| s.text().to_string()).collect();
        let criteria_at = texts.iter().position(|t| t.contains("MERGE (n:Criteria")).unwrap();
        let sc_at = texts.iter().position(|t| t.contains("[:SC_CRITERIA]")).unwrap();
        assert!(criteria_at < sc_at);
    }

    #[tokio::test]
    async fn test_missing_objective_rejects_record_without_writes() {
        let store = RecordingStore::with_responder(|stmt| {
            if stmt.text().contains("missing_objectives") {
                Ok(vec![json!({"activities": 1, "missing_objectives": ["water"]})])
            } else {
                Ok(vec![json!({"created": 1})])
            }
        });
        let mut work = store.begin().await.unwrap();

        let mut record = solar_match();
        record.dnsh = vec![DnshEntry { objective: "water".to_string(), criteria: vec![] }];

        let outcome = build_match_edges(&mut work, 4, &record).await.unwrap();
        match outcome {
            RecordOutcome::Rejected(failure) => {
                assert_eq!(failure.subject, "match #4 (Solar power -> mitigation)");
                assert_eq!(failure.missing, vec!["objective 'water'".to_string()]);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(store.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_activity_reported() {
        let store = RecordingStore::with_responder(|_| {
            Ok(vec![json!({"activities": 0, "missing_objectives": []})])
        });
        let mut work = store.begin().await.unwrap();

        let outcome = build_match_edges(&mut work, 0, &solar_match()).await.unwrap();
        let RecordOutcome::Rejected(failure) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(failure.missing, vec!["activity 'Solar power'".to_string()]);
        assert_eq!(
            failure.to_string(),
            "match #0 (Solar power -> mitigation): missing activity 'Solar power'"
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = RecordingStore::with_responder(|_| Err(store_failure("connection lost")));
        let mut work = store.begin().await.unwrap();

        let err = build_match_edges(&mut work, 0, &solar_match()).await.unwrap_err();
        assert!(err.to_string().contains("connection lost"));
    }

    #[tokio::test]
    async fn test_sector_links_skip_missing_sector_and_continue() {
        let store = RecordingStore::with_responder(|stmt| {
            if stmt.text().contains("from_count") {
                let known = stmt.get_param("from").and_then(ParamValue::as_str) == Some("Energy");
                Ok(vec![json!({"from_count": if known { 1 } else { 0 }, "to_count": 1})])
            } else {
                Ok(vec![json!({"created": 1})])
            }
        });
        let mut work = store.begin().await.unwrap();

        let activities = vec![
            Activity::new("Solar power").with_sector("Energy"),
            Activity::new("Afforestation").with_sector("Forestry"),
            Activity::new("Orphan"),
        ];
        let report = link_sector_activities(&mut work, &activities).await.unwrap();

        assert_eq!(report.relationships_created, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].missing, vec!["sector 'Forestry'".to_string()]);
        assert_eq!(store.statements_containing("[:HAS_ACTIVITY]").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_edge_targets_kind_and_endpoints() {
        let store = RecordingStore::with_responder(|_| Ok(vec![json!({"deleted": 1})]));
        let mut work = store.begin().await.unwrap();

        let edge = EdgeRef::new(EdgeKind::ScCriteria, "mitigation", "Installed capacity > threshold");
        assert!(delete_edge(&mut work, &edge).await.unwrap());

        let stmt = &store.statements()[0];
        assert!(stmt.text().starts_with(
            "MATCH (from:Objective {key: $from})-[r:SC_CRITERIA]->(to:Criteria {description: $to})"
        ));
    }

    #[test]
    fn test_edge_kind_parsing() {
        assert_eq!("contributes".parse::<EdgeKind>().unwrap(), EdgeKind::Contributes);
        assert_eq!("SC_CRITERIA".parse::<EdgeKind>().unwrap(), EdgeKind::ScCriteria);
        assert_eq!("dnsh-criteria".parse::<EdgeKind>().unwrap(), EdgeKind::DnshCriteria);
        assert!("matches".parse::<EdgeKind>().is_err());
    }
}
