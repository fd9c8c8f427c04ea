//! Ingestion pipeline: taxonomy feed to Neo4j.
//!
//! Nodes are merged first (sectors, objectives, activities), then edges
//! (sector links, then per-match edges), all inside one unit of work. A store
//! failure rolls the unit back and surfaces tagged with its phase; records
//! pointing at missing nodes are reported and skipped.

pub mod source;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use taxo_core::TaxonomyFeed;

use crate::error::GraphResult;
use crate::relationships::{self, RecordOutcome};
use crate::repository::{activity, objective, sector};
use crate::store::{within, GraphStore, UnitOfWork};

pub use crate::relationships::IntegrityFailure;
pub use source::{FeedSource, DEFAULT_FEED_URL};

/// Pipeline phase, attached to errors and log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPhase {
    Fetch,
    Parse,
    LoadNodes,
    BuildEdges,
}

impl fmt::Display for IngestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IngestPhase::Fetch => "fetch",
            IngestPhase::Parse => "parse",
            IngestPhase::LoadNodes => "load-nodes",
            IngestPhase::BuildEdges => "build-edges",
        })
    }
}

/// Summary of one ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sectors: usize,
    pub objectives: usize,
    pub activities: usize,
    pub matches: usize,
    pub criteria_upserted: usize,
    pub relationships_created: usize,
    pub failures: Vec<IntegrityFailure>,
}

impl IngestReport {
    pub fn nodes(&self) -> usize {
        self.sectors + self.objectives + self.activities
    }

    /// True when every record was linked.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[derive(Debug, Default)]
struct Tally {
    sectors: usize,
    objectives: usize,
    activities: usize,
    matches: usize,
    criteria_upserted: usize,
    relationships_created: usize,
    failures: Vec<IntegrityFailure>,
}

async fn load_nodes<W: UnitOfWork>(
    work: &mut W,
    feed: &TaxonomyFeed,
    tally: &mut Tally,
) -> GraphResult<()> {
    tally.sectors = sector::bulk_upsert(work, &feed.sectors).await?;
    tally.objectives = objective::bulk_upsert(work, &feed.objectives).await?;
    tally.activities = activity::bulk_upsert(work, &feed.activities).await?;

    info!(
        sectors = tally.sectors,
        objectives = tally.objectives,
        activities = tally.activities,
        "Nodes merged"
    );
    Ok(())
}

async fn build_edges<W: UnitOfWork>(
    work: &mut W,
    feed: &TaxonomyFeed,
    tally: &mut Tally,
) -> GraphResult<()> {
    let links = relationships::link_sector_activities(work, &feed.activities).await?;
    tally.relationships_created += links.relationships_created;
    tally.failures.extend(links.failures);
    info!(rels = links.relationships_created, "Sector links merged");

    for (index, record) in feed.matches.iter().enumerate() {
        match relationships::build_match_edges(work, index, record).await? {
            RecordOutcome::Built(counts) => {
                tally.matches += 1;
                tally.criteria_upserted += counts.criteria_upserted;
                tally.relationships_created += counts.relationships_created;
            }
            RecordOutcome::Rejected(failure) => tally.failures.push(failure),
        }
    }

    info!(
        matches = tally.matches,
        criteria = tally.criteria_upserted,
        rels = tally.relationships_created,
        "Match edges merged"
    );
    Ok(())
}

async fn load_and_link<W: UnitOfWork>(work: &mut W, feed: &TaxonomyFeed) -> GraphResult<Tally> {
    let mut tally = Tally::default();

    load_nodes(work, feed, &mut tally)
        .await
        .map_err(|e| e.during(IngestPhase::LoadNodes))?;

    build_edges(work, feed, &mut tally)
        .await
        .map_err(|e| e.during(IngestPhase::BuildEdges))?;

    Ok(tally)
}

/// Ingest an already parsed feed inside one unit of work.
pub async fn run_ingestion<S>(store: &S, feed: &TaxonomyFeed) -> GraphResult<IngestReport>
where
    S: GraphStore + ?Sized,
{
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(
        %run_id,
        sectors = feed.sectors.len(),
        activities = feed.activities.len(),
        objectives = feed.objectives.len(),
        matches = feed.matches.len(),
        "Starting ingestion"
    );

    let tally = within(store, |mut work| async move {
        let result = load_and_link(&mut work, feed).await;
        (work, result)
    })
    .await?;

    let report = IngestReport {
        run_id,
        started_at,
        finished_at: Utc::now(),
        sectors: tally.sectors,
        objectives: tally.objectives,
        activities: tally.activities,
        matches: tally.matches,
        criteria_upserted: tally.criteria_upserted,
        relationships_created: tally.relationships_created,
        failures: tally.failures,
    };

    if !report.is_clean() {
        warn!(%run_id, failures = report.failures.len(), "Ingestion finished with skipped records");
    }
    info!(
        %run_id,
        nodes = report.nodes(),
        rels = report.relationships_created,
        duration_ms = report.duration_ms(),
        "Ingestion complete"
    );

    Ok(report)
}

/// Fetch and parse a feed, then ingest it.
pub async fn ingest_from_source<S>(store: &S, source: &FeedSource) -> GraphResult<IngestReport>
where
    S: GraphStore + ?Sized,
{
    let feed = source.load().await?;
    run_ingestion(store, &feed).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::testutil::{store_failure, RecordingStore};
    use serde_json::json;
    use taxo_core::{Activity, DnshEntry, MatchRecord, Objective, Sector};

    fn solar_feed() -> TaxonomyFeed {
        let mut record = MatchRecord::new("Solar power", "mitigation");
        record.activity_contribution_type = Some("direct".to_string());
        record.substantial_contribution_criteria = vec!["Installed capacity > threshold".to_string()];

        TaxonomyFeed {
            sectors: vec![Sector::new("Energy")],
            activities: vec![Activity::new("Solar power").with_sector("Energy")],
            objectives: vec![Objective::new("mitigation", "Climate mitigation")],
            matches: vec![record],
        }
    }

    /// Every endpoint exists and every edge merge creates one edge.
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

    #[tokio::test]
    async fn test_phases_run_in_dependency_order() {
        let store = healthy_store();
        let report = run_ingestion(&store, &solar_feed()).await.unwrap();

        let texts: Vec<String> = store.statements().iter().map(|s| s.text().to_string()).collect();
        let first = |needle: &str| texts.iter().position(|t| t.contains(needle)).unwrap();

        assert!(first("MERGE (n:Sector") < first("MERGE (n:Objective"));
        assert!(first("MERGE (n:Objective") < first("MERGE (n:Activity"));
        assert!(first("MERGE (n:Activity") < first("[:HAS_ACTIVITY"));
        assert!(first("[:HAS_ACTIVITY") < first("[:CONTRIBUTES"));

        assert_eq!(report.nodes(), 3);
        assert_eq!(report.matches, 1);
        assert_eq!(report.criteria_upserted, 1);
        assert_eq!(report.relationships_created, 3);
        assert!(report.is_clean());
        assert_eq!(store.commits(), 1);
        assert_eq!(store.rollbacks(), 0);
    }

    #[tokio::test]
    async fn test_integrity_failure_does_not_abort_siblings() {
        let store = RecordingStore::with_responder(|stmt| {
            let text = stmt.text();
            if text.contains("missing_objectives") {
                let keys = stmt.get_param("objective_keys").cloned();
                let water = crate::store::ParamValue::Text("water".to_string());
                let missing = match keys {
                    Some(crate::store::ParamValue::List(items)) if items.contains(&water) => {
                        json!(["water"])
                    }
                    _ => json!([]),
                };
                Ok(vec![json!({"activities": 1, "missing_objectives": missing})])
            } else if text.contains("from_count") {
                Ok(vec![json!({"from_count": 1, "to_count": 1})])
            } else if text.contains("AS created") {
                Ok(vec![json!({"created": 1})])
            } else {
                Ok(vec![])
            }
        });

        let mut feed = solar_feed();
        let mut broken = MatchRecord::new("Solar power", "mitigation");
        broken.dnsh = vec![DnshEntry { objective: "water".to_string(), criteria: vec![] }];
        feed.matches.insert(0, broken);

        let report = run_ingestion(&store, &feed).await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].missing, vec!["objective 'water'".to_string()]);
        assert_eq!(report.matches, 1);
        assert_eq!(store.statements_containing("[:SC_CRITERIA]").len(), 1);
        assert_eq!(store.commits(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_tagged_and_rolled_back() {
        let store = RecordingStore::with_responder(|stmt| {
            if stmt.text().contains("[:CONTRIBUTES") {
                Err(store_failure("constraint violated"))
            } else if stmt.text().contains("missing_objectives") {
                Ok(vec![json!({"activities": 1, "missing_objectives": []})])
            } else if stmt.text().contains("from_count") {
                Ok(vec![json!({"from_count": 1, "to_count": 1})])
            } else {
                Ok(vec![json!({"created": 1})])
            }
        });

        let err = run_ingestion(&store, &solar_feed()).await.unwrap_err();

        match &err {
            GraphError::Ingest { phase, source } => {
                assert_eq!(*phase, IngestPhase::BuildEdges);
                assert!(source.to_string().contains("constraint violated"));
            }
            other => panic!("expected phase-tagged error, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Ingestion failed during build-edges: Store error: constraint violated"
        );
        assert_eq!(store.commits(), 0);
        assert_eq!(store.rollbacks(), 1);
    }

    #[tokio::test]
    async fn test_node_failure_tagged_with_load_phase() {
        let store = RecordingStore::with_responder(|stmt| {
            if stmt.text().contains("MERGE (n:Objective") {
                Err(store_failure("connection lost"))
            } else {
                Ok(vec![])
            }
        });

        let err = run_ingestion(&store, &solar_feed()).await.unwrap_err();
        assert!(matches!(err, GraphError::Ingest { phase: IngestPhase::LoadNodes, .. }));
        assert!(store.statements_containing("MERGE (n:Activity").is_empty());
    }

    #[tokio::test]
    async fn test_empty_feed_commits_empty_report() {
        let store = RecordingStore::new();
        let report = run_ingestion(&store, &TaxonomyFeed::default()).await.unwrap();

        assert_eq!(report.nodes(), 0);
        assert_eq!(report.relationships_created, 0);
        assert!(report.finished_at >= report.started_at);
        assert_eq!(store.commits(), 1);
    }
}
