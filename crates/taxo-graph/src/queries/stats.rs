//! Node and relationship counts for status display.

use serde::Serialize;

use crate::error::GraphResult;
use crate::relationships::EdgeKind;
use crate::store::{Statement, UnitOfWork};

/// Per-label node counts and per-kind relationship counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub sectors: usize,
    pub activities: usize,
    pub objectives: usize,
    pub criteria: usize,
    pub has_activity: usize,
    pub contributes: usize,
    pub dnsh_link: usize,
    pub dnsh_criteria: usize,
    pub sc_criteria: usize,
}

impl GraphCounts {
    pub fn nodes(&self) -> usize {
        self.sectors + self.activities + self.objectives + self.criteria
    }

    pub fn relationships(&self) -> usize {
        self.has_activity + self.contributes + self.dnsh_link + self.dnsh_criteria + self.sc_criteria
    }

    fn relationship_slot(&mut self, kind: EdgeKind) -> &mut usize {
        match kind {
            EdgeKind::HasActivity => &mut self.has_activity,
            EdgeKind::Contributes => &mut self.contributes,
            EdgeKind::DnshLink => &mut self.dnsh_link,
            EdgeKind::DnshCriteria => &mut self.dnsh_criteria,
            EdgeKind::ScCriteria => &mut self.sc_criteria,
        }
    }
}

async fn count<W: UnitOfWork>(work: &mut W, statement: Statement) -> GraphResult<usize> {
    let count: i64 = match work.fetch_one(statement).await? {
        Some(record) => record.get("count")?,
        None => 0,
    };
    Ok(count.max(0) as usize)
}

fn node_count_statement(label: &str) -> Statement {
    Statement::new(format!("MATCH (n:{label}) RETURN count(n) AS count"))
}

fn relationship_count_statement(kind: EdgeKind) -> Statement {
    Statement::new(format!(
        "MATCH ()-[r:{}]->() RETURN count(r) AS count",
        kind.rel_type()
    ))
}

/// Count every node label and relationship kind of the taxonomy graph.
pub async fn graph_counts<W: UnitOfWork>(work: &mut W) -> GraphResult<GraphCounts> {
    let mut counts = GraphCounts {
        sectors: count(work, node_count_statement("Sector")).await?,
        activities: count(work, node_count_statement("Activity")).await?,
        objectives: count(work, node_count_statement("Objective")).await?,
        criteria: count(work, node_count_statement("Criteria")).await?,
        ..GraphCounts::default()
    };

    for kind in EdgeKind::ALL {
        *counts.relationship_slot(kind) = count(work, relationship_count_statement(kind)).await?;
    }

    Ok(counts)
}
