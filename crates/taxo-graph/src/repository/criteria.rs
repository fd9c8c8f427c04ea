//! Criteria repository. Criteria are merged by their description text, so
//! the same text used by DNSH and substantial-contribution edges resolves to
//! one node.

use taxo_core::{Criteria, NodeId};

use super::NodeEntity;
use crate::error::GraphResult;
use crate::store::{ParamValue, UnitOfWork};

impl NodeEntity for Criteria {
    const LABEL: &'static str = "Criteria";
    const KEY: &'static str = "description";

    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn key(&self) -> &str {
        &self.description
    }

    fn attributes(&self) -> Vec<(&'static str, ParamValue)> {
        Vec::new()
    }
}

pub async fn create<W: UnitOfWork>(work: &mut W, criteria: &Criteria) -> GraphResult<Criteria> {
    super::create(work, criteria).await
}

pub async fn bulk_upsert<W: UnitOfWork>(work: &mut W, criteria: &[Criteria]) -> GraphResult<usize> {
    super::bulk_upsert(work, criteria).await
}

/// Merge one Criteria node per description.
pub async fn bulk_upsert_descriptions<W: UnitOfWork>(
    work: &mut W,
    descriptions: &[&str],
) -> GraphResult<usize> {
    let criteria: Vec<Criteria> = descriptions.iter().map(|d| Criteria::new(*d)).collect();
    super::bulk_upsert(work, &criteria).await
}

pub async fn get_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<Option<Criteria>> {
    super::get_by_id(work, id).await
}

pub async fn get_by_description<W: UnitOfWork>(
    work: &mut W,
    description: &str,
) -> GraphResult<Option<Criteria>> {
    super::get_by_key(work, description).await
}

pub async fn get_all<W: UnitOfWork>(work: &mut W) -> GraphResult<Vec<Criteria>> {
    super::get_all(work).await
}

pub async fn update<W: UnitOfWork>(work: &mut W, criteria: &Criteria) -> GraphResult<Option<Criteria>> {
    super::update(work, criteria).await
}

pub async fn delete_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<bool> {
    super::delete_by_id::<Criteria, W>(work, id).await
}
