//! Node repositories.
//!
//! Stateless operation sets, one module per node kind, parameterized by a
//! unit of work. Every kind is described by a [`NodeEntity`] (label, semantic
//! key, attributes) and shares the statement builders below, so uniqueness
//! is always enforced by merging on the semantic key, never on `id(n)`.

pub mod activity;
pub mod criteria;
pub mod objective;
pub mod sector;

use serde::de::DeserializeOwned;
use tracing::debug;

use taxo_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::store::{ParamValue, Statement, UnitOfWork};

/// Describes how a node kind is stored.
pub trait NodeEntity: DeserializeOwned + Send + Sync {
    /// Node label.
    const LABEL: &'static str;
    /// Property used for idempotent matching.
    const KEY: &'static str;

    fn id(&self) -> Option<NodeId>;

    fn key(&self) -> &str;

    /// Non-key attributes, written with `SET` after the merge. `Null` values
    /// remove the property, so absent attributes are never stored.
    fn attributes(&self) -> Vec<(&'static str, ParamValue)>;
}

/// Map projection returned by every read: all properties plus `id`.
fn projection() -> &'static str {
    "n {.*, id: id(n)} AS node"
}

fn set_clause<T: NodeEntity>(entity: &T, include_key: bool) -> String {
    let mut assignments: Vec<String> = Vec::new();
    if include_key {
        assignments.push(format!("n.{key} = $key", key = T::KEY));
    }
    assignments.extend(
        entity
            .attributes()
            .iter()
            .map(|(name, _)| format!("n.{name} = ${name}")),
    );

    if assignments.is_empty() {
        String::new()
    } else {
        format!(" SET {}", assignments.join(", "))
    }
}

fn with_attributes<T: NodeEntity>(statement: Statement, entity: &T) -> Statement {
    entity
        .attributes()
        .into_iter()
        .fold(statement, |stmt, (name, value)| stmt.param(name, value))
}

/// `MERGE` on the semantic key, then apply attributes.
pub(crate) fn merge_statement<T: NodeEntity>(entity: &T) -> Statement {
    let text = format!(
        "MERGE (n:{label} {{{key}: $key}}){set} RETURN {projection}",
        label = T::LABEL,
        key = T::KEY,
        set = set_clause(entity, false),
        projection = projection(),
    );
    with_attributes(Statement::new(text).param("key", entity.key()), entity)
}

pub(crate) fn get_by_id_statement<T: NodeEntity>(id: NodeId) -> Statement {
    Statement::new(format!(
        "MATCH (n:{label}) WHERE id(n) = $id RETURN {projection}",
        label = T::LABEL,
        projection = projection(),
    ))
    .param("id", id)
}

pub(crate) fn get_by_key_statement<T: NodeEntity>(key: &str) -> Statement {
    Statement::new(format!(
        "MATCH (n:{label} {{{key_prop}: $key}}) RETURN {projection}",
        label = T::LABEL,
        key_prop = T::KEY,
        projection = projection(),
    ))
    .param("key", key)
}

pub(crate) fn get_all_statement<T: NodeEntity>() -> Statement {
    Statement::new(format!(
        "MATCH (n:{label}) RETURN {projection} ORDER BY n.{key}",
        label = T::LABEL,
        key = T::KEY,
        projection = projection(),
    ))
}

pub(crate) fn update_statement<T: NodeEntity>(id: NodeId, entity: &T) -> Statement {
    let text = format!(
        "MATCH (n:{label}) WHERE id(n) = $id{set} RETURN {projection}",
        label = T::LABEL,
        set = set_clause(entity, true),
        projection = projection(),
    );
    with_attributes(
        Statement::new(text).param("id", id).param("key", entity.key()),
        entity,
    )
}

pub(crate) fn delete_statement<T: NodeEntity>(id: NodeId) -> Statement {
    Statement::new(format!(
        "MATCH (n:{label}) WHERE id(n) = $id DETACH DELETE n RETURN count(*) AS deleted",
        label = T::LABEL,
    ))
    .param("id", id)
}

/// Merge one node by key and return it as stored.
pub async fn create<T, W>(work: &mut W, entity: &T) -> GraphResult<T>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    let record = work
        .fetch_one(merge_statement(entity))
        .await?
        .ok_or_else(|| GraphError::Store(format!("MERGE on {} returned no row", T::LABEL)))?;
    record.get("node")
}

/// Merge every entity by key, sequentially. Returns how many were processed.
pub async fn bulk_upsert<T, W>(work: &mut W, entities: &[T]) -> GraphResult<usize>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    for entity in entities {
        work.run(merge_statement(entity)).await?;
        debug!(label = T::LABEL, key = entity.key(), "Upserted node");
    }
    Ok(entities.len())
}

pub async fn get_by_id<T, W>(work: &mut W, id: NodeId) -> GraphResult<Option<T>>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    match work.fetch_one(get_by_id_statement::<T>(id)).await? {
        Some(record) => Ok(Some(record.get("node")?)),
        None => Ok(None),
    }
}

pub async fn get_by_key<T, W>(work: &mut W, key: &str) -> GraphResult<Option<T>>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    match work.fetch_one(get_by_key_statement::<T>(key)).await? {
        Some(record) => Ok(Some(record.get("node")?)),
        None => Ok(None),
    }
}

pub async fn get_all<T, W>(work: &mut W) -> GraphResult<Vec<T>>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    work.fetch(get_all_statement::<T>())
        .await?
        .iter()
        .map(|record| record.get("node"))
        .collect()
}

/// Overwrite key and attributes of the node with the entity's `id`.
/// Returns `None` when no such node exists.
pub async fn update<T, W>(work: &mut W, entity: &T) -> GraphResult<Option<T>>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    let id = entity.id().ok_or_else(|| {
        taxo_core::TaxoError::validation(format!("{} update requires an id", T::LABEL))
    })?;

    match work.fetch_one(update_statement(id, entity)).await? {
        Some(record) => Ok(Some(record.get("node")?)),
        None => Ok(None),
    }
}

/// Delete a node and its relationships. Returns whether a node was deleted.
pub async fn delete_by_id<T, W>(work: &mut W, id: NodeId) -> GraphResult<bool>
where
    T: NodeEntity,
    W: UnitOfWork,
{
    let deleted: i64 = match work.fetch_one(delete_statement::<T>(id)).await? {
        Some(record) => record.get("deleted")?,
        None => 0,
    };
    Ok(deleted > 0)
}
