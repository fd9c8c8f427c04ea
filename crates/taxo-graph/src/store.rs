//! Graph store adapter contract.
//!
//! Repositories, the relationship builder and the traversal queries never
//! talk to the driver directly: they build [`Statement`]s and hand them to a
//! [`UnitOfWork`] opened from a [`GraphStore`]. The Neo4j implementation lives
//! in [`crate::client`]; tests use the recording store in [`crate::testutil`].

use std::collections::BTreeMap;
use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use taxo_core::NodeId;

use crate::error::{GraphError, GraphResult};

/// A statement parameter, independent of the driver's value type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<NodeId> for ParamValue {
    fn from(v: NodeId) -> Self {
        Self::Int(v.value())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// Cypher text plus named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    params: BTreeMap<String, ParamValue>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn get_param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn into_parts(self) -> (String, BTreeMap<String, ParamValue>) {
        (self.text, self.params)
    }
}

/// One result row.
pub enum Record {
    /// A row streamed from Neo4j.
    Bolt(neo4rs::Row),
    /// A row given as a JSON object (test doubles, fixtures).
    Json(serde_json::Map<String, Value>),
}

impl Record {
    /// Build a record from a JSON object. Non-object values yield an empty row.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Json(map),
            _ => Self::Json(serde_json::Map::new()),
        }
    }

    /// Decode a column. A missing or null column decodes as `None` for `Option<T>`.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> GraphResult<T> {
        match self {
            Self::Bolt(row) => row
                .get::<T>(field)
                .map_err(|e| GraphError::decode(field, format!("{:?}", e))),
            Self::Json(map) => {
                let value = map.get(field).cloned().unwrap_or(Value::Null);
                serde_json::from_value(value).map_err(|e| GraphError::decode(field, e))
            }
        }
    }
}

/// One transaction against the graph store.
#[async_trait]
pub trait UnitOfWork: Send {
    /// Run a statement, discarding any rows.
    async fn run(&mut self, statement: Statement) -> GraphResult<()>;

    /// Run a statement and collect its rows.
    async fn fetch(&mut self, statement: Statement) -> GraphResult<Vec<Record>>;

    async fn commit(self) -> GraphResult<()>;

    async fn rollback(self) -> GraphResult<()>;

    /// Run a statement and keep only its first row.
    async fn fetch_one(&mut self, statement: Statement) -> GraphResult<Option<Record>> {
        Ok(self.fetch(statement).await?.into_iter().next())
    }
}

/// Opens units of work. Implementations own the connection lifecycle.
#[async_trait]
pub trait GraphStore: Send + Sync {
    type Work: UnitOfWork;

    async fn begin(&self) -> GraphResult<Self::Work>;

    /// Run a statement in its own auto-committed transaction (schema DDL).
    async fn run_autocommit(&self, statement: Statement) -> GraphResult<()>;
}

/// Run `op` inside one unit of work.
///
/// The operation receives the unit of work by value and hands it back with
/// its result. On `Ok` the work is committed, on `Err` it is rolled back, so
/// the underlying connection is released on every exit path.
pub async fn within<S, T, F, Fut>(store: &S, op: F) -> GraphResult<T>
where
    S: GraphStore + ?Sized,
    F: FnOnce(S::Work) -> Fut,
    Fut: Future<Output = (S::Work, GraphResult<T>)>,
{
    let work = store.begin().await?;
    let (work, result) = op(work).await;

    match result {
        Ok(value) => {
            work.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = work.rollback().await {
                warn!(error = %rollback_err, "Rollback failed after unit-of-work error");
            }
            Err(e)
        }
    }
}
