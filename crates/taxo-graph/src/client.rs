//! Neo4j connection client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltList, BoltNull, BoltType, ConfigBuilder, Graph, Query, Txn};
use serde::Deserialize;

use crate::error::GraphResult;
use crate::store::{GraphStore, ParamValue, Record, Statement, UnitOfWork};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

/// Client for Neo4j; the production [`GraphStore`].
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping forces a
    /// real bolt handshake and lets callers time out on an unreachable server.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(16)
            .fetch_size(500)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        Ok(Self { graph })
    }
}

/// One Neo4j transaction.
pub struct Neo4jWork {
    txn: Txn,
}

#[async_trait]
impl UnitOfWork for Neo4jWork {
    async fn run(&mut self, statement: Statement) -> GraphResult<()> {
        self.txn.run(to_query(statement)).await?;
        Ok(())
    }

    async fn fetch(&mut self, statement: Statement) -> GraphResult<Vec<Record>> {
        let mut stream = self.txn.execute(to_query(statement)).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next(self.txn.handle()).await? {
            rows.push(Record::Bolt(row));
        }
        Ok(rows)
    }

    async fn commit(self) -> GraphResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> GraphResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    type Work = Neo4jWork;

    async fn begin(&self) -> GraphResult<Neo4jWork> {
        let txn = self.graph.start_txn().await?;
        Ok(Neo4jWork { txn })
    }

    async fn run_autocommit(&self, statement: Statement) -> GraphResult<()> {
        self.graph.run(to_query(statement)).await?;
        Ok(())
    }
}

fn to_query(statement: Statement) -> Query {
    let (text, params) = statement.into_parts();
    params
        .into_iter()
        .fold(Query::new(text), |query, (key, value)| {
            query.param(&key, to_bolt(value))
        })
}

fn to_bolt(value: ParamValue) -> BoltType {
    match value {
        ParamValue::Null => BoltType::Null(BoltNull),
        ParamValue::Bool(v) => v.into(),
        ParamValue::Int(v) => v.into(),
        ParamValue::Float(v) => v.into(),
        ParamValue::Text(v) => v.into(),
        ParamValue::List(items) => BoltType::List(BoltList {
            value: items.into_iter().map(to_bolt).collect(),
        }),
    }
}
