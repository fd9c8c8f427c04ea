//! Test utilities.
//!
//! [`RecordingStore`] is an in-memory [`GraphStore`] that records every
//! statement and answers reads through a caller-supplied responder. With the
//! `test-utils` feature, [`neo4j_container`] starts a real Neo4j instance via
//! testcontainers.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{GraphError, GraphResult};
use crate::store::{GraphStore, Record, Statement, UnitOfWork};

type Responder = Box<dyn Fn(&Statement) -> GraphResult<Vec<Value>> + Send + Sync>;

#[derive(Default)]
struct Recorded {
    statements: Vec<Statement>,
    autocommitted: Vec<Statement>,
    commits: usize,
    rollbacks: usize,
}

/// Records statements; reads are answered by the responder (empty by default).
#[derive(Clone)]
pub struct RecordingStore {
    recorded: Arc<Mutex<Recorded>>,
    responder: Arc<Responder>,
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::with_responder(|_| Ok(Vec::new()))
    }

    /// Build a store whose `fetch` results come from `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Statement) -> GraphResult<Vec<Value>> + Send + Sync + 'static,
    {
        Self {
            recorded: Arc::new(Mutex::new(Recorded::default())),
            responder: Arc::new(Box::new(responder)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Statements run or fetched inside units of work, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().statements.clone()
    }

    /// Statements whose text contains `needle`.
    pub fn statements_containing(&self, needle: &str) -> Vec<Statement> {
        self.statements()
            .into_iter()
            .filter(|s| s.text().contains(needle))
            .collect()
    }

    pub fn autocommitted(&self) -> Vec<Statement> {
        self.lock().autocommitted.clone()
    }

    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.lock().rollbacks
    }
}

pub struct RecordingWork {
    store: RecordingStore,
}

#[async_trait]
impl UnitOfWork for RecordingWork {
    async fn run(&mut self, statement: Statement) -> GraphResult<()> {
        self.fetch(statement).await.map(|_| ())
    }

    async fn fetch(&mut self, statement: Statement) -> GraphResult<Vec<Record>> {
        let rows = (self.store.responder)(&statement);
        self.store.lock().statements.push(statement);
        Ok(rows?.into_iter().map(Record::from_json).collect())
    }

    async fn commit(self) -> GraphResult<()> {
        self.store.lock().commits += 1;
        Ok(())
    }

    async fn rollback(self) -> GraphResult<()> {
        self.store.lock().rollbacks += 1;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for RecordingStore {
    type Work = RecordingWork;

    async fn begin(&self) -> GraphResult<RecordingWork> {
        Ok(RecordingWork {
            store: self.clone(),
        })
    }

    async fn run_autocommit(&self, statement: Statement) -> GraphResult<()> {
        self.lock().autocommitted.push(statement);
        Ok(())
    }
}

/// A responder error, for simulating store failures.
pub fn store_failure(msg: &str) -> GraphError {
    GraphError::Store(msg.to_string())
}

#[cfg(feature = "test-utils")]
pub use container::neo4j_container;

#[cfg(feature = "test-utils")]
mod container {
    use testcontainers::{
        core::{ContainerPort, WaitFor},
        runners::AsyncRunner,
        ContainerAsync, GenericImage, ImageExt,
    };

    use crate::client::{GraphClient, GraphConfig};

    /// Spin up a Neo4j container and return the container handle + connected client.
    ///
    /// The container is stopped when `ContainerAsync` is dropped, so callers
    /// must hold it for the duration of the test.
    pub async fn neo4j_container() -> (ContainerAsync<GenericImage>, GraphClient) {
        let image = GenericImage::new("neo4j", "5.26")
            .with_exposed_port(ContainerPort::Tcp(7687))
            .with_wait_for(WaitFor::message_on_stdout("Started."))
            .with_env_var("NEO4J_AUTH", "neo4j/taxo-test-pass");

        let container: ContainerAsync<GenericImage> = image
            .start()
            .await
            .expect("Failed to start Neo4j container");

        let host_port = container
            .get_host_port_ipv4(7687)
            .await
            .expect("Failed to get Neo4j host port");

        let config = GraphConfig {
            uri: format!("bolt://127.0.0.1:{host_port}"),
            user: "neo4j".to_string(),
            password: "taxo-test-pass".to_string(),
            database: "neo4j".to_string(),
        };
        let client = GraphClient::connect(&config)
            .await
            .expect("Failed to connect to Neo4j");

        (container, client)
    }
}
