//! Neo4j schema initialization (uniqueness constraints on semantic keys).

use tracing::info;

use crate::error::GraphResult;
use crate::store::{GraphStore, Statement};

/// Cypher statements for schema initialization.
///
/// Criteria are keyed by free text that can exceed the index key size, so
/// they rely on `MERGE` alone.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT sector_name IF NOT EXISTS FOR (s:Sector) REQUIRE s.name IS UNIQUE",
    "CREATE CONSTRAINT activity_name IF NOT EXISTS FOR (a:Activity) REQUIRE a.name IS UNIQUE",
    "CREATE CONSTRAINT objective_key IF NOT EXISTS FOR (o:Objective) REQUIRE o.key IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema<S: GraphStore + ?Sized>(store: &S) -> GraphResult<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        store.run_autocommit(Statement::new(*statement)).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
