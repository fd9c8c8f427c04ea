//! CLI command definitions and handlers.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use taxo_core::Envelope;
use taxo_graph::{GraphClient, GraphConfig};

pub mod activity;
pub mod delete;
pub mod ingest;
pub mod serve;
pub mod status;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Taxo - EU sustainable-finance taxonomy graph
#[derive(Parser)]
#[command(name = "taxo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, env = "TAXO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Neo4j connection settings.
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, global = true, env = "DB_URL", default_value = "bolt://localhost:7687")]
    pub db_url: String,

    /// Neo4j user
    #[arg(long, global = true, env = "DB_USERNAME", default_value = "neo4j")]
    pub db_user: String,

    /// Neo4j password
    #[arg(long, global = true, env = "DB_PASSWORD", default_value = "neo4j", hide_env_values = true)]
    pub db_password: String,

    /// Neo4j database name
    #[arg(long, global = true, env = "DB_NAME", default_value = "neo4j")]
    pub db_name: String,
}

impl DbArgs {
    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.db_url.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
        }
    }

    /// Connect and ping, giving up after a fixed timeout.
    pub async fn connect(&self) -> Result<GraphClient> {
        tokio::time::timeout(CONNECT_TIMEOUT, GraphClient::connect(&self.config()))
            .await
            .with_context(|| {
                format!(
                    "Timed out after {}s connecting to Neo4j at {}",
                    CONNECT_TIMEOUT.as_secs(),
                    self.db_url
                )
            })?
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the taxonomy feed into Neo4j
    Ingest(ingest::IngestArgs),

    /// Start the HTTP API
    Serve(serve::ServeArgs),

    /// Query activities and their main objectives
    #[command(subcommand)]
    Activity(activity::ActivityCommands),

    /// Show node and relationship counts
    Status(status::StatusArgs),

    /// Delete a single node or edge
    #[command(subcommand)]
    Delete(delete::DeleteCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Ingest(args) => ingest::execute(args, &self.db).await,
            Commands::Serve(args) => serve::execute(args, &self.db).await,
            Commands::Activity(cmd) => activity::execute(cmd, &self.db).await,
            Commands::Status(args) => status::execute(args, &self.db).await,
            Commands::Delete(cmd) => delete::execute(cmd, &self.db).await,
        }
    }
}

/// Unwrap a query envelope, turning failures into an error.
pub(crate) fn into_data<T>(envelope: Envelope<T>) -> Result<T> {
    match envelope.data {
        Some(data) if envelope.success => Ok(data),
        _ if envelope.errors.is_empty() => bail!("Query returned no data"),
        _ => bail!("{}", envelope.errors.join("; ")),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
