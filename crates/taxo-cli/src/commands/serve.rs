//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use taxo_graph::FeedSource;

use super::DbArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Feed URL used by POST /api/populate
    #[arg(long, env = "TAXONOMY_URL")]
    pub url: Option<String>,
}

pub async fn execute(args: ServeArgs, db: &DbArgs) -> Result<()> {
    let client = db.connect().await?;
    let source = args.url.map(FeedSource::Url).unwrap_or_default();

    println!();
    println!("  {} {}", "Taxo".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}    {}", "Neo4j".green(), db.db_url);
    println!("  {}     {}", "Feed".green(), source);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    taxo_web::run_server(client, source, &args.host, args.port).await?;

    Ok(())
}
