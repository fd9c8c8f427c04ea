//! Ingestion command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use taxo_graph::schema::initialize_schema;
use taxo_graph::{ingest_from_source, FeedSource};

use super::{print_json, DbArgs};
use crate::output;

#[derive(Args)]
pub struct IngestArgs {
    /// Feed URL (defaults to the published EU taxonomy)
    #[arg(long, env = "TAXONOMY_URL")]
    pub url: Option<String>,

    /// Read the feed from a local JSON file; takes precedence over --url
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Do not create uniqueness constraints first
    #[arg(long)]
    pub skip_schema: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestArgs {
    pub fn source(&self) -> FeedSource {
        match (&self.file, &self.url) {
            (Some(path), _) => FeedSource::File(path.clone()),
            (None, Some(url)) => FeedSource::Url(url.clone()),
            (None, None) => FeedSource::default(),
        }
    }
}

pub async fn execute(args: IngestArgs, db: &DbArgs) -> Result<()> {
    let client = db.connect().await?;
    let source = args.source();

    if !args.skip_schema {
        initialize_schema(&client).await?;
    }

    if !args.json {
        println!("{} {}", "Ingesting".bold(), source.to_string().cyan());
    }

    let report = ingest_from_source(&client, &source).await?;

    if args.json {
        print_json(&report)
    } else {
        output::print_report(&report);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> IngestArgs {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Ingest(args) => args,
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_file_source_wins() {
        let args = parse(&["taxo", "ingest", "--url", "http://x", "--file", "feed.json", "--skip-schema"]);
        assert_eq!(args.source(), FeedSource::File(PathBuf::from("feed.json")));
        assert!(args.skip_schema);
    }

    #[test]
    fn test_explicit_url() {
        let args = parse(&["taxo", "ingest", "--url", "http://localhost:8000/feed.json"]);
        assert_eq!(args.source(), FeedSource::Url("http://localhost:8000/feed.json".to_string()));
    }
}
