//! Graph status command.

use anyhow::Result;
use clap::Args;

use taxo_graph::resolver;

use super::{into_data, print_json, DbArgs};
use crate::output;

#[derive(Args)]
pub struct StatusArgs {
    /// Print counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: StatusArgs, db: &DbArgs) -> Result<()> {
    let client = db.connect().await?;
    let counts = into_data(resolver::get_graph_counts(&client).await)?;

    if args.json {
        print_json(&counts)
    } else {
        output::print_counts(&counts, &db.db_url);
        Ok(())
    }
}
