//! Activity query commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use taxo_core::NodeId;
use taxo_graph::{resolver, ActivitySelector};

use super::{into_data, print_json, DbArgs};
use crate::output;

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// List all activities
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one activity by node id
    Get {
        /// Node id
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Main objectives of one activity
    Objectives {
        /// Activity name, or node id with --by-id
        activity: String,
        /// Treat the argument as a node id
        #[arg(long)]
        by_id: bool,
        #[arg(long)]
        json: bool,
    },

    /// Main objectives of every activity, with DNSH and SC criteria
    AllObjectives {
        #[arg(long)]
        json: bool,
    },
}

fn selector(activity: String, by_id: bool) -> Result<ActivitySelector> {
    if by_id {
        Ok(ActivitySelector::Id(activity.parse::<NodeId>()?))
    } else {
        Ok(ActivitySelector::Name(activity))
    }
}

pub async fn execute(cmd: ActivityCommands, db: &DbArgs) -> Result<()> {
    let client = db.connect().await?;

    match cmd {
        ActivityCommands::List { json } => {
            let activities = into_data(resolver::list_activities(&client).await)?;
            if json {
                return print_json(&activities);
            }
            output::print_activities_table(&activities);
        }
        ActivityCommands::Get { id, json } => {
            let activity = into_data(resolver::get_activity_by_id(&client, &id).await)?;
            if json {
                return print_json(&activity);
            }
            match activity {
                Some(activity) => output::print_activity(&activity),
                None => println!("{} {}", "No activity with id".dimmed(), id.yellow()),
            }
        }
        ActivityCommands::Objectives { activity, by_id, json } => {
            let selector = selector(activity, by_id)?;
            let matches =
                into_data(resolver::get_activity_main_objectives(&client, &selector).await)?;
            if json {
                return print_json(&matches);
            }
            output::print_matches(&matches);
        }
        ActivityCommands::AllObjectives { json } => {
            let matches = into_data(resolver::get_all_activities_main_objectives(&client).await)?;
            if json {
                return print_json(&matches);
            }
            output::print_detailed_matches(&matches);
        }
    }

    Ok(())
}
