//! Administrative deletion of single nodes and edges.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;

use taxo_core::NodeId;
use taxo_graph::relationships::delete_edge;
use taxo_graph::repository::{activity, criteria, objective, sector};
use taxo_graph::{within, EdgeKind, EdgeRef, GraphStore};

use super::DbArgs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NodeKind {
    Sector,
    Activity,
    Objective,
    Criteria,
}

#[derive(Subcommand)]
pub enum DeleteCommands {
    /// Delete a node and its relationships
    Node {
        #[arg(value_enum)]
        kind: NodeKind,
        /// Node id
        id: String,
    },

    /// Delete the edge of a kind between two nodes given by semantic key
    Edge {
        /// has_activity, contributes, dnsh_link, dnsh_criteria or sc_criteria
        kind: EdgeKind,
        /// Source key (sector/activity name or objective key)
        from: String,
        /// Target key (activity name, objective key or criteria text)
        to: String,
    },
}

async fn delete_node<S: GraphStore + ?Sized>(store: &S, kind: NodeKind, id: NodeId) -> Result<bool> {
    let deleted = within(store, |mut work| async move {
        let result = match kind {
            NodeKind::Sector => sector::delete_by_id(&mut work, id).await,
            NodeKind::Activity => activity::delete_by_id(&mut work, id).await,
            NodeKind::Objective => objective::delete_by_id(&mut work, id).await,
            NodeKind::Criteria => criteria::delete_by_id(&mut work, id).await,
        };
        (work, result)
    })
    .await?;
    Ok(deleted)
}

pub async fn execute(cmd: DeleteCommands, db: &DbArgs) -> Result<()> {
    let client = db.connect().await?;

    match cmd {
        DeleteCommands::Node { kind, id } => {
            let id: NodeId = id.parse()?;
            if delete_node(&client, kind, id).await? {
                println!("{} {:?} {}", "Deleted".green(), kind, id.to_string().yellow());
            } else {
                println!("{} {:?} {}", "No".dimmed(), kind, id.to_string().yellow());
            }
        }
        DeleteCommands::Edge { kind, from, to } => {
            let edge = EdgeRef::new(kind, from, to);
            let deleted = within(&client, |mut work| async move {
                let result = delete_edge(&mut work, &edge).await.map(|d| (d, edge));
                (work, result)
            })
            .await?;

            let (found, edge) = deleted;
            let verb = if found { "Deleted".green() } else { "No".dimmed() };
            println!("{} {} {} -> {}", verb, edge.kind, edge.from.cyan(), edge.to.cyan());
        }
    }

    Ok(())
}
