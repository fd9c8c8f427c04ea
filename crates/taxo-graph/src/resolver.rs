//! Query-layer operations.
//!
//! Each operation opens its own unit of work and turns the outcome into an
//! [`Envelope`]: absence is a successful empty result, any error becomes a
//! failure carrying the error message.

use tracing::debug;

use taxo_core::{Activity, Envelope, NodeId};

use crate::error::GraphResult;
use crate::queries::objectives::{self, ActivitySelector, DetailedObjectiveMatch, ObjectiveMatch};
use crate::queries::stats::{self, GraphCounts};
use crate::repository::activity;
use crate::store::{within, GraphStore};

fn envelope<T>(operation: &str, result: GraphResult<T>) -> Envelope<T> {
    if let Err(e) = &result {
        debug!(operation, error = %e, "Query failed");
    }
    Envelope::from_result(result)
}

async fn lookup_activity<S>(store: &S, id: &str) -> GraphResult<Option<Activity>>
where
    S: GraphStore + ?Sized,
{
    let id: NodeId = id.parse()?;
    within(store, |mut work| async move {
        let result = activity::get_by_id(&mut work, id).await;
        (work, result)
    })
    .await
}

/// Activity by store identity. A malformed id is a failure; an unknown id is
/// a success without data.
pub async fn get_activity_by_id<S>(store: &S, id: &str) -> Envelope<Option<Activity>>
where
    S: GraphStore + ?Sized,
{
    envelope("get_activity_by_id", lookup_activity(store, id).await)
}

pub async fn list_activities<S>(store: &S) -> Envelope<Vec<Activity>>
where
    S: GraphStore + ?Sized,
{
    let result = within(store, |mut work| async move {
        let result = activity::get_all(&mut work).await;
        (work, result)
    })
    .await;
    envelope("list_activities", result)
}

pub async fn get_activity_main_objectives<S>(
    store: &S,
    selector: &ActivitySelector,
) -> Envelope<Vec<ObjectiveMatch>>
where
    S: GraphStore + ?Sized,
{
    let result = within(store, |mut work| async move {
        let result = objectives::main_objectives(&mut work, selector).await;
        (work, result)
    })
    .await;
    envelope("get_activity_main_objectives", result)
}

/// Main objectives of the activity with the given textual id.
pub async fn get_activity_main_objectives_by_id<S>(
    store: &S,
    id: &str,
) -> Envelope<Vec<ObjectiveMatch>>
where
    S: GraphStore + ?Sized,
{
    match id.parse::<NodeId>() {
        Ok(id) => get_activity_main_objectives(store, &ActivitySelector::Id(id)).await,
        Err(e) => Envelope::failure(vec![e.to_string()]),
    }
}

pub async fn get_all_activities_main_objectives<S>(store: &S) -> Envelope<Vec<DetailedObjectiveMatch>>
where
    S: GraphStore + ?Sized,
{
    let result = within(store, |mut work| async move {
        let result = objectives::all_main_objectives(&mut work).await;
        (work, result)
    })
    .await;
    envelope("get_all_activities_main_objectives", result)
}

pub async fn get_graph_counts<S>(store: &S) -> Envelope<GraphCounts>
where
    S: GraphStore + ?Sized,
{
    let result = within(store, |mut work| async move {
        let result = stats::graph_counts(&mut work).await;
        (work, result)
    })
    .await;
    envelope("get_graph_counts", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{store_failure, RecordingStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_id_is_success_without_data() {
        let store = RecordingStore::new();
        let envelope = get_activity_by_id(&store, "999").await;

        assert!(envelope.is_success());
        assert_eq!(envelope.data, Some(None));
        assert_eq!(store.commits(), 1);
    }

    #[tokio::test]
    async fn test_malformed_id_is_failure_without_store_access() {
        let store = RecordingStore::new();
        let envelope = get_activity_by_id(&store, "solar").await;

        assert!(!envelope.is_success());
        assert!(envelope.errors[0].contains("solar"));
        assert!(store.statements().is_empty());

        let objectives = get_activity_main_objectives_by_id(&store, "12a").await;
        assert!(!objectives.is_success());
    }

    #[tokio::test]
    async fn test_list_activities_wraps_rows() {
        let store = RecordingStore::with_responder(|_| {
            Ok(vec![json!({"node": {"id": 1, "name": "Solar power", "sector": "Energy"}})])
        });
        let envelope = list_activities(&store).await;

        let activities = envelope.data.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name, "Solar power");
        assert_eq!(activities[0].id, Some(NodeId(1)));
    }

    #[tokio::test]
    async fn test_store_error_becomes_failure_envelope() {
        let store = RecordingStore::with_responder(|_| Err(store_failure("connection refused")));
        let envelope = get_all_activities_main_objectives(&store).await;

        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors, vec!["Store error: connection refused".to_string()]);
        assert_eq!(store.rollbacks(), 1);
    }

    #[tokio::test]
    async fn test_by_name_with_no_matches_is_empty_success() {
        let store = RecordingStore::new();
        let envelope = get_activity_main_objectives(
            &store,
            &ActivitySelector::Name("Unknown".to_string()),
        )
        .await;

        assert!(envelope.is_success());
        assert_eq!(envelope.data, Some(Vec::new()));
    }
}
