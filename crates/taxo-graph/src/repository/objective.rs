//! Objective repository. Objectives are merged by their short `key`.

use taxo_core::{NodeId, Objective};

use super::NodeEntity;
use crate::error::GraphResult;
use crate::store::{ParamValue, UnitOfWork};

impl NodeEntity for Objective {
    const LABEL: &'static str = "Objective";
    const KEY: &'static str = "key";

    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn attributes(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("name", self.name.as_str().into()),
            ("long_name", self.long_name.as_str().into()),
        ]
    }
}

pub async fn create<W: UnitOfWork>(work: &mut W, objective: &Objective) -> GraphResult<Objective> {
    super::create(work, objective).await
}

pub async fn bulk_upsert<W: UnitOfWork>(work: &mut W, objectives: &[Objective]) -> GraphResult<usize> {
    super::bulk_upsert(work, objectives).await
}

pub async fn get_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<Option<Objective>> {
    super::get_by_id(work, id).await
}

pub async fn get_by_key<W: UnitOfWork>(work: &mut W, key: &str) -> GraphResult<Option<Objective>> {
    super::get_by_key(work, key).await
}

pub async fn get_all<W: UnitOfWork>(work: &mut W) -> GraphResult<Vec<Objective>> {
    super::get_all(work).await
}

pub async fn update<W: UnitOfWork>(work: &mut W, objective: &Objective) -> GraphResult<Option<Objective>> {
    super::update(work, objective).await
}

pub async fn delete_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<bool> {
    super::delete_by_id::<Objective, W>(work, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GraphStore;
    use crate::testutil::RecordingStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_returns_stored_objective() {
        let store = RecordingStore::with_responder(|_| {
            Ok(vec![json!({"node": {
                "id": 11,
                "name": "Climate mitigation",
                "long_name": "Climate change mitigation",
                "key": "mitigation"
            }})])
        });
        let mut work = store.begin().await.unwrap();

        let mut objective = Objective::new("mitigation", "Climate mitigation");
        objective.long_name = "Climate change mitigation".to_string();
        let stored = create(&mut work, &objective).await.unwrap();

        assert_eq!(stored.id, Some(NodeId(11)));
        assert_eq!(stored.key, "mitigation");

        let stmt = &store.statements()[0];
        assert!(stmt.text().starts_with("MERGE (n:Objective {key: $key})"));
        assert!(stmt.text().contains("n.name = $name, n.long_name = $long_name"));
    }

    #[tokio::test]
    async fn test_update_filters_on_node_identity() {
        let store = RecordingStore::new();
        let mut work = store.begin().await.unwrap();

        let mut objective = Objective::new("adaptation", "Climate adaptation");
        objective.id = Some(NodeId(4));
        let updated = update(&mut work, &objective).await.unwrap();
        assert!(updated.is_none());

        let stmt = &store.statements()[0];
        assert!(stmt.text().starts_with("MATCH (n:Objective) WHERE id(n) = $id SET n.key = $key"));
        assert_eq!(stmt.get_param("id"), Some(&ParamValue::Int(4)));
    }
}
