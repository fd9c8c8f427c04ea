//! Sector repository. Sectors are merged by `name`.

use taxo_core::{NodeId, Sector};

use super::NodeEntity;
use crate::error::GraphResult;
use crate::store::{ParamValue, UnitOfWork};

impl NodeEntity for Sector {
    const LABEL: &'static str = "Sector";
    const KEY: &'static str = "name";

    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> Vec<(&'static str, ParamValue)> {
        vec![("reference", self.reference.into())]
    }
}

pub async fn create<W: UnitOfWork>(work: &mut W, sector: &Sector) -> GraphResult<Sector> {
    super::create(work, sector).await
}

pub async fn bulk_upsert<W: UnitOfWork>(work: &mut W, sectors: &[Sector]) -> GraphResult<usize> {
    super::bulk_upsert(work, sectors).await
}

pub async fn get_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<Option<Sector>> {
    super::get_by_id(work, id).await
}

pub async fn get_by_name<W: UnitOfWork>(work: &mut W, name: &str) -> GraphResult<Option<Sector>> {
    super::get_by_key(work, name).await
}

pub async fn get_all<W: UnitOfWork>(work: &mut W) -> GraphResult<Vec<Sector>> {
    super::get_all(work).await
}

pub async fn update<W: UnitOfWork>(work: &mut W, sector: &Sector) -> GraphResult<Option<Sector>> {
    super::update(work, sector).await
}

pub async fn delete_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<bool> {
    super::delete_by_id::<Sector, W>(work, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GraphStore;
    use crate::testutil::RecordingStore;

    #[tokio::test]
    async fn test_bulk_upsert_merges_on_name() {
        let store = RecordingStore::new();
        let mut work = store.begin().await.unwrap();

        let sectors = vec![Sector::new("Energy"), Sector::new("Forestry")];
        let count = bulk_upsert(&mut work, &sectors).await.unwrap();
        assert_eq!(count, 2);

        let statements = store.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].text().starts_with("MERGE (n:Sector {name: $key})"));
        assert!(!statements[0].text().contains("CREATE"));
        assert_eq!(statements[1].get_param("key").and_then(ParamValue::as_str), Some("Forestry"));
    }

    #[tokio::test]
    async fn test_absent_reference_is_sent_as_null() {
        let store = RecordingStore::new();
        let mut work = store.begin().await.unwrap();

        bulk_upsert(&mut work, &[Sector::new("Energy")]).await.unwrap();

        let stmt = &store.statements()[0];
        assert!(stmt.text().contains("SET n.reference = $reference"));
        assert!(stmt.get_param("reference").map(ParamValue::is_null).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_reference_is_sent_as_integer() {
        let store = RecordingStore::new();
        let mut work = store.begin().await.unwrap();

        let mut energy = Sector::new("Energy");
        energy.reference = Some(4);
        bulk_upsert(&mut work, &[energy]).await.unwrap();

        let stmt = &store.statements()[0];
        assert_eq!(stmt.get_param("reference"), Some(&ParamValue::Int(4)));
    }
}
