//! Activity repository. Activities are merged by `name`; description,
//! reference and sector name are carried as properties.

use taxo_core::{Activity, NodeId};

use super::NodeEntity;
use crate::error::GraphResult;
use crate::store::{ParamValue, UnitOfWork};

impl NodeEntity for Activity {
    const LABEL: &'static str = "Activity";
    const KEY: &'static str = "name";

    fn id(&self) -> Option<NodeId> {
        self.id
    }

    fn key(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("description", self.description.clone().into()),
            ("reference", self.reference.into()),
            ("sector", self.sector.clone().into()),
        ]
    }
}

pub async fn create<W: UnitOfWork>(work: &mut W, activity: &Activity) -> GraphResult<Activity> {
    super::create(work, activity).await
}

pub async fn bulk_upsert<W: UnitOfWork>(work: &mut W, activities: &[Activity]) -> GraphResult<usize> {
    super::bulk_upsert(work, activities).await
}

pub async fn get_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<Option<Activity>> {
    super::get_by_id(work, id).await
}

pub async fn get_by_name<W: UnitOfWork>(work: &mut W, name: &str) -> GraphResult<Option<Activity>> {
    super::get_by_key(work, name).await
}

pub async fn get_all<W: UnitOfWork>(work: &mut W) -> GraphResult<Vec<Activity>> {
    super::get_all(work).await
}

pub async fn update<W: UnitOfWork>(work: &mut W, activity: &Activity) -> GraphResult<Option<Activity>> {
    super::update(work, activity).await
}

pub async fn delete_by_id<W: UnitOfWork>(work: &mut W, id: NodeId) -> GraphResult<bool> {
    super::delete_by_id::<Activity, W>(work, id).await
}
