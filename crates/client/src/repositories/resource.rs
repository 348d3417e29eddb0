//! Generic CRUD repository for one backend resource.

use std::marker::PhantomData;

use domain::services::{EntityService, ServiceError};

use crate::entities::{
    AlarmEntity, CustomerGroupEntity, GeofenceGroupEntity, UserEntity, VehicleGroupEntity,
    WireEntity,
};
use crate::http::ApiClient;

/// Repository for the resource served under `/{W::RESOURCE}`.
pub struct ResourceRepository<W: WireEntity> {
    api: ApiClient,
    _wire: PhantomData<fn() -> W>,
}

pub type UserRepository = ResourceRepository<UserEntity>;
pub type CustomerGroupRepository = ResourceRepository<CustomerGroupEntity>;
pub type GeofenceGroupRepository = ResourceRepository<GeofenceGroupEntity>;
pub type VehicleGroupRepository = ResourceRepository<VehicleGroupEntity>;
pub type AlarmRepository = ResourceRepository<AlarmEntity>;

impl<W: WireEntity> Clone for ResourceRepository<W> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<W: WireEntity> ResourceRepository<W> {
    /// Creates a new repository on the given client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _wire: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", W::RESOURCE, id)
    }

    async fn fetch_all(&self) -> Result<Vec<W::Model>, ServiceError> {
        let entities: Vec<W> = self.api.get(W::RESOURCE, &[]).await?;
        Ok(entities.into_iter().map(W::Model::from).collect())
    }
}

#[async_trait::async_trait]
impl<W: WireEntity> EntityService<W::Model> for ResourceRepository<W> {
    async fn list(&self) -> Result<Vec<W::Model>, ServiceError> {
        let records = self.fetch_all().await?;
        tracing::debug!(resource = W::RESOURCE, count = records.len(), "Listed records");
        Ok(records)
    }

    async fn create(&self, entity: &W::Model) -> Result<W::Model, ServiceError> {
        let body = W::from_model(entity);
        let created: W = self.api.post(W::RESOURCE, &body).await?;
        Ok(W::Model::from(created))
    }

    async fn update(&self, id: i64, entity: &W::Model) -> Result<W::Model, ServiceError> {
        let body = W::from_model(entity);
        let updated: W = self.api.put(&Self::item_path(id), &body).await?;
        Ok(W::Model::from(updated))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.api.delete(&Self::item_path(id)).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<W::Model>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return self.fetch_all().await;
        }
        let path = format!("{}/search", W::RESOURCE);
        let entities: Vec<W> = self.api.get(&path, &[("query", query)]).await?;
        tracing::debug!(
            resource = W::RESOURCE,
            query,
            count = entities.len(),
            "Searched records"
        );
        Ok(entities.into_iter().map(W::Model::from).collect())
    }
}
