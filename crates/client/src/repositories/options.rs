//! Multi-select option lookups.

use domain::forms::{OptionSource, SelectOption};
use domain::models::{Customer, Entity, Geofence, Vehicle};
use domain::services::{EntityService, OptionProvider, ServiceError};

use crate::entities::{
    CustomerEntity, CustomerGroupEntity, GeofenceEntity, GeofenceGroupEntity, VehicleEntity,
    VehicleGroupEntity, WireEntity,
};
use crate::http::ApiClient;
use crate::repositories::ResourceRepository;

/// Resource paths of the read-only option sources.
const CUSTOMER_RESOURCE: &str = "customer";
const GEOFENCE_RESOURCE: &str = "geofence";
const VEHICLE_RESOURCE: &str = "vehicle";

/// Option provider reading from the backend.
#[derive(Debug, Clone)]
pub struct RestOptionProvider {
    api: ApiClient,
}

impl RestOptionProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn group_options<W: WireEntity>(&self) -> Result<Vec<SelectOption>, ServiceError> {
        let records = ResourceRepository::<W>::new(self.api.clone()).list().await?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                record.id().map(|id| SelectOption {
                    id,
                    name: record.title(),
                })
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl OptionProvider for RestOptionProvider {
    async fn options(&self, source: OptionSource) -> Result<Vec<SelectOption>, ServiceError> {
        let options = match source {
            OptionSource::Customers => {
                let entities: Vec<CustomerEntity> = self.api.get(CUSTOMER_RESOURCE, &[]).await?;
                entities
                    .into_iter()
                    .map(|e| SelectOption::from(Customer::from(e)))
                    .collect()
            }
            OptionSource::Geofences => {
                let entities: Vec<GeofenceEntity> = self.api.get(GEOFENCE_RESOURCE, &[]).await?;
                entities
                    .into_iter()
                    .map(|e| SelectOption::from(Geofence::from(e)))
                    .collect()
            }
            OptionSource::Vehicles => {
                let entities: Vec<VehicleEntity> = self.api.get(VEHICLE_RESOURCE, &[]).await?;
                entities
                    .into_iter()
                    .map(|e| SelectOption::from(Vehicle::from(e)))
                    .collect()
            }
            OptionSource::CustomerGroups => self.group_options::<CustomerGroupEntity>().await?,
            OptionSource::GeofenceGroups => self.group_options::<GeofenceGroupEntity>().await?,
            OptionSource::VehicleGroups => self.group_options::<VehicleGroupEntity>().await?,
        };
        tracing::debug!(source = %source, count = options.len(), "Loaded options");
        Ok(options)
    }
}
