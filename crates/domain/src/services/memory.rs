//! In-memory service implementations for development and testing.
//!
//! Records live in a `Vec` guarded by a mutex. Every call is counted so tests
//! can assert that a rejected form never reached the data layer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{EntityService, OptionProvider, ServiceError};
use crate::forms::{OptionSource, SelectOption};
use crate::listing::matches_query;
use crate::models::Entity;

/// Per-operation call counts.
#[derive(Debug, Default)]
struct CallCounts {
    list: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    search: AtomicUsize,
}

/// Mock entity service backed by a vector.
#[derive(Debug)]
pub struct InMemoryEntityService<E: Entity> {
    records: Mutex<Vec<E>>,
    next_id: AtomicI64,
    calls: CallCounts,
    failure: Mutex<Option<ServiceError>>,
}

impl<E: Entity> Default for InMemoryEntityService<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Entity> InMemoryEntityService<E> {
    /// Seeds the service. New ids continue after the highest seeded id.
    pub fn new(records: Vec<E>) -> Self {
        let max_id = records.iter().filter_map(|r| r.id()).max().unwrap_or(0);
        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(max_id + 1),
            calls: CallCounts::default(),
            failure: Mutex::new(None),
        }
    }

    /// Makes every following call fail with `error`.
    pub fn fail_with(&self, error: ServiceError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(error);
        }
    }

    pub fn clear_failure(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    pub fn records(&self) -> Vec<E> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.calls.delete.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.calls.search.load(Ordering::SeqCst)
    }

    /// Total number of calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.list_calls()
            + self.create_calls()
            + self.update_calls()
            + self.delete_calls()
            + self.search_calls()
    }

    fn check_failure(&self) -> Result<(), ServiceError> {
        match self.failure.lock() {
            Ok(failure) => match failure.as_ref() {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            },
            Err(_) => Err(ServiceError::Network("store lock poisoned".to_string())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<E>>, ServiceError> {
        self.records
            .lock()
            .map_err(|_| ServiceError::Network("store lock poisoned".to_string()))
    }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::Status {
            status: 404,
            message: Some(format!("{} {} not found", E::NAME, id)),
        }
    }
}

#[async_trait::async_trait]
impl<E: Entity> EntityService<E> for InMemoryEntityService<E> {
    async fn list(&self) -> Result<Vec<E>, ServiceError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.lock()?.clone())
    }

    async fn create(&self, entity: &E) -> Result<E, ServiceError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut created = entity.clone();
        created.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.lock()?.push(created.clone());
        tracing::debug!(entity = E::NAME, id = ?created.id(), "Mock: created record");
        Ok(created)
    }

    async fn update(&self, id: i64, entity: &E) -> Result<E, ServiceError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut records = self.lock()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        let mut updated = entity.clone();
        updated.set_id(id);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<E>, ServiceError> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self
            .lock()?
            .iter()
            .filter(|r| matches_query(*r, query))
            .cloned()
            .collect())
    }
}

/// Mock option provider with fixed option lists.
#[derive(Debug, Default)]
pub struct InMemoryOptionProvider {
    options: HashMap<OptionSource, Vec<SelectOption>>,
    simulate_failure: bool,
}

impl InMemoryOptionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            options: HashMap::new(),
            simulate_failure: true,
        }
    }

    pub fn with(mut self, source: OptionSource, options: Vec<SelectOption>) -> Self {
        self.options.insert(source, options);
        self
    }
}

#[async_trait::async_trait]
impl OptionProvider for InMemoryOptionProvider {
    async fn options(&self, source: OptionSource) -> Result<Vec<SelectOption>, ServiceError> {
        if self.simulate_failure {
            tracing::warn!(source = %source, "Mock option provider simulating failure");
            return Err(ServiceError::Network("Simulated failure".to_string()));
        }
        Ok(self.options.get(&source).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerGroup;

    fn group(id: i64, name: &str) -> CustomerGroup {
        CustomerGroup {
            id: Some(id),
            group_name: name.to_string(),
            ..CustomerGroup::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let service = InMemoryEntityService::new(vec![group(4, "VIP Customers")]);
        let created = service.create(&group(0, "Fleet A")).await.unwrap();
        assert_eq!(created.id, Some(5));
        assert_eq!(service.list().await.unwrap().len(), 2);
        assert_eq!(service.create_calls(), 1);
        assert_eq!(service.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = InMemoryEntityService::new(vec![group(1, "A"), group(2, "B")]);
        let updated = service.update(2, &group(2, "B2")).await.unwrap();
        assert_eq!(updated.group_name, "B2");

        service.delete(1).await.unwrap();
        assert_eq!(service.records(), vec![group(2, "B2")]);
        assert!(matches!(
            service.delete(1).await,
            Err(ServiceError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_filters_records() {
        let service = InMemoryEntityService::new(vec![group(1, "North"), group(2, "South")]);
        let found = service.search("nor").await.unwrap();
        assert_eq!(found, vec![group(1, "North")]);
        assert_eq!(service.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let service: InMemoryEntityService<CustomerGroup> = InMemoryEntityService::default();
        service.fail_with(ServiceError::status("boom", 500));
        assert!(service.list().await.is_err());
        service.clear_failure();
        assert!(service.list().await.is_ok());
        assert_eq!(service.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_option_provider() {
        let provider = InMemoryOptionProvider::new().with(
            OptionSource::Customers,
            vec![SelectOption {
                id: 1,
                name: "Acme".to_string(),
            }],
        );
        assert_eq!(provider.options(OptionSource::Customers).await.unwrap().len(), 1);
        assert!(provider.options(OptionSource::Vehicles).await.unwrap().is_empty());
        assert!(InMemoryOptionProvider::failing()
            .options(OptionSource::Customers)
            .await
            .is_err());
    }
}
