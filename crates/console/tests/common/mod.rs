//! Common test utilities for console integration tests.
//!
//! Builds an [`App`] over in-memory services so scenarios run without a
//! backend.

// Not every test uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use client::MemoryTokenStore;
use domain::models::{Alarm, CustomerGroup, GeofenceGroup, User, VehicleGroup};
use domain::services::{
    EntityService, InMemoryEntityService, InMemoryOptionProvider, OptionProvider,
};
use fleet_admin_console::app::{App, AppSettings, Services};
use fleet_admin_console::config::Config;
use fleet_admin_console::session::Session;
use jsonwebtoken::{encode, EncodingKey, Header};

/// A user record; the email is derived from the username.
pub fn user(id: i64, name: &str, username: &str) -> User {
    User {
        id: Some(id),
        name: name.to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        active: true,
        role: "admin".to_string(),
        ..User::default()
    }
}

pub fn customer_group(id: i64, name: &str) -> CustomerGroup {
    CustomerGroup {
        id: Some(id),
        group_name: name.to_string(),
        ..CustomerGroup::default()
    }
}

/// Session token whose `sub` claim is `user_id`.
pub fn token_for(user_id: i64) -> String {
    let claims = serde_json::json!({ "sub": user_id.to_string(), "exp": 4102444800u64 });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode test token")
}

pub struct TestApp {
    pub app: App,
    pub session: Session,
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::default()
    }
}

pub struct TestAppBuilder {
    users: Arc<dyn EntityService<User>>,
    customer_groups: Arc<dyn EntityService<CustomerGroup>>,
    vehicle_groups: Arc<dyn EntityService<VehicleGroup>>,
    geofence_groups: Arc<dyn EntityService<GeofenceGroup>>,
    alarms: Arc<dyn EntityService<Alarm>>,
    options: Arc<dyn OptionProvider>,
    token: Option<String>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            users: Arc::new(InMemoryEntityService::<User>::default()),
            customer_groups: Arc::new(InMemoryEntityService::<CustomerGroup>::default()),
            vehicle_groups: Arc::new(InMemoryEntityService::<VehicleGroup>::default()),
            geofence_groups: Arc::new(InMemoryEntityService::<GeofenceGroup>::default()),
            alarms: Arc::new(InMemoryEntityService::<Alarm>::default()),
            options: Arc::new(InMemoryOptionProvider::new()),
            token: None,
        }
    }
}

impl TestAppBuilder {
    pub fn users(mut self, service: Arc<dyn EntityService<User>>) -> Self {
        self.users = service;
        self
    }

    pub fn customer_groups(mut self, service: Arc<dyn EntityService<CustomerGroup>>) -> Self {
        self.customer_groups = service;
        self
    }

    pub fn failing_options(mut self) -> Self {
        self.options = Arc::new(InMemoryOptionProvider::failing());
        self
    }

    pub fn signed_in_as(mut self, user_id: i64) -> Self {
        self.token = Some(token_for(user_id));
        self
    }

    pub fn build(self) -> TestApp {
        let config = Config::load_for_test(&[]).expect("Failed to load test config");
        let tokens = match self.token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        };
        let session = Session::new(Arc::new(tokens));
        let services = Services {
            users: self.users,
            customer_groups: self.customer_groups,
            vehicle_groups: self.vehicle_groups,
            geofence_groups: self.geofence_groups,
            alarms: self.alarms,
            options: self.options,
        };
        let app = App::new(
            services,
            session.clone(),
            AppSettings {
                page_size: config.listing.page_size,
                search_debounce: config.search_debounce(),
            },
        );
        TestApp { app, session }
    }
}
