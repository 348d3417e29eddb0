//! Console application state: screens, toasts and the search debounce.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use client::repositories::{
    AlarmRepository, CustomerGroupRepository, GeofenceGroupRepository, RestOptionProvider,
    UserRepository, VehicleGroupRepository,
};
use client::ApiClient;
use domain::models::{Alarm, CustomerGroup, GeofenceGroup, User, VehicleGroup};
use domain::services::{EntityService, Notifier, OptionProvider, Toast, ToastQueue};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::command::{Command, ScreenKind, HELP};
use crate::debounce::SearchDebounce;
use crate::screens::{Outcome, Panel, Screen, ScreenContext};
use crate::session::Session;
use crate::view::render_toasts;

/// Data access behind the screens.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn EntityService<User>>,
    pub customer_groups: Arc<dyn EntityService<CustomerGroup>>,
    pub vehicle_groups: Arc<dyn EntityService<VehicleGroup>>,
    pub geofence_groups: Arc<dyn EntityService<GeofenceGroup>>,
    pub alarms: Arc<dyn EntityService<Alarm>>,
    pub options: Arc<dyn OptionProvider>,
}

impl Services {
    /// Services backed by the REST API.
    pub fn rest(api: ApiClient) -> Self {
        Self {
            users: Arc::new(UserRepository::new(api.clone())),
            customer_groups: Arc::new(CustomerGroupRepository::new(api.clone())),
            vehicle_groups: Arc::new(VehicleGroupRepository::new(api.clone())),
            geofence_groups: Arc::new(GeofenceGroupRepository::new(api.clone())),
            alarms: Arc::new(AlarmRepository::new(api.clone())),
            options: Arc::new(RestOptionProvider::new(api)),
        }
    }
}

/// Settings the app needs from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub page_size: usize,
    pub search_debounce: Duration,
}

pub struct App {
    screens: BTreeMap<ScreenKind, Box<dyn Panel>>,
    active: ScreenKind,
    toasts: Arc<ToastQueue>,
    debounce: SearchDebounce,
    show_help: bool,
}

impl App {
    pub fn new(services: Services, session: Session, settings: AppSettings) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let ctx = ScreenContext {
            notifier: toasts.clone(),
            options: services.options.clone(),
            session,
            page_size: settings.page_size,
        };

        let mut screens: BTreeMap<ScreenKind, Box<dyn Panel>> = BTreeMap::new();
        screens.insert(
            ScreenKind::Users,
            Box::new(
                Screen::new(ScreenKind::Users, services.users, ctx.clone())
                    .logout_on_self_delete(),
            ),
        );
        screens.insert(
            ScreenKind::CustomerGroups,
            Box::new(Screen::new(
                ScreenKind::CustomerGroups,
                services.customer_groups,
                ctx.clone(),
            )),
        );
        screens.insert(
            ScreenKind::VehicleGroups,
            Box::new(Screen::new(
                ScreenKind::VehicleGroups,
                services.vehicle_groups,
                ctx.clone(),
            )),
        );
        screens.insert(
            ScreenKind::GeofenceGroups,
            Box::new(Screen::new(
                ScreenKind::GeofenceGroups,
                services.geofence_groups,
                ctx.clone(),
            )),
        );
        screens.insert(
            ScreenKind::Alarms,
            Box::new(Screen::new(ScreenKind::Alarms, services.alarms, ctx)),
        );

        Self {
            screens,
            active: ScreenKind::Users,
            toasts,
            debounce: SearchDebounce::new(settings.search_debounce),
            show_help: false,
        }
    }

    pub fn active(&self) -> ScreenKind {
        self.active
    }

    pub fn panel(&self, kind: ScreenKind) -> Option<&dyn Panel> {
        self.screens.get(&kind).map(|panel| panel.as_ref())
    }

    fn active_panel(&mut self) -> Option<&mut Box<dyn Panel>> {
        self.screens.get_mut(&self.active)
    }

    /// Loads the initial screen.
    pub async fn start(&mut self) {
        if let Some(panel) = self.active_panel() {
            panel.refresh().await;
        }
    }

    /// Parses and runs one input line. Blank lines only re-render.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Continue;
        }
        match line.parse::<Command>() {
            Ok(command) => self.handle(command).await,
            Err(e) => {
                self.toasts.notify(Toast::error(e.to_string()));
                Outcome::Continue
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        self.show_help = false;
        match command {
            Command::Switch(kind) => {
                self.debounce.cancel();
                self.active = kind;
                info!(screen = %kind, "Switched screen");
                if let Some(panel) = self.active_panel() {
                    panel.refresh().await;
                }
                Outcome::Continue
            }
            Command::Search(query) => {
                let screen = self.active;
                if let Some(panel) = self.active_panel() {
                    panel.set_query(&query);
                }
                self.debounce.push(screen, query);
                Outcome::Continue
            }
            Command::Help => {
                self.show_help = true;
                Outcome::Continue
            }
            Command::Quit => Outcome::Quit,
            command => match self.active_panel() {
                Some(panel) => panel.execute(command).await,
                None => Outcome::Continue,
            },
        }
    }

    /// When the pending search becomes due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Submits the pending search once its window has elapsed.
    pub async fn run_due_search(&mut self, now: Instant) -> bool {
        let Some(pending) = self.debounce.take_due(now) else {
            return false;
        };
        debug!(screen = %pending.screen, query = %pending.query, "Submitting search");
        match self.screens.get_mut(&pending.screen) {
            Some(panel) => {
                panel.search(&pending.query).await;
                true
            }
            None => false,
        }
    }

    /// The active screen followed by pending toasts, which are consumed.
    pub fn render(&mut self) -> String {
        let mut out = match self.screens.get(&self.active) {
            Some(panel) => panel.render(),
            None => String::new(),
        };
        if self.show_help {
            out.push_str("\n\n");
            out.push_str(HELP);
        }
        let toasts = render_toasts(&self.toasts.drain());
        if !toasts.is_empty() {
            out.push_str("\n\n");
            out.push_str(&toasts);
        }
        out
    }
}
