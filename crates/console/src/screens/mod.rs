//! Admin screens: one listing table plus one drawer per entity type.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain::forms::{Drawer, DrawerMode, EntityForm, FieldKind, OptionSource};
use domain::listing::SortColumn;
use domain::services::{
    failure_message, success_message, CrudAction, EntityService, Notifier, OptionProvider, Toast,
};
use tracing::{debug, info, warn};

use crate::command::{Command, ScreenKind};
use crate::session::Session;
use crate::view::{render_drawer, render_table, TableRow, TableState};

/// What the event loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The session ended; the console exits.
    Logout,
    Quit,
}

/// Collaborators shared by every screen.
#[derive(Clone)]
pub struct ScreenContext {
    pub notifier: Arc<dyn Notifier>,
    pub options: Arc<dyn OptionProvider>,
    pub session: Session,
    pub page_size: usize,
}

/// A screen as seen by the console loop.
#[async_trait]
pub trait Panel: Send {
    fn kind(&self) -> ScreenKind;

    /// Applies a query to the loaded records without fetching.
    fn set_query(&mut self, query: &str);

    /// Refetches the records, honouring the active query.
    async fn refresh(&mut self);

    /// Submits a server-side search and shows its results.
    async fn search(&mut self, query: &str);

    async fn execute(&mut self, command: Command) -> Outcome;

    fn render(&self) -> String;

    /// Titles of the rows on the current page.
    fn visible_titles(&self) -> Vec<String>;
}

/// Table and drawer of one entity type.
pub struct Screen<E: TableRow> {
    kind: ScreenKind,
    service: Arc<dyn EntityService<E>>,
    table: TableState<E>,
    drawer: Drawer<E::Form>,
    logout_on_self_delete: bool,
    ctx: ScreenContext,
}

impl<E: TableRow> Screen<E> {
    pub fn new(kind: ScreenKind, service: Arc<dyn EntityService<E>>, ctx: ScreenContext) -> Self {
        Self {
            kind,
            service,
            table: TableState::new(ctx.page_size),
            drawer: Drawer::new(),
            logout_on_self_delete: false,
            ctx,
        }
    }

    /// Deleting the signed-in user's own record ends the session.
    pub fn logout_on_self_delete(mut self) -> Self {
        self.logout_on_self_delete = true;
        self
    }

    fn notify(&self, toast: Toast) {
        self.ctx.notifier.notify(toast);
    }

    fn not_found(&self, id: i64) {
        self.notify(Toast::error(format!("{} #{} not found", E::NAME, id)));
    }

    async fn fetch(&mut self, query: String) {
        let action = if query.is_empty() {
            CrudAction::Load
        } else {
            CrudAction::Search
        };

        self.table.loading = true;
        let result = if query.is_empty() {
            self.service.list().await
        } else {
            self.service.search(&query).await
        };
        self.table.loading = false;

        match result {
            Ok(items) => {
                debug!(screen = %self.kind, count = items.len(), query = %query, "Records loaded");
                self.table.list.set_items(items);
            }
            Err(e) => {
                warn!(screen = %self.kind, error = %e, "Failed to load records");
                self.notify(Toast::error(failure_message(action, E::NAME, &e)));
            }
        }
    }

    /// Loads the options of every multi-select in the open form.
    async fn load_options(&mut self) {
        let sources: BTreeSet<OptionSource> = <E::Form as EntityForm>::fields()
            .iter()
            .filter_map(|spec| match spec.kind {
                FieldKind::MultiSelect { source } => source,
                _ => None,
            })
            .collect();

        for source in sources {
            match self.ctx.options.options(source).await {
                Ok(options) => self.drawer.set_options(source, options),
                Err(e) => {
                    warn!(screen = %self.kind, source = %source, error = %e, "Failed to load options");
                    self.notify(Toast::error(format!("Failed to load {}", source)));
                }
            }
        }
    }

    /// Rejects mutating actions while a list request is in flight.
    fn busy(&self) -> bool {
        if self.table.loading {
            self.notify(Toast::info("Still loading, try again in a moment"));
        }
        self.table.loading
    }

    async fn open_create(&mut self) {
        if self.busy() {
            return;
        }
        self.table.pending_delete = None;
        self.drawer.open_create();
        self.load_options().await;
    }

    async fn open_edit(&mut self, id: i64) {
        if self.busy() {
            return;
        }
        let Some(record) = self.table.record(id).cloned() else {
            self.not_found(id);
            return;
        };
        self.table.pending_delete = None;
        self.drawer.open_edit(id, &record);
        self.load_options().await;
    }

    async fn save(&mut self) {
        if self.busy() {
            return;
        }
        if !self.drawer.is_open() {
            self.notify(Toast::error("No form is open"));
            return;
        }

        // Invalid forms never reach the service; errors render inline.
        let submission = match self.drawer.submit() {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(screen = %self.kind, errors = %errors, "Form rejected");
                return;
            }
        };

        let (action, result) = match submission.mode {
            DrawerMode::Create => (
                CrudAction::Create,
                self.service.create(&submission.entity).await,
            ),
            DrawerMode::Edit(id) => (
                CrudAction::Update,
                self.service.update(id, &submission.entity).await,
            ),
        };

        match result {
            Ok(saved) => {
                info!(screen = %self.kind, id = ?saved.id(), action = action.verb(), "Record saved");
                self.notify(Toast::success(success_message(action, E::NAME)));
                self.drawer.close();
                self.refresh_current().await;
            }
            Err(e) => {
                warn!(screen = %self.kind, error = %e, action = action.verb(), "Save failed");
                self.notify(Toast::error(failure_message(action, E::NAME, &e)));
            }
        }
    }

    fn request_delete(&mut self, id: i64) {
        if self.busy() {
            return;
        }
        if self.table.record(id).is_none() {
            self.not_found(id);
            return;
        }
        self.table.pending_delete = Some(id);
    }

    async fn confirm_delete(&mut self) -> Outcome {
        if self.busy() {
            return Outcome::Continue;
        }
        let Some(id) = self.table.pending_delete.take() else {
            self.notify(Toast::info("Nothing to confirm"));
            return Outcome::Continue;
        };

        if let Err(e) = self.service.delete(id).await {
            warn!(screen = %self.kind, id, error = %e, "Delete failed");
            self.notify(Toast::error(failure_message(CrudAction::Delete, E::NAME, &e)));
            return Outcome::Continue;
        }

        info!(screen = %self.kind, id, "Record deleted");
        self.notify(Toast::success(success_message(CrudAction::Delete, E::NAME)));
        self.table.expanded.remove(&id);

        if self.logout_on_self_delete && self.ctx.session.current_user_id() == Some(id) {
            info!(user_id = id, "Signed-in user deleted their own account");
            if let Err(e) = self.ctx.session.logout() {
                warn!(error = %e, "Failed to clear session token");
            }
            self.notify(Toast::info("Your account was deleted. You have been signed out"));
            return Outcome::Logout;
        }

        self.refresh_current().await;
        Outcome::Continue
    }

    async fn refresh_current(&mut self) {
        let query = self.table.list.query().trim().to_string();
        self.fetch(query).await;
    }

    fn sort_by(&mut self, column: &str) {
        match E::SortField::parse(column) {
            Some(field) => self.table.list.toggle_sort(field),
            None => {
                let known = E::SortField::all()
                    .iter()
                    .map(|c| c.key())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.notify(Toast::error(format!(
                    "Unknown column: {}. Columns: {}",
                    column, known
                )));
            }
        }
    }

    fn field_input(&mut self, result: Result<(), domain::forms::FieldInputError>) {
        if let Err(e) = result {
            self.notify(Toast::error(e.to_string()));
        }
    }
}

#[async_trait]
impl<E: TableRow> Panel for Screen<E> {
    fn kind(&self) -> ScreenKind {
        self.kind
    }

    fn set_query(&mut self, query: &str) {
        self.table.list.set_query(query.trim());
    }

    async fn refresh(&mut self) {
        self.refresh_current().await;
    }

    async fn search(&mut self, query: &str) {
        self.set_query(query);
        self.fetch(query.trim().to_string()).await;
    }

    async fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Refresh => self.refresh_current().await,
            Command::Sort(column) => self.sort_by(&column),
            Command::Page(page) => self.table.list.set_page(page),
            Command::Next => {
                if !self.table.list.next_page() {
                    self.notify(Toast::info("Already on the last page"));
                }
            }
            Command::Prev => {
                if !self.table.list.previous_page() {
                    self.notify(Toast::info("Already on the first page"));
                }
            }
            Command::Expand(id) => {
                if self.table.record(id).is_some() {
                    self.table.toggle_expanded(id);
                } else {
                    self.not_found(id);
                }
            }
            Command::New => self.open_create().await,
            Command::Edit(id) => self.open_edit(id).await,
            Command::Set { field, value } => {
                let result = self.drawer.set_field(&field, &value);
                self.field_input(result);
            }
            Command::Add { field, value } => {
                let result = self.drawer.add_value(&field, &value);
                self.field_input(result);
            }
            Command::Remove { field, value } => {
                let result = self.drawer.remove_value(&field, &value);
                self.field_input(result);
            }
            Command::Save => self.save().await,
            Command::Reset => {
                if !self.drawer.reset() {
                    self.notify(Toast::error("No form is open"));
                }
            }
            Command::Close => self.drawer.close(),
            Command::Delete(id) => self.request_delete(id),
            Command::Confirm => return self.confirm_delete().await,
            Command::Cancel => self.table.pending_delete = None,
            Command::Quit => return Outcome::Quit,
            Command::Switch(_) | Command::Search(_) | Command::Help => {}
        }
        Outcome::Continue
    }

    fn render(&self) -> String {
        let mut out = format!("# {}\n{}", self.kind.title(), render_table(&self.table));
        let drawer = render_drawer(&self.drawer, E::NAME);
        if !drawer.is_empty() {
            out.push_str("\n\n");
            out.push_str(&drawer);
        }
        out
    }

    fn visible_titles(&self) -> Vec<String> {
        self.table
            .list
            .visible()
            .into_iter()
            .map(|record| record.title())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::MemoryTokenStore;
    use domain::models::CustomerGroup;
    use domain::services::{InMemoryEntityService, InMemoryOptionProvider, ToastQueue};

    fn setup(
        records: Vec<CustomerGroup>,
    ) -> (
        Screen<CustomerGroup>,
        Arc<InMemoryEntityService<CustomerGroup>>,
        Arc<ToastQueue>,
    ) {
        let service = Arc::new(InMemoryEntityService::new(records));
        let toasts = Arc::new(ToastQueue::new());
        let ctx = ScreenContext {
            notifier: toasts.clone(),
            options: Arc::new(InMemoryOptionProvider::new()),
            session: Session::new(Arc::new(MemoryTokenStore::new())),
            page_size: 5,
        };
        let screen = Screen::new(ScreenKind::CustomerGroups, service.clone(), ctx);
        (screen, service, toasts)
    }

    fn group(id: i64, name: &str) -> CustomerGroup {
        CustomerGroup {
            id: Some(id),
            group_name: name.to_string(),
            ..CustomerGroup::default()
        }
    }

    #[tokio::test]
    async fn test_actions_rejected_while_loading() {
        let (mut screen, service, toasts) = setup(vec![group(1, "VIP Customers")]);
        screen.refresh().await;
        screen.table.loading = true;

        screen.execute(Command::Delete(1)).await;
        screen.execute(Command::New).await;

        assert_eq!(screen.table.pending_delete, None);
        assert!(!screen.drawer.is_open());
        assert_eq!(service.delete_calls(), 0);
        assert_eq!(toasts.len(), 2);
    }

    #[tokio::test]
    async fn test_sort_and_page_do_not_fetch() {
        let (mut screen, service, _) = setup(vec![group(1, "B"), group(2, "A")]);
        screen.refresh().await;
        let calls = service.total_calls();

        screen.execute(Command::Sort("groupName".to_string())).await;
        screen.execute(Command::Page(2)).await;
        screen.execute(Command::Page(1)).await;

        assert_eq!(service.total_calls(), calls);
        assert_eq!(screen.visible_titles(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_column_toasts() {
        let (mut screen, _, toasts) = setup(vec![]);
        screen.execute(Command::Sort("colour".to_string())).await;
        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert!(drained[0].message.starts_with("Unknown column: colour"));
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let (mut screen, service, toasts) = setup(vec![group(1, "VIP Customers")]);
        screen.refresh().await;

        screen.execute(Command::Delete(1)).await;
        assert!(screen.render().contains("Delete VIP Customers?"));
        screen.execute(Command::Cancel).await;
        assert_eq!(service.delete_calls(), 0);

        screen.execute(Command::Delete(1)).await;
        assert_eq!(screen.execute(Command::Confirm).await, Outcome::Continue);
        assert_eq!(service.delete_calls(), 1);
        assert!(screen.visible_titles().is_empty());
        assert_eq!(
            toasts.drain().last().map(|t| t.message.clone()),
            Some("Customer group deleted successfully".to_string())
        );
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let (mut screen, _, toasts) = setup(vec![]);
        screen.execute(Command::Edit(9)).await;
        assert!(!screen.drawer.is_open());
        assert_eq!(toasts.drain()[0].message, "Customer group #9 not found");
    }
}
