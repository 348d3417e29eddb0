//! Modal create/edit form state.

use std::collections::BTreeMap;
use std::fmt;

use super::{EntityForm, FieldInputError, FormErrors, OptionSource, SelectOption};

/// Whether the drawer creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerMode {
    Create,
    Edit(i64),
}

impl DrawerMode {
    pub fn is_create(&self) -> bool {
        matches!(self, DrawerMode::Create)
    }
}

impl fmt::Display for DrawerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawerMode::Create => write!(f, "create"),
            DrawerMode::Edit(id) => write!(f, "edit #{}", id),
        }
    }
}

/// A validated record ready to be saved.
#[derive(Debug, Clone)]
pub struct Submission<E> {
    pub mode: DrawerMode,
    pub entity: E,
}

#[derive(Debug, Clone)]
struct OpenDrawer<F: EntityForm> {
    mode: DrawerMode,
    form: F,
    initial: F,
    base: Option<F::Entity>,
    errors: FormErrors,
    options: BTreeMap<OptionSource, Vec<SelectOption>>,
}

/// Drawer holding at most one in-progress form.
#[derive(Debug, Clone)]
pub struct Drawer<F: EntityForm> {
    open: Option<OpenDrawer<F>>,
}

impl<F: EntityForm> Default for Drawer<F> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<F: EntityForm> Drawer<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<DrawerMode> {
        self.open.as_ref().map(|d| d.mode)
    }

    pub fn form(&self) -> Option<&F> {
        self.open.as_ref().map(|d| &d.form)
    }

    pub fn errors(&self) -> Option<&FormErrors> {
        self.open.as_ref().map(|d| &d.errors)
    }

    /// Opens a blank form, discarding anything in progress.
    pub fn open_create(&mut self) {
        self.open = Some(OpenDrawer {
            mode: DrawerMode::Create,
            form: F::default(),
            initial: F::default(),
            base: None,
            errors: FormErrors::new(),
            options: BTreeMap::new(),
        });
    }

    /// Opens a form pre-filled from `entity`, discarding anything in progress.
    pub fn open_edit(&mut self, id: i64, entity: &F::Entity) {
        let form = F::from_entity(entity);
        self.open = Some(OpenDrawer {
            mode: DrawerMode::Edit(id),
            initial: form.clone(),
            form,
            base: Some(entity.clone()),
            errors: FormErrors::new(),
            options: BTreeMap::new(),
        });
    }

    /// Closes the drawer. Unsaved edits are dropped.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Restores the form to the state it was opened with.
    pub fn reset(&mut self) -> bool {
        match self.open.as_mut() {
            Some(drawer) => {
                drawer.form = drawer.initial.clone();
                drawer.errors = FormErrors::new();
                true
            }
            None => false,
        }
    }

    fn open_mut(&mut self) -> Result<&mut OpenDrawer<F>, FieldInputError> {
        self.open
            .as_mut()
            .ok_or_else(|| FieldInputError::invalid("form", "no form is open"))
    }

    /// Types a value into a field. The field's previous errors are cleared;
    /// the whole form is checked again on save.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let drawer = self.open_mut()?;
        drawer.form.set_field(field, value)?;
        drawer.errors.clear_field(field);
        Ok(())
    }

    pub fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let drawer = self.open_mut()?;
        drawer.form.add_value(field, value)?;
        drawer.errors.clear_field(field);
        Ok(())
    }

    pub fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let drawer = self.open_mut()?;
        drawer.form.remove_value(field, value)?;
        drawer.errors.clear_field(field);
        Ok(())
    }

    pub fn set_options(&mut self, source: OptionSource, options: Vec<SelectOption>) {
        if let Some(drawer) = self.open.as_mut() {
            drawer.options.insert(source, options);
        }
    }

    pub fn options(&self, source: OptionSource) -> &[SelectOption] {
        self.open
            .as_ref()
            .and_then(|d| d.options.get(&source))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the current values would pass validation.
    pub fn can_save(&self) -> bool {
        self.open
            .as_ref()
            .map(|d| d.form.check(d.mode).is_ok())
            .unwrap_or(false)
    }

    /// Validates the form and builds the record to save.
    ///
    /// On failure the errors are kept on the drawer for inline display and
    /// nothing is emitted. The drawer stays open either way; the caller
    /// closes it once the save went through.
    pub fn submit(&mut self) -> Result<Submission<F::Entity>, FormErrors> {
        let Some(drawer) = self.open.as_mut() else {
            let mut errors = FormErrors::new();
            errors.add("form", "No form is open");
            return Err(errors);
        };

        match drawer.form.check(drawer.mode) {
            Ok(()) => {
                drawer.errors = FormErrors::new();
                Ok(Submission {
                    mode: drawer.mode,
                    entity: drawer.form.build(drawer.base.as_ref()),
                })
            }
            Err(errors) => {
                drawer.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
