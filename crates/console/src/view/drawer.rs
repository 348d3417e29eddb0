//! Drawer (create/edit form) rendering.

use domain::forms::{Drawer, DrawerMode, EntityForm, FieldKind};

/// Renders the open form with inline errors. Empty when the drawer is closed.
pub fn render_drawer<F: EntityForm>(drawer: &Drawer<F>, entity_name: &str) -> String {
    let (Some(mode), Some(form)) = (drawer.mode(), drawer.form()) else {
        return String::new();
    };

    let mut out = vec![match mode {
        DrawerMode::Create => format!("== New {} ==", entity_name),
        DrawerMode::Edit(id) => format!("== Edit {} #{} ==", entity_name, id),
    }];

    for spec in F::fields() {
        let marker = if spec.required { "*" } else { "" };
        let value = form.display_value(spec.name);
        out.push(format!("{}{} [{}]: {}", spec.label, marker, spec.name, value));

        match spec.kind {
            FieldKind::Choice(codes) => {
                out.push(format!("    choices: {}", codes.join(", ")));
            }
            FieldKind::MultiSelect {
                source: Some(source),
            } => {
                let selected: Vec<&str> = value.split(", ").collect();
                let options = drawer.options(source);
                if !options.is_empty() {
                    let listed = options
                        .iter()
                        .map(|option| {
                            let id = option.id.to_string();
                            let mark = if selected.contains(&id.as_str())
                                || selected.contains(&option.name.as_str())
                            {
                                "x"
                            } else {
                                " "
                            };
                            format!("[{}] {} {}", mark, option.id, option.name)
                        })
                        .collect::<Vec<_>>()
                        .join("  ");
                    out.push(format!("    options: {}", listed));
                }
            }
            _ => {}
        }

        if let Some(errors) = drawer.errors() {
            for message in errors.field(spec.name) {
                out.push(format!("    ! {}", message));
            }
        }
    }

    if !drawer.can_save() {
        out.push("(save disabled until required fields are valid)".to_string());
    }
    out.push("save | reset | close".to_string());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::forms::{OptionSource, SelectOption};
    use domain::models::{CustomerGroup, CustomerGroupForm, UserForm};

    #[test]
    fn test_closed_drawer_renders_nothing() {
        let drawer: Drawer<CustomerGroupForm> = Drawer::new();
        assert_eq!(render_drawer(&drawer, "Customer group"), "");
    }

    #[test]
    fn test_inline_errors_after_failed_submit() {
        let mut drawer: Drawer<CustomerGroupForm> = Drawer::new();
        drawer.open_create();
        assert!(drawer.submit().is_err());

        let out = render_drawer(&drawer, "Customer group");
        assert!(out.starts_with("== New Customer group =="));
        assert!(out.contains("! Group name is required"));
        assert!(out.contains("save disabled"));
    }

    #[test]
    fn test_edit_title_and_selected_options() {
        let group = CustomerGroup {
            id: Some(7),
            group_name: "VIP Customers".to_string(),
            customer_ids: vec![4],
            ..CustomerGroup::default()
        };
        let mut drawer: Drawer<CustomerGroupForm> = Drawer::new();
        drawer.open_edit(7, &group);
        drawer.set_options(
            OptionSource::Customers,
            vec![
                SelectOption {
                    id: 4,
                    name: "Acme".to_string(),
                },
                SelectOption {
                    id: 5,
                    name: "Globex".to_string(),
                },
            ],
        );

        let out = render_drawer(&drawer, "Customer group");
        assert!(out.starts_with("== Edit Customer group #7 =="));
        assert!(out.contains("[x] 4 Acme"));
        assert!(out.contains("[ ] 5 Globex"));
        assert!(!out.contains("save disabled"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut drawer: Drawer<UserForm> = Drawer::new();
        drawer.open_create();
        drawer.set_field("password", "hunter22").unwrap();
        let out = render_drawer(&drawer, "User");
        assert!(!out.contains("hunter22"));
    }
}
