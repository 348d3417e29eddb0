//! Table rendering.

use std::collections::BTreeSet;

use domain::listing::{ListController, SortColumn, SortDirection};

use super::{fit, TableRow};

const MAX_COLUMN_WIDTH: usize = 28;

/// Listing state of one screen.
#[derive(Debug)]
pub struct TableState<E: TableRow> {
    pub list: ListController<E>,
    /// Ids of rows showing their detail lines.
    pub expanded: BTreeSet<i64>,
    /// Id awaiting delete confirmation.
    pub pending_delete: Option<i64>,
    pub loading: bool,
}

impl<E: TableRow> TableState<E> {
    pub fn new(page_size: usize) -> Self {
        Self {
            list: ListController::new(page_size),
            expanded: BTreeSet::new(),
            pending_delete: None,
            loading: false,
        }
    }

    /// Expands or collapses a row. Returns whether it is now expanded.
    pub fn toggle_expanded(&mut self, id: i64) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Loaded record with the given id.
    pub fn record(&self, id: i64) -> Option<&E> {
        self.list.find(|item| item.id() == Some(id))
    }
}

fn header<E: TableRow>(state: &TableState<E>, column: E::SortField) -> String {
    let marker = match state.list.sort() {
        Some(sort) if sort.field == column => match sort.direction {
            SortDirection::Asc => " ^",
            SortDirection::Desc => " v",
        },
        _ => "",
    };
    format!("{}{}", column.label(), marker)
}

/// Renders the visible page, expanded details and the page footer.
pub fn render_table<E: TableRow>(state: &TableState<E>) -> String {
    if state.loading {
        return "Loading...".to_string();
    }

    let columns = E::SortField::all();
    let rows = state.list.visible();
    let headers: Vec<String> = columns.iter().map(|c| header(state, *c)).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| row.cell(*c)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| fit(v, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&headers)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );

    if rows.is_empty() {
        out.push("No records found".to_string());
    }

    for (row, values) in rows.iter().zip(&cells) {
        out.push(line(values));
        let expanded = row.id().map_or(false, |id| state.expanded.contains(&id));
        if expanded {
            for (label, value) in row.details() {
                out.push(format!("    {}: {}", label, value));
            }
        }
    }

    let info = state.list.page_info();
    out.push(format!(
        "Page {} of {} ({} records)",
        info.page,
        info.total_pages.max(1),
        info.total
    ));

    if let Some(id) = state.pending_delete {
        let title = state
            .record(id)
            .map(|record| record.title())
            .unwrap_or_else(|| format!("{} #{}", E::NAME, id));
        out.push(format!("Delete {}? Type 'confirm' or 'cancel'", title));
    }

    out.join("\n")
}
