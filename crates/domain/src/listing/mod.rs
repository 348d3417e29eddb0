//! Client-side list management: filter, sort and paginate an entity array.
//!
//! The controller is pure state. Deriving the visible page never touches the
//! network; callers refill `items` after fetching.

pub mod sort;

use shared::pagination::{page_count, paginate, PageInfo, DEFAULT_PAGE_SIZE};

pub use sort::{SortColumn, SortDirection, SortKey, SortState};

/// A record that can be listed in a searchable, sortable table.
pub trait Listable {
    type SortField: SortColumn;

    /// Values of the designated search fields. A record matches a query when
    /// any of them contains it.
    fn search_fields(&self) -> Vec<String>;

    /// Comparison key for the given column.
    fn sort_key(&self, field: Self::SortField) -> SortKey;
}

/// Returns true when any search field contains `query`, ignoring case.
///
/// An empty (or blank) query matches every record.
pub fn matches_query<T: Listable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// State of a listing table: records, query, sort and current page.
#[derive(Debug, Clone)]
pub struct ListController<T: Listable> {
    items: Vec<T>,
    query: String,
    page: usize,
    page_size: usize,
    sort: Option<SortState<T::SortField>>,
}

impl<T: Listable> Default for ListController<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T: Listable> ListController<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            page: 1,
            page_size,
            sort: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<SortState<T::SortField>> {
        self.sort
    }

    /// Replaces the records, keeping query, sort and page.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Sets a new search query and returns to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Sorts by `field`: the active column flips direction, a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: T::SortField) {
        self.sort = Some(match self.sort {
            Some(state) if state.field == field => SortState {
                field,
                direction: state.direction.toggled(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Asc,
            },
        });
    }

    /// Jumps to `page`. The value is not clamped; a page past the end shows
    /// no rows.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Advances one page if there is a next page. Returns whether it moved.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page, stopping at the first. Returns whether it moved.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Records matching the current query, in backend order.
    pub fn filtered(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_query(*item, &self.query))
            .collect()
    }

    /// Matching records in sort order. The sort is stable, so ties keep their
    /// backend order.
    pub fn sorted(&self) -> Vec<&T> {
        let mut rows = self.filtered();
        if let Some(state) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.sort_key(state.field).compare(&b.sort_key(state.field));
                state.direction.apply(ordering)
            });
        }
        rows
    }

    /// Rows on the current page.
    pub fn visible(&self) -> Vec<&T> {
        let rows = self.sorted();
        paginate(&rows, self.page, self.page_size).to_vec()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_count(), self.page_size)
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.page, self.page_size, self.filtered_count())
    }

    /// Finds a loaded record.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: String,
        score: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowSort {
        Id,
        Name,
        Score,
    }

    impl SortColumn for RowSort {
        fn all() -> &'static [Self] {
            &[RowSort::Id, RowSort::Name, RowSort::Score]
        }

        fn key(&self) -> &'static str {
            match self {
                RowSort::Id => "id",
                RowSort::Name => "name",
                RowSort::Score => "score",
            }
        }

        fn label(&self) -> &'static str {
            match self {
                RowSort::Id => "ID",
                RowSort::Name => "Name",
                RowSort::Score => "Score",
            }
        }
    }

    impl Listable for Row {
        type SortField = RowSort;

        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone(), self.id.to_string()]
        }

        fn sort_key(&self, field: RowSort) -> SortKey {
            match field {
                RowSort::Id => SortKey::Integer(self.id),
                RowSort::Name => SortKey::text(&self.name),
                RowSort::Score => SortKey::Decimal(self.score),
            }
        }
    }

    fn row(id: i64, name: &str, score: f64) -> Row {
        Row {
            id,
            name: name.to_string(),
            score,
        }
    }

    fn controller(rows: Vec<Row>) -> ListController<Row> {
        let mut list = ListController::new(5);
        list.set_items(rows);
        list
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut list = controller(vec![row(1, "John Doe", 1.0), row(2, "Jane", 2.0)]);
        list.set_query("john");
        assert_eq!(names(&list.filtered()), vec!["John Doe"]);

        list.set_query("DOE");
        assert_eq!(names(&list.filtered()), vec!["John Doe"]);
    }

    #[test]
    fn test_filter_matches_any_field() {
        let mut list = controller(vec![row(17, "Alpha", 1.0), row(2, "Beta", 2.0)]);
        list.set_query("17");
        assert_eq!(names(&list.filtered()), vec!["Alpha"]);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let mut list = controller(vec![row(1, "a", 1.0), row(2, "b", 2.0)]);
        list.set_query("   ");
        assert_eq!(list.filtered_count(), 2);
    }

    #[test]
    fn test_new_query_resets_page() {
        let rows = (1..=12).map(|i| row(i, &format!("n{i}"), 0.0)).collect();
        let mut list = controller(rows);
        list.set_page(3);
        list.set_query("n");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_toggle_sort_same_column_flips_direction() {
        let mut list = controller(vec![row(1, "b", 1.0), row(2, "a", 2.0), row(3, "C", 3.0)]);
        list.toggle_sort(RowSort::Name);
        assert_eq!(names(&list.sorted()), vec!["a", "b", "C"]);
        assert_eq!(list.sort().unwrap().direction, SortDirection::Asc);

        list.toggle_sort(RowSort::Name);
        assert_eq!(names(&list.sorted()), vec!["C", "b", "a"]);
        assert_eq!(list.sort().unwrap().direction, SortDirection::Desc);
    }

    #[test]
    fn test_toggle_sort_new_column_resets_to_ascending() {
        let mut list = controller(vec![row(2, "a", 5.0), row(1, "b", 0.5)]);
        list.toggle_sort(RowSort::Name);
        list.toggle_sort(RowSort::Name);
        list.toggle_sort(RowSort::Score);

        let state = list.sort().unwrap();
        assert_eq!(state.field, RowSort::Score);
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(names(&list.sorted()), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut list = controller(vec![
            row(1, "first", 1.0),
            row(2, "second", 1.0),
            row(3, "third", 1.0),
        ]);
        list.toggle_sort(RowSort::Score);
        assert_eq!(names(&list.sorted()), vec!["first", "second", "third"]);

        list.toggle_sort(RowSort::Score);
        assert_eq!(names(&list.sorted()), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let mut list = controller(vec![row(10, "x", 0.0), row(9, "y", 0.0), row(100, "z", 0.0)]);
        list.toggle_sort(RowSort::Id);
        let ids: Vec<i64> = list.sorted().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 10, 100]);
    }

    #[test]
    fn test_pagination_splits_sorted_rows() {
        let rows = (1..=12).map(|i| row(i, &format!("row{i:02}"), 0.0)).collect();
        let mut list = controller(rows);
        list.toggle_sort(RowSort::Id);

        assert_eq!(list.page_count(), 3);
        assert_eq!(list.visible().len(), 5);

        list.set_page(3);
        let ids: Vec<i64> = list.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[test]
    fn test_page_count_follows_filter() {
        let rows = (1..=12).map(|i| row(i, &format!("row{i}"), 0.0)).collect();
        let mut list = controller(rows);
        list.set_query("row1");
        // row1, row10, row11, row12
        assert_eq!(list.filtered_count(), 4);
        assert_eq!(list.page_count(), 1);
    }

    #[test]
    fn test_empty_filtered_set_renders_no_rows() {
        let mut list = controller(vec![row(1, "a", 0.0)]);
        list.set_query("zzz");
        assert_eq!(list.page(), 1);
        assert!(list.visible().is_empty());
        assert_eq!(list.page_count(), 0);
    }

    #[test]
    fn test_out_of_range_page_renders_no_rows() {
        let mut list = controller(vec![row(1, "a", 0.0)]);
        list.set_page(9);
        assert!(list.visible().is_empty());
    }

    #[test]
    fn test_next_and_previous_page_stop_at_edges() {
        let rows = (1..=6).map(|i| row(i, "r", 0.0)).collect();
        let mut list = controller(rows);
        assert!(!list.previous_page());
        assert!(list.next_page());
        assert_eq!(list.page(), 2);
        assert!(!list.next_page());
        assert!(list.previous_page());
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_set_items_keeps_query_and_sort() {
        let mut list = controller(vec![row(1, "a", 0.0)]);
        list.set_query("b");
        list.toggle_sort(RowSort::Name);
        list.set_items(vec![row(2, "bb", 0.0), row(3, "ab", 0.0), row(4, "c", 0.0)]);
        assert_eq!(names(&list.visible()), vec!["ab", "bb"]);
    }

    #[test]
    fn test_sort_column_parse() {
        assert_eq!(RowSort::parse("NAME"), Some(RowSort::Name));
        assert_eq!(RowSort::parse("Score"), Some(RowSort::Score));
        assert_eq!(RowSort::parse("missing"), None);
    }
}
