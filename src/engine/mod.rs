// src/engine/mod.rs
//
// The view engine: filter, sort, and page an owned record collection, and
// keep the derived view in step as inputs change. The rendering layer
// (TUI or headless CLI) only ever talks to `ViewEngine`.

pub mod column;
pub mod filter;
pub mod page;
pub mod sort;
pub mod view;

pub use column::{CellValue, Column};
pub use filter::FilterState;
pub use page::{Page, Slot, PAGE_SIZE};
pub use sort::{SortDirection, SortIndicator, SortState};

use view::compute_view;

/// Owns the source records, the column descriptors, and the filter/sort
/// state; derives the view and the visible page from them.
///
/// The original reactive recomputation is an explicit pipeline here: every
/// mutating operation ends in `refresh`, which reconciles state, rebuilds
/// the view, and returns to page 0. Derived state is never edited in
/// place.
pub struct ViewEngine<R: Clone> {
    records: Vec<R>,
    columns: Vec<Column<R>>,
    filter: FilterState,
    sort: SortState,
    active_page: usize,
    loading: bool,
    /// Inputs changed while the loading flag was up; recompute on clear.
    stale: bool,
    view: Vec<R>,
    selection_reset: bool,
}

impl<R: Clone> ViewEngine<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let mut engine = Self {
            records: Vec::new(),
            columns,
            filter: FilterState::default(),
            sort: SortState::default(),
            active_page: 0,
            loading: false,
            stale: false,
            view: Vec::new(),
            selection_reset: false,
        };
        engine.filter.reconcile(&engine.columns);
        engine.sort.reconcile(&engine.columns);
        engine.refresh();
        engine
    }

    /// Replace the source collection.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.input_changed();
    }

    /// Replace the descriptor set. Filter and sort state are reconciled
    /// against the new descriptors before the view is recomputed.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        self.filter.reconcile(&self.columns);
        self.sort.reconcile(&self.columns);
        self.input_changed();
    }

    /// Select the filter column by id; an unknown or non-filterable id
    /// resolves to no filter. Inert while loading.
    pub fn set_filter_column(&mut self, id: &str) {
        if self.loading {
            return;
        }
        self.filter.set_column(&self.columns, id);
        self.input_changed();
    }

    /// Replace the filter text. Inert while loading.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        if self.loading {
            return;
        }
        self.filter.set_text(text.into());
        self.input_changed();
    }

    /// Advance the sort cycle for the column `id`. A column without an
    /// ordering capability resolves to the unordered state. Inert while
    /// loading.
    pub fn toggle_order(&mut self, id: &str) {
        if self.loading {
            return;
        }
        if self.columns.iter().any(|c| c.can_order() && c.id() == id) {
            self.sort.toggle(id);
        } else {
            self.sort.clear();
        }
        self.input_changed();
    }

    /// Jump to a one-based page. The index is not clamped against the
    /// current view; a page past the end renders as placeholders until the
    /// next recompute. Inert while loading.
    pub fn set_page(&mut self, one_based: usize) {
        if self.loading {
            return;
        }
        self.active_page = one_based.saturating_sub(1);
        self.selection_reset = true;
    }

    /// Raise or clear the externally supplied loading flag. While the flag
    /// is up the pipeline is bypassed and the visible page is all loading
    /// slots; clearing it replays any recompute that was deferred.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        if !loading && self.stale {
            self.refresh();
        }
    }

    fn input_changed(&mut self) {
        if self.loading {
            self.stale = true;
            return;
        }
        self.refresh();
    }

    /// The recompute pipeline: by the time this runs, filter/sort
    /// reconciliation has settled, so the view reads consistent state.
    /// Every recompute lands on page 0 and resets the selection.
    fn refresh(&mut self) {
        self.view = compute_view(&self.records, &self.columns, &self.filter, &self.sort);
        self.active_page = 0;
        self.selection_reset = true;
        self.stale = false;
    }

    /// The 10-slot page the rendering layer should display right now.
    pub fn visible_page(&self) -> Page<R> {
        if self.loading {
            Page::loading()
        } else {
            Page::of_view(&self.view, self.active_page)
        }
    }

    pub fn total_pages(&self) -> usize {
        page::total_pages(self.view.len())
    }

    /// Zero-based index of the active page.
    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Filterable descriptors in descriptor order.
    pub fn filterable_columns(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| c.can_filter())
    }

    pub fn active_filter_column(&self) -> Option<&Column<R>> {
        let id = self.filter.column()?;
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    pub fn sort_indicator(&self, id: &str) -> SortIndicator {
        self.sort.indicator(id)
    }

    /// True once since the last call if a transition reset the externally
    /// held row selection. The owning controller drains this after every
    /// mutating call; it stands in for the original's selection-change
    /// callback.
    pub fn take_selection_reset(&mut self) -> bool {
        std::mem::take(&mut self.selection_reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Rec = (&'static str, i64);

    fn columns() -> Vec<Column<Rec>> {
        vec![
            Column::new("name", "Name")
                .with_filter(|r: &Rec| CellValue::Text(r.0.to_string()))
                .with_order(|r: &Rec| CellValue::Text(r.0.to_string())),
            Column::new("score", "Score").with_order(|r: &Rec| CellValue::Int(r.1)),
        ]
    }

    fn engine_with(records: Vec<Rec>) -> ViewEngine<Rec> {
        let mut engine = ViewEngine::new(columns());
        engine.set_records(records);
        engine
    }

    fn ranked(n: i64) -> Vec<Rec> {
        // 25 records, shuffled deterministically by score.
        let names = [
            "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "a", "s", "d", "f", "g", "h",
            "j", "k", "l", "z", "x", "c", "v", "b", "n",
        ];
        let mut records: Vec<Rec> = (0..n).map(|i| (names[i as usize], (i * 7) % n + 1)).collect();
        records.reverse();
        records
    }

    #[test]
    fn test_twenty_five_records_sorted_ascending_page_window() {
        let mut engine = engine_with(ranked(25));
        engine.toggle_order("score");

        assert_eq!(engine.total_pages(), 3);

        let scores: Vec<i64> = engine.visible_page().rows().map(|r| r.1).collect();
        assert_eq!(scores, (1..=10).collect::<Vec<_>>());

        engine.set_page(3);
        let page = engine.visible_page();
        let scores: Vec<i64> = page.rows().map(|r| r.1).collect();
        assert_eq!(scores, (21..=25).collect::<Vec<_>>());
        assert_eq!(page.row_count(), 5);
        assert_eq!(page.slots().len(), PAGE_SIZE);
        assert_eq!(
            page.slots().iter().filter(|s| **s == Slot::Placeholder).count(),
            5
        );
    }

    #[test]
    fn test_filter_change_returns_to_page_zero() {
        let mut engine = engine_with(ranked(25));
        engine.set_page(3);
        assert_eq!(engine.active_page(), 2);

        engine.set_filter_text("a");
        assert_eq!(engine.active_page(), 0);
    }

    #[test]
    fn test_page_past_the_view_is_all_placeholders() {
        let mut engine = engine_with(ranked(5));
        engine.set_page(9);
        let page = engine.visible_page();
        assert_eq!(page.row_count(), 0);
        assert!(page.slots().iter().all(|s| *s == Slot::Placeholder));
    }

    #[test]
    fn test_visible_page_is_idempotent() {
        let mut engine = engine_with(ranked(25));
        engine.toggle_order("score");
        engine.set_filter_text("a");
        assert_eq!(engine.visible_page(), engine.visible_page());
    }

    #[test]
    fn test_selection_resets_on_page_and_input_changes() {
        let mut engine = engine_with(ranked(25));
        assert!(engine.take_selection_reset());
        assert!(!engine.take_selection_reset());

        engine.set_page(2);
        assert!(engine.take_selection_reset());

        engine.set_filter_text("a");
        assert!(engine.take_selection_reset());

        engine.toggle_order("score");
        assert!(engine.take_selection_reset());
    }

    #[test]
    fn test_loading_bypasses_pipeline_and_defers_recompute() {
        let mut engine = engine_with(ranked(5));
        engine.set_loading(true);

        let page = engine.visible_page();
        assert!(page.slots().iter().all(|s| *s == Slot::Loading));

        // View-state operations are inert while loading.
        engine.set_page(4);
        engine.set_filter_text("zzz");
        engine.toggle_order("score");
        assert_eq!(engine.active_page(), 0);
        assert_eq!(engine.filter_text(), "");
        assert!(!engine.sort_indicator("score").active);

        // Data delivery is accepted but the recompute waits for the flag.
        engine.set_records(ranked(25));
        assert_eq!(engine.view_len(), 5);

        engine.set_loading(false);
        assert_eq!(engine.view_len(), 25);
        assert_eq!(engine.active_page(), 0);
        assert_eq!(engine.visible_page().row_count(), 10);
    }

    #[test]
    fn test_removing_filter_column_unfilters_but_keeps_sort() {
        let mut engine = engine_with(vec![("ab", 3), ("b", 1), ("ac", 2)]);
        engine.set_filter_text("a");
        engine.toggle_order("score");
        assert_eq!(engine.view_len(), 2);

        // Drop the filterable capability; "score" stays orderable.
        let reduced: Vec<Column<Rec>> = vec![
            Column::new("name", "Name").with_order(|r: &Rec| CellValue::Text(r.0.to_string())),
            Column::new("score", "Score").with_order(|r: &Rec| CellValue::Int(r.1)),
        ];
        engine.set_columns(reduced);

        assert!(engine.active_filter_column().is_none());
        assert_eq!(engine.filter_text(), "");
        let scores: Vec<i64> = engine.visible_page().rows().map(|r| r.1).collect();
        assert_eq!(scores, vec![1, 2, 3]);
    }

    #[test]
    fn test_first_filterable_column_is_adopted_by_default() {
        let engine = engine_with(Vec::new());
        assert_eq!(engine.active_filter_column().map(|c| c.id()), Some("name"));
        assert_eq!(engine.filterable_columns().count(), 1);
    }

    #[test]
    fn test_unknown_ids_degrade_without_errors() {
        let mut engine = engine_with(ranked(5));
        engine.set_filter_column("nope");
        assert!(engine.active_filter_column().is_none());

        engine.toggle_order("score");
        engine.toggle_order("nope");
        assert!(!engine.sort_indicator("score").active);
        assert_eq!(engine.visible_page().row_count(), 5);
    }

    #[test]
    fn test_empty_view_has_zero_pages_but_a_displayable_page() {
        let engine = engine_with(Vec::new());
        assert_eq!(engine.total_pages(), 0);
        let page = engine.visible_page();
        assert_eq!(page.slots().len(), PAGE_SIZE);
        assert_eq!(page.row_count(), 0);
    }
}
