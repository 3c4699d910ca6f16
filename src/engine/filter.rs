// src/engine/filter.rs

use super::column::Column;

/// The active filter column and its text.
///
/// `text` is only meaningful while a column is active; every path that
/// drops the column drops the text with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    column: Option<String>,
    text: String,
}

impl FilterState {
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-align the active column with the current descriptor set.
    ///
    /// Runs when descriptors change, never on text edits. Exactly one
    /// branch applies per pass:
    /// - no filterable descriptor: clear column and text
    /// - no active column: adopt the first filterable descriptor
    /// - active column gone from the filterable set: clear column and text
    /// - otherwise: leave untouched
    pub(crate) fn reconcile<R>(&mut self, columns: &[Column<R>]) {
        let mut filterable = columns.iter().filter(|c| c.can_filter());
        match filterable.next() {
            None => self.clear(),
            Some(first) => match &self.column {
                None => self.column = Some(first.id().to_string()),
                Some(active) => {
                    let survives =
                        first.id() == active || filterable.any(|c| c.id() == active);
                    if !survives {
                        self.clear();
                    }
                }
            },
        }
    }

    /// Select a filter column by id. An id not found among the filterable
    /// descriptors resolves to the cleared state, not an error.
    pub(crate) fn set_column<R>(&mut self, columns: &[Column<R>], id: &str) {
        if columns.iter().any(|c| c.can_filter() && c.id() == id) {
            self.column = Some(id.to_string());
        } else {
            self.clear();
        }
    }

    /// Direct assignment, no validation.
    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn clear(&mut self) {
        self.column = None;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::column::CellValue;

    fn filterable(id: &str) -> Column<i32> {
        Column::new(id, id.to_uppercase()).with_filter(|n: &i32| CellValue::Int(*n as i64))
    }

    fn plain(id: &str) -> Column<i32> {
        Column::new(id, id.to_uppercase())
    }

    #[test]
    fn test_reconcile_adopts_first_filterable() {
        let columns = vec![plain("a"), filterable("b"), filterable("c")];
        let mut state = FilterState::default();
        state.reconcile(&columns);
        assert_eq!(state.column(), Some("b"));
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_reconcile_clears_when_nothing_filterable() {
        let columns = vec![plain("a"), plain("b")];
        let mut state = FilterState::default();
        state.set_text("leftover".into());
        state.reconcile(&columns);
        assert_eq!(state.column(), None);
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_reconcile_resets_removed_column() {
        let before = vec![filterable("a"), filterable("b")];
        let mut state = FilterState::default();
        state.set_column(&before, "b");
        state.set_text("abc".into());

        let after = vec![filterable("a")];
        state.reconcile(&after);
        assert_eq!(state.column(), None);
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_reconcile_leaves_surviving_column_alone() {
        let columns = vec![filterable("a"), filterable("b")];
        let mut state = FilterState::default();
        state.set_column(&columns, "b");
        state.set_text("abc".into());
        state.reconcile(&columns);
        assert_eq!(state.column(), Some("b"));
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn test_set_column_unknown_id_resolves_to_none() {
        let columns = vec![filterable("a"), plain("b")];
        let mut state = FilterState::default();
        state.set_column(&columns, "a");
        state.set_text("abc".into());

        // "b" exists but is not filterable; "z" does not exist at all.
        state.set_column(&columns, "b");
        assert_eq!(state.column(), None);
        assert_eq!(state.text(), "");

        state.set_column(&columns, "a");
        state.set_column(&columns, "z");
        assert_eq!(state.column(), None);
    }

    #[test]
    fn test_set_text_is_unvalidated() {
        let mut state = FilterState::default();
        state.set_text("  anything goes  ".into());
        assert_eq!(state.text(), "  anything goes  ");
    }
}
