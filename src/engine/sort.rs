// src/engine/sort.rs

use super::column::Column;

/// Direction half of the unordered → ascending → descending cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// What a column header should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortIndicator {
    pub active: bool,
    pub direction: Option<SortDirection>,
}

/// The active sort column and direction.
///
/// `None` is the unordered state; a direction can never outlive its
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn column(&self) -> Option<&str> {
        self.active.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, dir)| *dir)
    }

    /// Advance the cycle for `id`.
    ///
    /// The same column steps ascending → descending → unordered; any other
    /// column (or none) restarts at ascending. The asymmetry is deliberate:
    /// switching columns never lands on descending or unordered.
    pub(crate) fn toggle(&mut self, id: &str) {
        self.active = match self.active.take() {
            Some((col, SortDirection::Ascending)) if col == id => {
                Some((col, SortDirection::Descending))
            }
            Some((col, SortDirection::Descending)) if col == id => None,
            _ => Some((id.to_string(), SortDirection::Ascending)),
        };
    }

    /// Drop sort state whose column is no longer orderable.
    pub(crate) fn reconcile<R>(&mut self, columns: &[Column<R>]) {
        if let Some((col, _)) = &self.active {
            if !columns.iter().any(|c| c.can_order() && c.id() == col) {
                self.active = None;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.active = None;
    }

    pub fn indicator(&self, id: &str) -> SortIndicator {
        match &self.active {
            Some((col, dir)) if col == id => SortIndicator {
                active: true,
                direction: Some(*dir),
            },
            _ => SortIndicator {
                active: false,
                direction: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::column::CellValue;

    #[test]
    fn test_same_column_cycles_through_all_three_states() {
        let mut state = SortState::default();

        state.toggle("name");
        assert_eq!(state.column(), Some("name"));
        assert_eq!(state.direction(), Some(SortDirection::Ascending));

        state.toggle("name");
        assert_eq!(state.direction(), Some(SortDirection::Descending));

        state.toggle("name");
        assert_eq!(state.column(), None);
        assert_eq!(state.direction(), None);
    }

    #[test]
    fn test_switching_columns_always_restarts_ascending() {
        let mut state = SortState::default();

        state.toggle("a");
        state.toggle("a"); // a descending
        state.toggle("b");
        assert_eq!(state.column(), Some("b"));
        assert_eq!(state.direction(), Some(SortDirection::Ascending));

        state.toggle("b");
        state.toggle("b"); // back to unordered
        state.toggle("c");
        assert_eq!(state.column(), Some("c"));
        assert_eq!(state.direction(), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_indicator_reports_only_the_active_column() {
        let mut state = SortState::default();
        state.toggle("a");

        let active = state.indicator("a");
        assert!(active.active);
        assert_eq!(active.direction, Some(SortDirection::Ascending));

        let inactive = state.indicator("b");
        assert!(!inactive.active);
        assert_eq!(inactive.direction, None);
    }

    #[test]
    fn test_reconcile_drops_vanished_column() {
        let orderable =
            vec![Column::new("a", "A").with_order(|n: &i32| CellValue::Int(*n as i64))];
        let bare: Vec<Column<i32>> = vec![Column::new("b", "B")];

        let mut state = SortState::default();
        state.toggle("a");
        state.reconcile(&orderable);
        assert_eq!(state.column(), Some("a"));

        state.reconcile(&bare);
        assert_eq!(state.column(), None);
    }
}
