// src/engine/view.rs

use super::column::Column;
use super::filter::FilterState;
use super::sort::{SortDirection, SortState};

/// Apply filter then sort to `source`, yielding the ordered view.
///
/// Pure in its inputs, and always a fresh `Vec` so downstream pagination
/// can never alias the caller's collection. A record passes the filter iff
/// its accessor value is present and its string form contains the filter
/// text (case-sensitive). Sorting is stable in both directions: equal keys
/// keep their relative order from the filtered collection.
pub(crate) fn compute_view<R: Clone>(
    source: &[R],
    columns: &[Column<R>],
    filter: &FilterState,
    sort: &SortState,
) -> Vec<R> {
    let filter_column = filter
        .column()
        .and_then(|id| columns.iter().find(|c| c.id() == id && c.can_filter()));

    let mut view: Vec<R> = match filter_column {
        Some(column) => source
            .iter()
            .filter(|record| {
                let value = column.filter_value(record);
                value.is_present() && value.to_string().contains(filter.text())
            })
            .cloned()
            .collect(),
        None => source.to_vec(),
    };

    let order_column = sort
        .column()
        .and_then(|id| columns.iter().find(|c| c.id() == id && c.can_order()));
    if let (Some(column), Some(direction)) = (order_column, sort.direction()) {
        view.sort_by(|a, b| {
            let ordering = column.order_key(a).cmp(&column.order_key(b));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::column::CellValue;

    type Rec = (&'static str, i64);

    fn name_column() -> Column<Rec> {
        Column::new("name", "Name").with_filter(|r: &Rec| CellValue::Text(r.0.to_string()))
    }

    fn score_column() -> Column<Rec> {
        Column::new("score", "Score").with_order(|r: &Rec| CellValue::Int(r.1))
    }

    fn columns() -> Vec<Column<Rec>> {
        vec![name_column(), score_column()]
    }

    fn filter_on(columns: &[Column<Rec>], text: &str) -> FilterState {
        let mut filter = FilterState::default();
        filter.set_column(columns, "name");
        filter.set_text(text.to_string());
        filter
    }

    #[test]
    fn test_no_filter_no_sort_copies_source_in_order() {
        let source = vec![("c", 3), ("a", 1), ("b", 2)];
        let view = compute_view(
            &source,
            &columns(),
            &FilterState::default(),
            &SortState::default(),
        );
        assert_eq!(view, source);
    }

    #[test]
    fn test_filter_keeps_substring_matches_only() {
        let source = vec![("alpha", 1), ("beta", 2), ("alphabet", 3), ("gamma", 4)];
        let cols = columns();
        let view = compute_view(&source, &cols, &filter_on(&cols, "alpha"), &SortState::default());
        assert_eq!(view, vec![("alpha", 1), ("alphabet", 3)]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let source = vec![("Alpha", 1), ("alpha", 2)];
        let cols = columns();
        let view = compute_view(&source, &cols, &filter_on(&cols, "Alp"), &SortState::default());
        assert_eq!(view, vec![("Alpha", 1)]);
    }

    #[test]
    fn test_empty_text_still_excludes_absent_values() {
        // 3 of 10 records carry an empty accessor value; empty filter text
        // keeps only the 7 present ones.
        let source: Vec<Rec> = vec![
            ("r1", 1),
            ("", 2),
            ("r3", 3),
            ("r4", 4),
            ("", 5),
            ("r6", 6),
            ("r7", 7),
            ("", 8),
            ("r9", 9),
            ("r10", 10),
        ];
        let cols = columns();
        let view = compute_view(&source, &cols, &filter_on(&cols, ""), &SortState::default());
        assert_eq!(view.len(), 7);
        assert!(view.iter().all(|r| !r.0.is_empty()));
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let source = vec![("a", 3), ("b", 1), ("c", 2)];
        let cols = columns();

        let mut sort = SortState::default();
        sort.toggle("score");
        let ascending = compute_view(&source, &cols, &FilterState::default(), &sort);
        assert_eq!(ascending, vec![("b", 1), ("c", 2), ("a", 3)]);

        sort.toggle("score");
        let descending = compute_view(&source, &cols, &FilterState::default(), &sort);
        assert_eq!(descending, vec![("a", 3), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn test_equal_keys_keep_input_order_both_directions() {
        let source = vec![("first", 2), ("second", 1), ("third", 2), ("fourth", 1)];
        let cols = columns();

        let mut sort = SortState::default();
        sort.toggle("score");
        let ascending = compute_view(&source, &cols, &FilterState::default(), &sort);
        assert_eq!(
            ascending,
            vec![("second", 1), ("fourth", 1), ("first", 2), ("third", 2)]
        );

        sort.toggle("score");
        let descending = compute_view(&source, &cols, &FilterState::default(), &sort);
        assert_eq!(
            descending,
            vec![("first", 2), ("third", 2), ("second", 1), ("fourth", 1)]
        );
    }

    #[test]
    fn test_filter_applies_before_sort() {
        let source = vec![("ab", 9), ("zz", 1), ("ba", 5), ("aa", 7)];
        let cols = columns();
        let mut sort = SortState::default();
        sort.toggle("score");
        let view = compute_view(&source, &cols, &filter_on(&cols, "a"), &sort);
        assert_eq!(view, vec![("ba", 5), ("aa", 7), ("ab", 9)]);
    }

    #[test]
    fn test_mixed_key_types_order_consistently() {
        type Loose = (&'static str, CellValue);
        let source: Vec<Loose> = vec![
            ("text", CellValue::Text("x".into())),
            ("int", CellValue::Int(5)),
            ("missing", CellValue::Missing),
            ("float", CellValue::Float(2.5)),
        ];
        let cols =
            vec![Column::new("v", "V").with_order(|r: &Loose| r.1.clone())];
        let mut sort = SortState::default();
        sort.toggle("v");
        let view = compute_view(&source, &cols, &FilterState::default(), &sort);
        let order: Vec<&str> = view.iter().map(|r| r.0).collect();
        assert_eq!(order, vec!["missing", "float", "int", "text"]);
    }

    #[test]
    fn test_recompute_with_unchanged_inputs_is_identical() {
        let source = vec![("a", 2), ("b", 1), ("c", 2)];
        let cols = columns();
        let filter = filter_on(&cols, "");
        let mut sort = SortState::default();
        sort.toggle("score");

        let first = compute_view(&source, &cols, &filter, &sort);
        let second = compute_view(&source, &cols, &filter, &sort);
        assert_eq!(first, second);
    }
}
