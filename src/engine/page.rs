// src/engine/page.rs

/// Rows per page. The window is fixed; short pages are padded.
pub const PAGE_SIZE: usize = 10;

/// One of the fixed slots of a [`Page`].
///
/// Consumers pattern-match instead of comparing against a sentinel record:
/// `Row` carries data, `Placeholder` pads the tail of a short page, and
/// `Loading` fills the whole page while the source is being refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<R> {
    Row(R),
    Placeholder,
    Loading,
}

impl<R> Slot<R> {
    pub fn row(&self) -> Option<&R> {
        match self {
            Slot::Row(record) => Some(record),
            _ => None,
        }
    }
}

/// A fixed-size window into the view: always exactly [`PAGE_SIZE`] slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    slots: Vec<Slot<R>>,
}

impl<R: Clone> Page<R> {
    /// Window `view` at the zero-based `page_index`. An index past the end
    /// of the view yields an all-placeholder page.
    pub(crate) fn of_view(view: &[R], page_index: usize) -> Self {
        let start = page_index.saturating_mul(PAGE_SIZE);
        let mut slots: Vec<Slot<R>> = view
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .map(Slot::Row)
            .collect();
        slots.resize(PAGE_SIZE, Slot::Placeholder);
        Page { slots }
    }

    pub(crate) fn loading() -> Self {
        Page {
            slots: vec![Slot::Loading; PAGE_SIZE],
        }
    }
}

impl<R> Page<R> {
    pub fn slots(&self) -> &[Slot<R>] {
        &self.slots
    }

    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.slots.iter().filter_map(Slot::row)
    }

    /// Number of real rows, i.e. slots that are neither padding nor
    /// loading placeholders.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }
}

/// `ceil(view_len / PAGE_SIZE)`; 0 for an empty view.
pub(crate) fn total_pages(view_len: usize) -> usize {
    view_len.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    fn placeholder_count(page: &Page<usize>) -> usize {
        page.slots()
            .iter()
            .filter(|s| **s == Slot::Placeholder)
            .count()
    }

    #[test]
    fn test_page_always_has_exactly_ten_slots() {
        for len in [0, 1, 9, 10, 11, 25] {
            for index in [0, 1, 2, 7] {
                assert_eq!(Page::of_view(&view(len), index).slots().len(), PAGE_SIZE);
            }
        }
    }

    #[test]
    fn test_padding_matches_remaining_rows() {
        // placeholders = 10 - clamp(view_len - index*10, 0, 10)
        for (len, index, expected) in [
            (25usize, 0usize, 0usize),
            (25, 2, 5),
            (25, 3, 10),
            (7, 0, 3),
            (0, 0, 10),
            (10, 0, 0),
            (10, 1, 10),
        ] {
            let page = Page::of_view(&view(len), index);
            assert_eq!(placeholder_count(&page), expected, "len={len} index={index}");
            assert_eq!(page.row_count(), PAGE_SIZE - expected);
        }
    }

    #[test]
    fn test_rows_preserve_view_order() {
        let page = Page::of_view(&view(25), 1);
        let rows: Vec<usize> = page.rows().copied().collect();
        assert_eq!(rows, (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_out_of_range_page_is_all_placeholders() {
        let page = Page::of_view(&view(5), 4);
        assert_eq!(placeholder_count(&page), PAGE_SIZE);
        assert_eq!(page.row_count(), 0);
    }

    #[test]
    fn test_loading_page_is_all_loading_slots() {
        let page: Page<usize> = Page::loading();
        assert_eq!(page.slots().len(), PAGE_SIZE);
        assert!(page.slots().iter().all(|s| *s == Slot::Loading));
        assert_eq!(page.row_count(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up_and_empty_is_zero() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
    }
}
