// ── Filtered list view and pager ──

use serde::Serialize;
use vitalwatch_api::types::Page;

use super::filter::Filter;

/// The rows fetched for one page plus a filtered projection of them.
///
/// The base rows are only replaced by [`ListView::set_items`]; filtering
/// recomputes the list of visible indices and leaves the rows untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T, F> {
    items: Vec<T>,
    filter: F,
    visible: Vec<usize>,
}

impl<T, F: Filter<T> + Default> Default for ListView<T, F> {
    fn default() -> Self {
        Self::new(Vec::new(), F::default())
    }
}

impl<T, F: Filter<T>> ListView<T, F> {
    pub fn new(items: Vec<T>, filter: F) -> Self {
        let mut view = Self {
            items,
            filter,
            visible: Vec::new(),
        };
        view.refilter();
        view
    }

    /// Replace the base rows (a fresh fetch landed) and re-apply the filter.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.refilter();
    }

    /// Mutate the base rows in place, then re-apply the filter.
    pub fn update_items(&mut self, f: impl FnOnce(&mut [T])) {
        f(&mut self.items);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.matches(item))
            .map(|(i, _)| i)
            .collect();
    }

    /// All fetched rows, in backend order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Rows passing the filter, in backend order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

impl<T, F: Filter<T> + Default> ListView<T, F> {
    pub fn clear_filter(&mut self) {
        self.set_filter(F::default());
    }
}

impl<T: Clone, F: Filter<T>> ListView<T, F> {
    pub fn visible_cloned(&self) -> Vec<T> {
        self.visible().cloned().collect()
    }
}

// ── Pager ───────────────────────────────────────────────────────────

/// Server-driven pagination cursor. `page` is zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Pager {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            size: page.size,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
        }
    }

    /// `"{page + 1} of {total_pages}"`.
    pub fn label(&self) -> String {
        format!("{} of {}", self.page.saturating_add(1), self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn previous(&self) -> Option<u32> {
        self.page.checked_sub(1)
    }
}
