use std::collections::BTreeSet;

use crate::domain::entities::dataset::Row;

pub const PAGE_SIZES: [usize; 6] = [10, 25, 50, 100, 500, 1000];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl PageSpec {
    pub fn total_pages(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Page count as shown to the user: an empty result is one empty page,
    /// never "page 1 of 0".
    pub fn display_pages(&self, row_count: usize) -> usize {
        self.total_pages(row_count).max(1)
    }
}

/// Row positions relative to the current page's visible rows, 0-based.
/// They have no cross-page meaning.
pub type Selection = BTreeSet<usize>;

/// Sort, pagination and selection for one rendered result. Every user
/// action produces a new value; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub sort: SortSpec,
    pub page: PageSpec,
    pub selection: Selection,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicking the sorted column toggles direction; clicking another column
    /// restarts ascending. Selection is page-relative and is cleared, the
    /// current page is kept.
    pub fn sort_by(&self, column: &str) -> Self {
        let direction = if self.sort.key.as_deref() == Some(column)
            && self.sort.direction == SortDirection::Ascending
        {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self {
            sort: SortSpec {
                key: Some(column.to_string()),
                direction,
            },
            page: self.page,
            selection: Selection::new(),
        }
    }

    /// Sizes outside the fixed set are ignored. A size change always moves
    /// back to page 1 so the page cannot point past the new last page.
    pub fn set_page_size(&self, size: usize) -> Self {
        if !PAGE_SIZES.contains(&size) {
            return self.clone();
        }
        Self {
            sort: self.sort.clone(),
            page: PageSpec {
                page_size: size,
                current_page: 1,
            },
            selection: Selection::new(),
        }
    }

    pub fn go_first(&self, row_count: usize) -> Self {
        self.go_to(1, row_count)
    }

    pub fn go_previous(&self, row_count: usize) -> Self {
        self.go_to(self.page.current_page.saturating_sub(1), row_count)
    }

    pub fn go_next(&self, row_count: usize) -> Self {
        self.go_to(self.page.current_page + 1, row_count)
    }

    pub fn go_last(&self, row_count: usize) -> Self {
        self.go_to(self.page.display_pages(row_count), row_count)
    }

    /// Clamps to [1, display_pages]. A real page change clears the
    /// selection; a clamped no-op keeps it.
    pub fn go_to(&self, target: usize, row_count: usize) -> Self {
        let clamped = target.clamp(1, self.page.display_pages(row_count));
        if clamped == self.page.current_page {
            return self.clone();
        }
        Self {
            sort: self.sort.clone(),
            page: PageSpec {
                page_size: self.page.page_size,
                current_page: clamped,
            },
            selection: Selection::new(),
        }
    }

    pub fn on_first_page(&self) -> bool {
        self.page.current_page <= 1
    }

    pub fn on_last_page(&self, row_count: usize) -> bool {
        self.page.current_page >= self.page.display_pages(row_count)
    }

    pub fn toggle_row(&self, position: usize) -> Self {
        let mut selection = self.selection.clone();
        if !selection.remove(&position) {
            selection.insert(position);
        }
        Self {
            sort: self.sort.clone(),
            page: self.page,
            selection,
        }
    }

    pub fn select_all(&self, page_row_count: usize) -> Self {
        Self {
            sort: self.sort.clone(),
            page: self.page,
            selection: (0..page_row_count).collect(),
        }
    }

    pub fn clear_selection(&self) -> Self {
        Self {
            sort: self.sort.clone(),
            page: self.page,
            selection: Selection::new(),
        }
    }

    pub fn all_selected(&self, page_row_count: usize) -> bool {
        self.selection.len() == page_row_count
    }
}

/// Rows in natural order when no key is set, otherwise a stable sort so
/// equal keys retain their input order.
pub fn sort_rows(rows: &[Row], spec: &SortSpec) -> Vec<Row> {
    let mut sorted: Vec<Row> = rows.to_vec();
    let Some(key) = spec.key.as_deref() else {
        return sorted;
    };
    sorted.sort_by(|a, b| {
        let ordering = match (a.get(key), b.get(key)) {
            (Some(left), Some(right)) => left.compare(right),
            _ => std::cmp::Ordering::Equal,
        };
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page_rows: Vec<Row>,
    pub start_index: usize,
    pub total_pages: usize,
}

pub fn paginate(rows: &[Row], page: &PageSpec) -> PageView {
    let start_index = (page.current_page - 1) * page.page_size;
    let end = start_index.saturating_add(page.page_size).min(rows.len());
    let page_rows = if start_index < rows.len() {
        rows[start_index..end].to_vec()
    } else {
        Vec::new()
    };
    PageView {
        page_rows,
        start_index,
        total_pages: page.total_pages(rows.len()),
    }
}

/// "Showing X to Y of N entries" for the pagination bar. An empty result
/// reads "Showing 0 to 0 of 0 entries".
pub fn entries_summary(page: &PageSpec, row_count: usize) -> String {
    if row_count == 0 {
        return "Showing 0 to 0 of 0 entries".to_string();
    }
    let start_index = (page.current_page - 1) * page.page_size;
    let first = start_index + 1;
    let last = (start_index + page.page_size).min(row_count);
    format!("Showing {first} to {last} of {row_count} entries")
}
