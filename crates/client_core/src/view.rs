//! Derived grid view: tri-state column sort plus case-insensitive substring
//! filter over a snapshot of the canonical address collection.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use shared::domain::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// One step of the per-column cycle: none -> ascending -> descending -> none.
    pub fn cycled(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }
}

/// Sortable attributes. The phone number is deliberately not representable
/// here: it is a numeric-looking string with no ordering semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Surname,
}

impl SortField {
    fn key(self, address: &Address) -> &str {
        match self {
            Self::Name => &address.name,
            Self::Surname => &address.surname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub header: &'static str,
    pub sort_field: Option<SortField>,
    pub sort_order: SortOrder,
}

impl ColumnDescriptor {
    fn sortable(header: &'static str, field: SortField) -> Self {
        Self {
            header,
            sort_field: Some(field),
            sort_order: SortOrder::None,
        }
    }

    fn unsortable(header: &'static str) -> Self {
        Self {
            header,
            sort_field: None,
            sort_order: SortOrder::None,
        }
    }
}

/// Ordered visible rows plus the paging intent the rendering surface needs to
/// window them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub rows: Vec<Address>,
    pub total: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl ViewSnapshot {
    /// Rows of the current page. Windowing is generic paging math; it lives
    /// here so every rendering surface slices identically.
    pub fn page_rows(&self) -> &[Address] {
        &self.rows[page_window(self.total, self.page_index, self.page_size)]
    }
}

/// Half-open row range of one page, clamped into the visible row count.
pub fn page_window(total: usize, page_index: usize, page_size: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

/// The view engine. Holds user intent (search text, column sort state, page)
/// and the visible rows last derived from the canonical collection. It never
/// owns or mutates the canonical collection itself.
#[derive(Debug, Clone)]
pub struct GridView {
    columns: Vec<ColumnDescriptor>,
    search_text: String,
    page_index: usize,
    page_size: usize,
    visible: Vec<Address>,
}

impl GridView {
    pub fn new(page_size: usize) -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::sortable("Name", SortField::Name),
                ColumnDescriptor::sortable("Surname", SortField::Surname),
                ColumnDescriptor::unsortable("Phone Number"),
            ],
            search_text: String::new(),
            page_index: 0,
            page_size: page_size.max(1),
            visible: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Stores the filter text. Empty text means "no filter". Takes effect on
    /// the next [`GridView::recompute`].
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page_index = 0;
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
        self.clamp_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_page();
    }

    /// Cycles the sort state of the column backing `field` and forces every
    /// other column back to none. The single-active-column invariant is
    /// enforced here, on every transition, rather than assumed.
    pub fn toggle_sort(&mut self, field: SortField) -> SortOrder {
        let next = self
            .columns
            .iter()
            .find(|column| column.sort_field == Some(field))
            .map(|column| column.sort_order.cycled())
            .unwrap_or(SortOrder::None);
        for column in &mut self.columns {
            column.sort_order = if column.sort_field == Some(field) {
                next
            } else {
                SortOrder::None
            };
        }
        next
    }

    /// The single active sort, if any column is currently non-none.
    pub fn active_sort(&self) -> Option<(SortField, SortOrder)> {
        self.columns.iter().find_map(|column| {
            let field = column.sort_field?;
            (column.sort_order != SortOrder::None).then_some((field, column.sort_order))
        })
    }

    /// Re-derives the visible rows from the given canonical collection:
    /// filter first, then sort. Pure and synchronous; zero matches simply
    /// yield an empty sequence.
    pub fn recompute(&mut self, canonical: &[Address]) {
        let needle = self.search_text.to_lowercase();
        let mut rows: Vec<Address> = canonical
            .iter()
            .filter(|address| {
                needle.is_empty()
                    || address.name.to_lowercase().contains(&needle)
                    || address.surname.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        match self.active_sort() {
            Some((field, SortOrder::Ascending)) => {
                // Stable sort, so ties keep canonical-collection order.
                rows.sort_by(|a, b| field.key(a).to_lowercase().cmp(&field.key(b).to_lowercase()));
            }
            Some((field, SortOrder::Descending)) => {
                rows.sort_by(|a, b| field.key(b).to_lowercase().cmp(&field.key(a).to_lowercase()));
            }
            // No active column: canonical insertion order passes through.
            Some((_, SortOrder::None)) | None => {}
        }

        self.visible = rows;
        self.clamp_page();
    }

    pub fn visible(&self) -> &[Address] {
        &self.visible
    }

    pub fn total_count(&self) -> usize {
        self.visible.len()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            rows: self.visible.clone(),
            total: self.visible.len(),
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }

    fn clamp_page(&mut self) {
        let last_page = match self.visible.len() {
            0 => 0,
            total => (total - 1) / self.page_size,
        };
        self.page_index = self.page_index.min(last_page);
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
