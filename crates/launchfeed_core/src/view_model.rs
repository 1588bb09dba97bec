use crate::{DetailState, LaunchId, LaunchStatus, LoadError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedViewModel {
    /// Rows after filtering, in load order.
    pub rows: Vec<LaunchRowView>,
    pub total_loaded: usize,
    /// Raw text in the search box.
    pub search_term: String,
    /// Committed filter, if one is active.
    pub filter: Option<String>,
    pub is_initial_loading: bool,
    pub is_page_loading: bool,
    pub has_more: bool,
    /// Whether the sentinel row is rendered after the last row.
    pub show_sentinel: bool,
    pub load_error: Option<LoadError>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRowView {
    pub id: LaunchId,
    pub name: String,
    pub status: LaunchStatus,
    pub expanded: bool,
    pub detail: Option<DetailState>,
}

impl FeedViewModel {
    pub fn selected_row(&self) -> Option<&LaunchRowView> {
        self.selected.and_then(|index| self.rows.get(index))
    }
}
