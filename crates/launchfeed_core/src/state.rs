use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use launchfeed_logging::{feed_debug, feed_info, feed_warn};

use crate::view_model::{FeedViewModel, LaunchRowView};
use crate::{LaunchDetail, LaunchId, LaunchSummary};

/// Number of launches requested per page.
pub const PAGE_SIZE: u32 = 14;

/// Quiet period after the last keystroke before the filter is applied.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// First page, replaces the item list.
    Initial,
    /// Follow-up page, appended to the item list.
    More,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub kind: PageKind,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    TooLarge,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::Network => write!(f, "network error"),
            LoadErrorKind::Timeout => write!(f, "request timed out"),
            LoadErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            LoadErrorKind::MalformedResponse => write!(f, "malformed response"),
            LoadErrorKind::TooLarge => write!(f, "response too large"),
        }
    }
}

/// The last page load that failed, kept so it can be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadError {
    pub request: PageRequest,
    pub kind: LoadErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(LaunchDetail),
    Failed(LoadErrorKind),
}

/// Where the sentinel row is in its visibility cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentinelPhase {
    #[default]
    Idle,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    items: Vec<LaunchSummary>,
    known_ids: BTreeSet<LaunchId>,
    is_initial_loading: bool,
    is_page_loading: bool,
    has_more: bool,
    page_cursor: u32,
    search_term: String,
    debounced_search_term: String,
    debounce_generation: u64,
    debounce_window: Duration,
    sentinel: SentinelPhase,
    load_error: Option<LoadError>,
    selected: usize,
    expanded: Option<LaunchId>,
    details: BTreeMap<LaunchId, DetailState>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            known_ids: BTreeSet::new(),
            is_initial_loading: false,
            is_page_loading: false,
            has_more: true,
            page_cursor: 0,
            search_term: String::new(),
            debounced_search_term: String::new(),
            debounce_generation: 0,
            debounce_window: DEBOUNCE_WINDOW,
            sentinel: SentinelPhase::Idle,
            load_error: None,
            selected: 0,
            expanded: None,
            details: BTreeMap::new(),
            dirty: false,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the search debounce window.
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn items(&self) -> &[LaunchSummary] {
        &self.items
    }

    pub fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    pub fn is_page_loading(&self) -> bool {
        self.is_page_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_cursor(&self) -> u32 {
        self.page_cursor
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn debounced_search_term(&self) -> &str {
        &self.debounced_search_term
    }

    pub fn debounce_generation(&self) -> u64 {
        self.debounce_generation
    }

    pub fn debounce_window(&self) -> Duration {
        self.debounce_window
    }

    pub fn sentinel(&self) -> SentinelPhase {
        self.sentinel
    }

    pub fn load_error(&self) -> Option<LoadError> {
        self.load_error
    }

    pub fn expanded(&self) -> Option<LaunchId> {
        self.expanded
    }

    pub fn detail(&self, id: LaunchId) -> Option<&DetailState> {
        self.details.get(&id)
    }

    /// Either the initial or a follow-up page fetch is outstanding.
    pub fn is_fetch_in_flight(&self) -> bool {
        self.is_initial_loading || self.is_page_loading
    }

    /// A non-blank committed search term narrows the list.
    pub fn is_filter_active(&self) -> bool {
        !self.debounced_search_term.trim().is_empty()
    }

    /// True when a sentinel transition right now would issue a fetch.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.is_fetch_in_flight() && !self.is_filter_active()
    }

    /// Items matching the committed filter, in load order.
    pub fn visible_items(&self) -> Vec<&LaunchSummary> {
        let needle = self.debounced_search_term.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .collect()
    }

    pub fn view(&self) -> FeedViewModel {
        let visible = self.visible_items();
        let rows: Vec<LaunchRowView> = visible
            .iter()
            .map(|item| {
                let expanded = self.expanded == Some(item.id);
                LaunchRowView {
                    id: item.id,
                    name: item.name.clone(),
                    status: item.status,
                    expanded,
                    detail: if expanded {
                        self.details.get(&item.id).cloned()
                    } else {
                        None
                    },
                }
            })
            .collect();
        let selected = if rows.is_empty() {
            None
        } else {
            Some(self.selected.min(rows.len() - 1))
        };
        FeedViewModel {
            rows,
            total_loaded: self.items.len(),
            search_term: self.search_term.clone(),
            filter: self
                .is_filter_active()
                .then(|| self.debounced_search_term.trim().to_string()),
            is_initial_loading: self.is_initial_loading,
            is_page_loading: self.is_page_loading,
            has_more: self.has_more,
            // The list tail only exists once the first page has landed.
            show_sentinel: self.has_more
                && self.page_cursor > 0
                && !self.is_initial_loading
                && !self.is_filter_active(),
            load_error: self.load_error,
            selected,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark a fetch of `kind` as in flight and build its request.
    pub(crate) fn begin_fetch(&mut self, kind: PageKind) -> PageRequest {
        let offset = match kind {
            PageKind::Initial => {
                self.is_initial_loading = true;
                0
            }
            PageKind::More => {
                self.is_page_loading = true;
                self.page_cursor * PAGE_SIZE
            }
        };
        self.mark_dirty();
        let request = PageRequest {
            kind,
            offset,
            limit: PAGE_SIZE,
        };
        feed_debug!(
            "Fetch started kind={:?} offset={} limit={}",
            request.kind,
            request.offset,
            request.limit
        );
        request
    }

    pub(crate) fn apply_page(&mut self, request: PageRequest, page: Vec<LaunchSummary>) {
        let returned = page.len();
        match request.kind {
            PageKind::Initial => {
                self.is_initial_loading = false;
                self.items.clear();
                self.known_ids.clear();
                self.page_cursor = 1;
            }
            PageKind::More => {
                self.is_page_loading = false;
                self.page_cursor += 1;
            }
        }

        let mut dropped = 0usize;
        for item in page {
            if self.known_ids.insert(item.id) {
                self.items.push(item);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            feed_warn!(
                "Dropped {} launch(es) with already known ids at offset {}",
                dropped,
                request.offset
            );
        }

        self.has_more = returned > 0;
        self.load_error = None;
        // The list tail was re-rendered, so the sentinel is a new element.
        self.sentinel = SentinelPhase::Idle;
        self.clamp_selection();
        self.mark_dirty();
        feed_info!(
            "Page loaded kind={:?} offset={} returned={} total={} has_more={}",
            request.kind,
            request.offset,
            returned,
            self.items.len(),
            self.has_more
        );
    }

    pub(crate) fn apply_page_failure(&mut self, request: PageRequest, kind: LoadErrorKind) {
        match request.kind {
            PageKind::Initial => self.is_initial_loading = false,
            PageKind::More => self.is_page_loading = false,
        }
        self.load_error = Some(LoadError { request, kind });
        self.mark_dirty();
        feed_warn!(
            "Page load failed kind={:?} offset={}: {}",
            request.kind,
            request.offset,
            kind
        );
    }

    /// Store raw input and start a new debounce generation.
    pub(crate) fn set_search_term(&mut self, text: String) -> u64 {
        self.search_term = text;
        self.debounce_generation += 1;
        self.mark_dirty();
        self.debounce_generation
    }

    /// Commit the raw term if `generation` is still the latest one.
    pub(crate) fn commit_search(&mut self, generation: u64) -> bool {
        if generation != self.debounce_generation {
            feed_debug!(
                "Ignoring stale debounce generation {} (current {})",
                generation,
                self.debounce_generation
            );
            return false;
        }
        if self.debounced_search_term != self.search_term {
            self.debounced_search_term = self.search_term.clone();
            self.selected = 0;
            self.mark_dirty();
            feed_info!("Filter applied: {:?}", self.debounced_search_term);
        }
        true
    }

    /// Record a sentinel observation; returns true on an idle -> visible edge.
    pub(crate) fn observe_sentinel(&mut self, visible: bool) -> bool {
        let next = if visible {
            SentinelPhase::Visible
        } else {
            SentinelPhase::Idle
        };
        let entered = self.sentinel == SentinelPhase::Idle && next == SentinelPhase::Visible;
        self.sentinel = next;
        entered
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let len = self.visible_items().len();
        if len == 0 {
            return;
        }
        let current = self.selected.min(len - 1);
        let next = current.saturating_add_signed(delta).min(len - 1);
        if next != self.selected {
            self.selected = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn contains(&self, id: LaunchId) -> bool {
        self.known_ids.contains(&id)
    }

    /// Expand `id`; returns true when its detail still has to be fetched.
    pub(crate) fn expand(&mut self, id: LaunchId) -> bool {
        self.expanded = Some(id);
        self.mark_dirty();
        match self.details.get(&id) {
            Some(DetailState::Loading) | Some(DetailState::Loaded(_)) => false,
            None | Some(DetailState::Failed(_)) => {
                self.details.insert(id, DetailState::Loading);
                true
            }
        }
    }

    pub(crate) fn collapse(&mut self) {
        self.expanded = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_detail(&mut self, id: LaunchId, result: Result<LaunchDetail, LoadErrorKind>) {
        let state = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(kind) => {
                feed_warn!("Detail load failed for launch {}: {}", id, kind);
                DetailState::Failed(kind)
            }
        };
        self.details.insert(id, state);
        if self.expanded == Some(id) {
            self.mark_dirty();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
