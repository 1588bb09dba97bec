use launchfeed_logging::{feed_debug, feed_warn};

use crate::{Effect, FeedState, Msg, PageKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => load_initial(&mut state),
        Msg::PageLoaded { request, result } => {
            match result {
                Ok(page) => state.apply_page(request, page),
                Err(kind) => state.apply_page_failure(request, kind),
            }
            Vec::new()
        }
        Msg::SearchInput(text) => {
            let generation = state.set_search_term(text);
            vec![Effect::ScheduleDebounce {
                generation,
                delay: state.debounce_window(),
            }]
        }
        Msg::DebounceElapsed { generation } => {
            state.commit_search(generation);
            Vec::new()
        }
        Msg::SentinelVisibility { visible } => {
            // Guards are evaluated on the edge itself, never cached.
            if state.observe_sentinel(visible) {
                load_more(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::RetryRequested => retry(&mut state),
        Msg::SelectionMoved(delta) => {
            state.move_selection(delta);
            Vec::new()
        }
        Msg::DetailToggled { id } => {
            if state.expanded() == Some(id) {
                state.collapse();
                Vec::new()
            } else if !state.contains(id) {
                feed_warn!("Detail requested for unknown launch {}", id);
                Vec::new()
            } else if state.expand(id) {
                vec![Effect::FetchDetail { id }]
            } else {
                Vec::new()
            }
        }
        Msg::DetailLoaded { id, result } => {
            state.apply_detail(id, result);
            Vec::new()
        }
    };

    (state, effects)
}

fn load_initial(state: &mut FeedState) -> Vec<Effect> {
    // One gate for both fetch kinds; an already loaded feed is never reset.
    if state.is_fetch_in_flight() || state.page_cursor() > 0 {
        feed_debug!(
            "Initial load skipped (in_flight={}, page_cursor={})",
            state.is_fetch_in_flight(),
            state.page_cursor()
        );
        return Vec::new();
    }
    vec![Effect::FetchPage(state.begin_fetch(PageKind::Initial))]
}

fn load_more(state: &mut FeedState) -> Vec<Effect> {
    if !state.can_load_more() {
        feed_debug!(
            "Pagination suppressed (has_more={}, in_flight={}, filter_active={})",
            state.has_more(),
            state.is_fetch_in_flight(),
            state.is_filter_active()
        );
        return Vec::new();
    }
    vec![Effect::FetchPage(state.begin_fetch(PageKind::More))]
}

fn retry(state: &mut FeedState) -> Vec<Effect> {
    let Some(error) = state.load_error() else {
        return Vec::new();
    };
    match error.request.kind {
        PageKind::Initial => load_initial(state),
        PageKind::More => load_more(state),
    }
}
