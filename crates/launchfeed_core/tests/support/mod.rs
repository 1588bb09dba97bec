#![allow(dead_code)]

use std::sync::Once;

use launchfeed_core::{
    update, Effect, FeedState, LaunchStatus, LaunchSummary, Msg, PageKind, PageRequest, PAGE_SIZE,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(launchfeed_logging::initialize_for_tests);
}

pub fn launches(ids: impl IntoIterator<Item = u32>) -> Vec<LaunchSummary> {
    ids.into_iter()
        .map(|id| LaunchSummary::new(id, format!("Mission {id}"), LaunchStatus::Upcoming))
        .collect()
}

pub fn request(kind: PageKind, offset: u32) -> PageRequest {
    PageRequest {
        kind,
        offset,
        limit: PAGE_SIZE,
    }
}

/// Extract the single page request from an effect list.
pub fn page_request(effects: &[Effect]) -> PageRequest {
    match effects {
        [Effect::FetchPage(request)] => *request,
        other => panic!("expected a single FetchPage effect, got {other:?}"),
    }
}

/// Mount and complete the initial load with `page`.
pub fn loaded_with(page: Vec<LaunchSummary>) -> FeedState {
    let (state, effects) = update(FeedState::new(), Msg::Mounted);
    let request = page_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(page),
        },
    );
    state
}

/// Report the sentinel as visible and return the resulting effects.
pub fn reveal_sentinel(state: FeedState) -> (FeedState, Vec<Effect>) {
    let (state, _) = update(state, Msg::SentinelVisibility { visible: false });
    update(state, Msg::SentinelVisibility { visible: true })
}

/// Type `text` and let its debounce timer fire.
pub fn commit_search(state: FeedState, text: &str) -> FeedState {
    let (state, _) = update(state, Msg::SearchInput(text.to_string()));
    let generation = state.debounce_generation();
    let (state, _) = update(state, Msg::DebounceElapsed { generation });
    state
}
