use crate::{LaunchDetail, LaunchId, LaunchSummary, LoadErrorKind, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The feed view was mounted; triggers the initial page load.
    Mounted,
    /// A page fetch finished.
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<LaunchSummary>, LoadErrorKind>,
    },
    /// User edited the search box (full, undebounced text).
    SearchInput(String),
    /// The debounce timer for `generation` fired.
    DebounceElapsed { generation: u64 },
    /// Visibility of the sentinel row as observed after a frame.
    SentinelVisibility { visible: bool },
    /// User asked to retry the last failed page load.
    RetryRequested,
    /// User moved the highlighted row by `delta` rows.
    SelectionMoved(isize),
    /// User revealed or hid the detail of a launch.
    DetailToggled { id: LaunchId },
    /// A detail fetch finished.
    DetailLoaded {
        id: LaunchId,
        result: Result<LaunchDetail, LoadErrorKind>,
    },
}
