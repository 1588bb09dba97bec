use std::time::Duration;

use crate::{LaunchId, PageRequest};

/// Work the host must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET one page of launches and answer with `Msg::PageLoaded`.
    FetchPage(PageRequest),
    /// (Re)start the debounce timer; answer with `Msg::DebounceElapsed`.
    ScheduleDebounce { generation: u64, delay: Duration },
    /// GET a single launch record and answer with `Msg::DetailLoaded`.
    FetchDetail { id: LaunchId },
}
