//! Launch feed core: pure state machine and view-model helpers.
mod effect;
mod launch;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use launch::{LaunchDetail, LaunchId, LaunchStatus, LaunchSummary};
pub use msg::Msg;
pub use state::{
    DetailState, FeedState, LoadError, LoadErrorKind, PageKind, PageRequest, SentinelPhase,
    DEBOUNCE_WINDOW, PAGE_SIZE,
};
pub use update::update;
pub use view_model::{FeedViewModel, LaunchRowView};
