//! Launch feed engine: HTTP access to the launches API, debounce timers and
//! the background worker that executes effects.
mod debounce;
mod engine;
mod fetch;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{FetchSettings, LaunchApi, ReqwestLaunchApi, DEFAULT_ENDPOINT};
pub use types::{EngineEvent, FailureKind, FetchError, LaunchLinks, LaunchRecord, RequestId};
