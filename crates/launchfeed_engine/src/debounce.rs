use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Cancellable one-shot timer: each `schedule` call replaces the pending one.
pub(crate) struct Debouncer {
    runtime: Handle,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub(crate) fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: None,
        }
    }

    /// Run `on_fire` after `delay` unless another call to `schedule` or
    /// `cancel` happens first.
    pub(crate) fn schedule<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                () = cancelled.cancelled() => {}
                () = tokio::time::sleep(delay) => on_fire(),
            }
        });
        self.pending = Some(token);
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
