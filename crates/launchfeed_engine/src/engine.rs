use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use launchfeed_logging::{feed_debug, feed_info};

use crate::debounce::Debouncer;
use crate::fetch::{FetchSettings, LaunchApi, ReqwestLaunchApi};
use crate::{EngineEvent, FetchError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to set up http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Fetch(FetchCommand),
    Debounce { generation: u64, delay: Duration },
}

enum FetchCommand {
    Page {
        request_id: RequestId,
        offset: u32,
        limit: u32,
    },
    Launch {
        flight_number: u32,
    },
}

/// Owns a worker thread running the async runtime; commands go in, events come out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let api = ReqwestLaunchApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn LaunchApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut debouncer = Debouncer::new(runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Debounce { generation, delay } => {
                        let event_tx = event_tx.clone();
                        debouncer.schedule(delay, move || {
                            let _ = event_tx.send(EngineEvent::DebounceElapsed { generation });
                        });
                    }
                    EngineCommand::Fetch(command) => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_fetch(api.as_ref(), command, event_tx).await;
                        });
                    }
                }
            }
            feed_info!("Engine command channel closed, worker exiting");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, request_id: RequestId, offset: u32, limit: u32) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch(FetchCommand::Page {
            request_id,
            offset,
            limit,
        }));
    }

    pub fn fetch_launch(&self, flight_number: u32) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Fetch(FetchCommand::Launch { flight_number }));
    }

    /// Restart the debounce timer; only the latest generation reports back.
    pub fn debounce(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Debounce { generation, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_fetch(
    api: &dyn LaunchApi,
    command: FetchCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        FetchCommand::Page {
            request_id,
            offset,
            limit,
        } => {
            let result = api.fetch_page(offset, limit).await;
            feed_debug!(
                "Page request {} (offset={}) finished ok={}",
                request_id,
                offset,
                result.is_ok()
            );
            EngineEvent::PageFetched { request_id, result }
        }
        FetchCommand::Launch { flight_number } => {
            let result = api.fetch_launch(flight_number).await;
            EngineEvent::LaunchFetched {
                flight_number,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
