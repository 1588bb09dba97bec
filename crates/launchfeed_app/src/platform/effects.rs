use std::collections::BTreeMap;

use launchfeed_core::{Effect, LaunchDetail, LaunchSummary, LoadErrorKind, Msg, PageRequest};
use launchfeed_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, FetchSettings, LaunchRecord, RequestId,
};
use launchfeed_logging::{feed_debug, feed_info, feed_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    next_request_id: RequestId,
    pending_pages: BTreeMap<RequestId, PageRequest>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_request_id: 1,
            pending_pages: BTreeMap::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    let request_id = self.next_request_id;
                    self.next_request_id += 1;
                    self.pending_pages.insert(request_id, request);
                    feed_info!(
                        "FetchPage request_id={} kind={:?} offset={} limit={}",
                        request_id,
                        request.kind,
                        request.offset,
                        request.limit
                    );
                    self.engine
                        .fetch_page(request_id, request.offset, request.limit);
                }
                Effect::ScheduleDebounce { generation, delay } => {
                    feed_debug!("ScheduleDebounce generation={} delay={:?}", generation, delay);
                    self.engine.debounce(generation, delay);
                }
                Effect::FetchDetail { id } => {
                    feed_info!("FetchDetail id={}", id);
                    self.engine.fetch_launch(id);
                }
            }
        }
    }

    /// Collect every engine event that arrived since the last call.
    pub fn drain(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = self.translate(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    fn translate(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::PageFetched { request_id, result } => {
                let Some(request) = self.pending_pages.remove(&request_id) else {
                    feed_warn!("Dropping page for unknown request {}", request_id);
                    return None;
                };
                let result = result
                    .map(|records| records.iter().map(to_summary).collect())
                    .map_err(|err| {
                        feed_warn!("Page request {} failed: {}", request_id, err);
                        map_failure(&err.kind)
                    });
                Some(Msg::PageLoaded { request, result })
            }
            EngineEvent::LaunchFetched {
                flight_number,
                result,
            } => Some(Msg::DetailLoaded {
                id: flight_number,
                result: result.map(to_detail).map_err(|err| {
                    feed_warn!("Detail for launch {} failed: {}", flight_number, err);
                    map_failure(&err.kind)
                }),
            }),
            EngineEvent::DebounceElapsed { generation } => {
                Some(Msg::DebounceElapsed { generation })
            }
        }
    }
}

fn to_summary(record: &LaunchRecord) -> LaunchSummary {
    LaunchSummary::from_record(
        record.flight_number,
        record.mission_name.clone(),
        record.upcoming,
        record.launch_success,
    )
}

fn to_detail(record: LaunchRecord) -> LaunchDetail {
    let links = record.links.unwrap_or_default();
    LaunchDetail {
        launch_date_unix: record.launch_date_unix,
        details: record.details,
        article_link: links.article_link,
        video_link: links.video_link,
        mission_patch: links.mission_patch,
    }
}

fn map_failure(kind: &FailureKind) -> LoadErrorKind {
    match kind {
        FailureKind::HttpStatus(code) => LoadErrorKind::HttpStatus(*code),
        FailureKind::Timeout => LoadErrorKind::Timeout,
        FailureKind::TooLarge { .. } => LoadErrorKind::TooLarge,
        FailureKind::Malformed => LoadErrorKind::MalformedResponse,
        FailureKind::InvalidUrl | FailureKind::Network => LoadErrorKind::Network,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use launchfeed_core::{
        update, Effect, FeedState, LaunchStatus, LaunchSummary, LoadErrorKind, Msg, PageKind,
        PageRequest, PAGE_SIZE,
    };
    use launchfeed_engine::{
        EngineHandle, FailureKind, FetchError, LaunchApi, LaunchLinks, LaunchRecord,
    };
    use pretty_assertions::assert_eq;

    use super::{map_failure, to_detail, to_summary, EffectRunner};

    fn record(flight_number: u32, upcoming: bool, launch_success: Option<bool>) -> LaunchRecord {
        LaunchRecord {
            flight_number,
            mission_name: format!("Mission {flight_number}"),
            upcoming,
            launch_success,
            launch_date_unix: None,
            details: None,
            links: None,
        }
    }

    /// Serves `total` upcoming launches, or fails every page when `total` is zero.
    struct PagedApi {
        total: u32,
    }

    #[async_trait::async_trait]
    impl LaunchApi for PagedApi {
        async fn fetch_page(
            &self,
            offset: u32,
            limit: u32,
        ) -> Result<Vec<LaunchRecord>, FetchError> {
            if self.total == 0 {
                return Err(FetchError {
                    kind: FailureKind::Network,
                    message: "connection refused".to_string(),
                });
            }
            let end = (offset + limit).min(self.total);
            Ok((offset + 1..=end).map(|id| record(id, true, None)).collect())
        }

        async fn fetch_launch(&self, flight_number: u32) -> Result<LaunchRecord, FetchError> {
            Ok(record(flight_number, false, Some(true)))
        }
    }

    fn runner(total: u32) -> EffectRunner {
        let engine = EngineHandle::with_api(Arc::new(PagedApi { total })).expect("engine");
        EffectRunner::with_engine(engine)
    }

    fn wait_for_msgs(runner: &mut EffectRunner, count: usize) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut msgs = Vec::new();
        while msgs.len() < count && Instant::now() < deadline {
            msgs.extend(runner.drain());
            thread::sleep(Duration::from_millis(5));
        }
        msgs
    }

    /// Run messages through `update`, executing effects until the feed settles.
    fn settle(mut state: FeedState, runner: &mut EffectRunner, msg: Msg) -> FeedState {
        let (next, effects) = update(state, msg);
        state = next;
        let expected = effects.len();
        runner.run(effects);
        for msg in wait_for_msgs(runner, expected) {
            let (next, effects) = update(state, msg);
            state = next;
            assert!(effects.is_empty());
        }
        state
    }

    #[test]
    fn falcon_test_record_maps_to_success() {
        let record = LaunchRecord {
            mission_name: "Falcon Test".to_string(),
            ..record(5, false, Some(true))
        };
        assert_eq!(
            to_summary(&record),
            LaunchSummary::new(5, "Falcon Test", LaunchStatus::Success)
        );

        let failed = LaunchRecord {
            launch_success: Some(false),
            ..record
        };
        assert_eq!(to_summary(&failed).status, LaunchStatus::Failed);
    }

    #[test]
    fn detail_flattens_links() {
        let detail = to_detail(LaunchRecord {
            launch_date_unix: Some(1_143_239_400),
            links: Some(LaunchLinks {
                article_link: Some("https://example.com/a".to_string()),
                video_link: None,
                mission_patch: Some("https://example.com/p.png".to_string()),
            }),
            ..record(1, false, Some(false))
        });
        assert_eq!(detail.launch_date_unix, Some(1_143_239_400));
        assert_eq!(detail.article_link.as_deref(), Some("https://example.com/a"));
        assert_eq!(detail.video_link, None);
        assert_eq!(detail.mission_patch.as_deref(), Some("https://example.com/p.png"));
    }

    #[test]
    fn failures_collapse_into_load_error_kinds() {
        assert_eq!(
            map_failure(&FailureKind::HttpStatus(500)),
            LoadErrorKind::HttpStatus(500)
        );
        assert_eq!(
            map_failure(&FailureKind::Malformed),
            LoadErrorKind::MalformedResponse
        );
        assert_eq!(
            map_failure(&FailureKind::TooLarge {
                max_bytes: 1,
                actual: None
            }),
            LoadErrorKind::TooLarge
        );
        assert_eq!(map_failure(&FailureKind::InvalidUrl), LoadErrorKind::Network);
    }

    #[test]
    fn page_results_are_matched_to_their_request() {
        let mut runner = runner(20);
        let request = PageRequest {
            kind: PageKind::More,
            offset: 14,
            limit: PAGE_SIZE,
        };
        runner.run(vec![Effect::FetchPage(request)]);

        let msgs = wait_for_msgs(&mut runner, 1);
        match msgs.as_slice() {
            [Msg::PageLoaded {
                request: answered,
                result: Ok(items),
            }] => {
                assert_eq!(*answered, request);
                assert_eq!(items.len(), 6);
                assert_eq!(items[0].id, 15);
            }
            other => panic!("unexpected messages {other:?}"),
        }
    }

    #[test]
    fn feed_pages_through_to_the_end() {
        let mut runner = runner(28);
        let mut state = settle(FeedState::new(), &mut runner, Msg::Mounted);
        assert_eq!(state.items().len(), 14);

        for _ in 0..4 {
            state = settle(state, &mut runner, Msg::SentinelVisibility { visible: false });
            state = settle(state, &mut runner, Msg::SentinelVisibility { visible: true });
        }

        assert_eq!(state.items().len(), 28);
        assert!(!state.has_more());
        assert_eq!(state.page_cursor(), 3);
    }

    #[test]
    fn network_failure_surfaces_as_load_error() {
        let mut runner = runner(0);
        let state = settle(FeedState::new(), &mut runner, Msg::Mounted);

        assert!(state.items().is_empty());
        assert!(!state.is_initial_loading());
        assert_eq!(
            state.load_error().map(|error| error.kind),
            Some(LoadErrorKind::Network)
        );
    }

    #[test]
    fn debounce_effect_round_trips() {
        let mut runner = runner(0);
        runner.run(vec![Effect::ScheduleDebounce {
            generation: 4,
            delay: Duration::from_millis(20),
        }]);

        assert_eq!(
            wait_for_msgs(&mut runner, 1),
            vec![Msg::DebounceElapsed { generation: 4 }]
        );
    }
}
