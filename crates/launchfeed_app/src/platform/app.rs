use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use launchfeed_core::{update, FeedState, Msg};
use launchfeed_logging::{feed_error, feed_info};
use ratatui::widgets::ListState;

use super::config::Config;
use super::effects::EffectRunner;
use super::input::{self, Action};
use super::ui::render::{self, FrameReport};
use super::{logging, terminal};

/// How long to wait for input before polling engine events again.
const TICK: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::initialize(&config.log_file, config.log_level());
    feed_info!("Starting launchfeed endpoint={}", config.endpoint);

    let mut runner =
        EffectRunner::new(config.fetch_settings()).context("failed to start the fetch engine")?;
    let state = FeedState::new().with_debounce_window(config.debounce_window());

    let mut terminal = terminal::init().context("failed to initialize the terminal")?;
    let _restore = terminal::RestoreGuard;
    let result = event_loop(&mut terminal, &mut runner, state);
    match &result {
        Ok(()) => feed_info!("Exiting launchfeed"),
        Err(err) => feed_error!("Event loop failed: {:#}", err),
    }
    result
}

fn event_loop(
    terminal: &mut terminal::Tui,
    runner: &mut EffectRunner,
    mut state: FeedState,
) -> anyhow::Result<()> {
    let mut list_state = ListState::default();
    let mut force_redraw = true;
    state = dispatch(state, Msg::Mounted, runner);

    loop {
        for msg in runner.drain() {
            state = dispatch(state, msg, runner);
        }

        if state.consume_dirty() || force_redraw {
            force_redraw = false;
            let view = state.view();
            let mut report = FrameReport::default();
            terminal.draw(|frame| report = render::render(frame, &view, &mut list_state))?;
            // Level report; the core only reacts to idle -> visible edges.
            state = dispatch(
                state,
                Msg::SentinelVisibility {
                    visible: report.sentinel_visible,
                },
                runner,
            );
        }

        if !event::poll(TICK)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match input::map_key(key, &state.view()) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Dispatch(msg)) => state = dispatch(state, msg, runner),
                    None => {}
                }
            }
            Event::Resize(_, _) => force_redraw = true,
            _ => {}
        }
    }
}

fn dispatch(state: FeedState, msg: Msg, runner: &mut EffectRunner) -> FeedState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}
