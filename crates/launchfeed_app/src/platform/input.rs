use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use launchfeed_core::{FeedViewModel, Msg};

/// Rows skipped by PageUp / PageDown.
const PAGE_JUMP: isize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Dispatch(Msg),
}

/// Map a key press to an action, given the currently rendered view.
pub fn map_key(key: KeyEvent, view: &FeedViewModel) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let msg = match key.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('r') if ctrl => Msg::RetryRequested,
        KeyCode::Esc if view.search_term.is_empty() => return Some(Action::Quit),
        KeyCode::Esc => Msg::SearchInput(String::new()),
        KeyCode::Up => Msg::SelectionMoved(-1),
        KeyCode::Down => Msg::SelectionMoved(1),
        KeyCode::PageUp => Msg::SelectionMoved(-PAGE_JUMP),
        KeyCode::PageDown => Msg::SelectionMoved(PAGE_JUMP),
        KeyCode::Home => Msg::SelectionMoved(isize::MIN),
        KeyCode::End => Msg::SelectionMoved(isize::MAX),
        KeyCode::Enter => Msg::DetailToggled {
            id: view.selected_row()?.id,
        },
        KeyCode::Backspace => {
            let mut text = view.search_term.clone();
            text.pop()?;
            Msg::SearchInput(text)
        }
        KeyCode::Char(c) if !ctrl => {
            let mut text = view.search_term.clone();
            text.push(c);
            Msg::SearchInput(text)
        }
        _ => return None,
    };
    Some(Action::Dispatch(msg))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use launchfeed_core::{FeedViewModel, LaunchRowView, LaunchStatus, Msg};

    use super::{map_key, Action};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn view_with_search(term: &str) -> FeedViewModel {
        FeedViewModel {
            search_term: term.to_string(),
            ..FeedViewModel::default()
        }
    }

    #[test]
    fn typing_extends_the_search_term() {
        assert_eq!(
            map_key(press(KeyCode::Char('a')), &view_with_search("Sp")),
            Some(Action::Dispatch(Msg::SearchInput("Spa".to_string())))
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace), &view_with_search("Spa")),
            Some(Action::Dispatch(Msg::SearchInput("Sp".to_string())))
        );
        assert_eq!(map_key(press(KeyCode::Backspace), &view_with_search("")), None);
    }

    #[test]
    fn escape_clears_search_before_quitting() {
        assert_eq!(
            map_key(press(KeyCode::Esc), &view_with_search("falcon")),
            Some(Action::Dispatch(Msg::SearchInput(String::new())))
        );
        assert_eq!(
            map_key(press(KeyCode::Esc), &view_with_search("")),
            Some(Action::Quit)
        );
        assert_eq!(map_key(ctrl('c'), &view_with_search("x")), Some(Action::Quit));
    }

    #[test]
    fn control_keys_do_not_type() {
        assert_eq!(
            map_key(ctrl('r'), &view_with_search("")),
            Some(Action::Dispatch(Msg::RetryRequested))
        );
        assert_eq!(map_key(ctrl('x'), &view_with_search("")), None);
    }

    #[test]
    fn enter_toggles_the_selected_launch() {
        let view = FeedViewModel {
            rows: vec![
                LaunchRowView {
                    id: 1,
                    name: "FalconSat".to_string(),
                    status: LaunchStatus::Failed,
                    expanded: false,
                    detail: None,
                },
                LaunchRowView {
                    id: 2,
                    name: "DemoSat".to_string(),
                    status: LaunchStatus::Failed,
                    expanded: false,
                    detail: None,
                },
            ],
            selected: Some(1),
            ..FeedViewModel::default()
        };
        assert_eq!(
            map_key(press(KeyCode::Enter), &view),
            Some(Action::Dispatch(Msg::DetailToggled { id: 2 }))
        );
        assert_eq!(map_key(press(KeyCode::Enter), &view_with_search("")), None);
    }
}
