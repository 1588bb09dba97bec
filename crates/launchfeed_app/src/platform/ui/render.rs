use chrono::DateTime;
use launchfeed_core::{DetailState, FeedViewModel, LaunchDetail, LaunchRowView, LaunchStatus};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::layout;
use super::viewport::last_item_fully_visible;

const DETAIL_INDENT: &str = "      ";

/// What the host learned from drawing a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The sentinel row is fully inside the list viewport.
    pub sentinel_visible: bool,
}

pub fn render(frame: &mut Frame, view: &FeedViewModel, list_state: &mut ListState) -> FrameReport {
    let areas = layout::split(frame.area());
    render_search(frame, areas.search, view);
    let report = render_list(frame, areas.list, view, list_state);
    render_status(frame, areas.status, view);
    report
}

fn render_search(frame: &mut Frame, area: Rect, view: &FeedViewModel) {
    let committed = view.filter.as_deref().unwrap_or("");
    let title = if view.search_term.trim() != committed {
        "Search (filtering…)"
    } else {
        "Search"
    };
    let block = Block::bordered().title(title);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(view.search_term.as_str()).block(block), area);

    let typed = u16::try_from(view.search_term.chars().count()).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(typed).min(inner.right().saturating_sub(1));
    frame.set_cursor_position((x, inner.y));
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    view: &FeedViewModel,
    list_state: &mut ListState,
) -> FrameReport {
    let title = match &view.filter {
        Some(_) => format!("Launches ({} of {})", view.rows.len(), view.total_loaded),
        None => format!("Launches ({})", view.total_loaded),
    };
    let block = Block::bordered().title(title);

    let mut items: Vec<ListItem> = view.rows.iter().map(row_item).collect();
    if view.show_sentinel {
        items.push(sentinel_item(view));
    }
    if items.is_empty() {
        let placeholder = if view.is_initial_loading {
            "Loading launches…"
        } else if view.filter.is_some() {
            "No loaded launch matches the search."
        } else {
            "No launches."
        };
        frame.render_widget(
            Paragraph::new(placeholder)
                .style(Style::new().add_modifier(Modifier::DIM))
                .block(block),
            area,
        );
        return FrameReport::default();
    }

    let heights: Vec<usize> = items.iter().map(ListItem::height).collect();
    let viewport = usize::from(block.inner(area).height);
    list_state.select(view.selected);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ")
        .scroll_padding(1);
    frame.render_stateful_widget(list, area, list_state);

    FrameReport {
        sentinel_visible: view.show_sentinel
            && last_item_fully_visible(&heights, list_state.offset(), viewport),
    }
}

fn row_item(row: &LaunchRowView) -> ListItem<'static> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("#{:<4} ", row.id),
            Style::new().add_modifier(Modifier::DIM),
        ),
        Span::raw(row.name.clone()),
        Span::raw("  "),
        Span::styled(row.status.label(), status_style(row.status)),
    ])];
    if row.expanded {
        lines.extend(detail_lines(row.detail.as_ref()));
    }
    ListItem::new(Text::from(lines))
}

fn status_style(status: LaunchStatus) -> Style {
    match status {
        LaunchStatus::Upcoming => Style::new().fg(Color::Cyan),
        LaunchStatus::Success => Style::new().fg(Color::Green),
        LaunchStatus::Failed => Style::new().fg(Color::Red),
    }
}

fn detail_lines(detail: Option<&DetailState>) -> Vec<Line<'static>> {
    match detail {
        None | Some(DetailState::Loading) => vec![indented("Loading details…".to_string())],
        Some(DetailState::Failed(kind)) => vec![indented(format!(
            "Details unavailable ({kind}); press Enter twice to retry."
        ))],
        Some(DetailState::Loaded(detail)) => loaded_detail_lines(detail),
    }
}

fn loaded_detail_lines(detail: &LaunchDetail) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(launched) = detail
        .launch_date_unix
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        lines.push(indented(format!(
            "Launch date: {}",
            launched.format("%Y-%m-%d %H:%M UTC")
        )));
    }
    if let Some(text) = &detail.details {
        lines.push(indented(text.clone()));
    }
    for (label, link) in [
        ("Article", &detail.article_link),
        ("Video", &detail.video_link),
        ("Patch", &detail.mission_patch),
    ] {
        if let Some(link) = link {
            lines.push(indented(format!("{label}: {link}")));
        }
    }
    if lines.is_empty() {
        lines.push(indented("No further details.".to_string()));
    }
    lines
}

fn indented(text: String) -> Line<'static> {
    Line::from(vec![Span::raw(DETAIL_INDENT), Span::raw(text)])
}

fn sentinel_item(view: &FeedViewModel) -> ListItem<'static> {
    let text = if view.is_page_loading {
        "Loading more launches…"
    } else {
        "Scroll for more"
    };
    ListItem::new(Line::styled(
        text,
        Style::new().add_modifier(Modifier::DIM | Modifier::ITALIC),
    ))
}

fn render_status(frame: &mut Frame, area: Rect, view: &FeedViewModel) {
    let line = match &view.load_error {
        Some(error) => Line::styled(
            format!("Loading launches failed: {}. Ctrl-R to retry.", error.kind),
            Style::new().fg(Color::Red),
        ),
        None => Line::raw(status_text(view)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn status_text(view: &FeedViewModel) -> String {
    let mut parts = vec![format!("{} loaded", view.total_loaded)];
    if let Some(filter) = &view.filter {
        parts.push(format!("{} match \"{}\"", view.rows.len(), filter));
    }
    if view.is_initial_loading || view.is_page_loading {
        parts.push("loading…".to_string());
    } else if !view.has_more {
        parts.push("end of feed".to_string());
    }
    parts.push("↑↓ move · Enter details · Esc quit".to_string());
    parts.join(" · ")
}
