use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};

use crate::app::App;
use crate::keys::Action;

use super::{ACCENT, DIM, TEXT, layout};

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let entries = app.log_buffer.get_entries();

    let block = Block::bordered()
        .title(format!(" Logs ({}) ", entries.len()))
        .border_style(Style::default().fg(ACCENT));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new("No log entries").style(Style::default().fg(DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let (level_str, level_color) = match entry.level {
                tracing::Level::ERROR => ("ERR", Color::Red),
                tracing::Level::WARN => ("WRN", Color::Yellow),
                tracing::Level::INFO => ("INF", Color::Cyan),
                tracing::Level::DEBUG => ("DBG", Color::Green),
                tracing::Level::TRACE => ("TRC", DIM),
            };

            // Keep the end of long targets; it's the most specific part.
            let target = match entry
                .target
                .char_indices()
                .rev()
                .nth(layout::LOG_TARGET_SUFFIX_LEN - 1)
            {
                Some((start, _)) if entry.target.chars().count() > layout::LOG_TARGET_WIDTH => {
                    format!("...{}", &entry.target[start..])
                }
                _ => entry.target.clone(),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    level_str,
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{target:width$}", width = layout::LOG_TARGET_WIDTH),
                    Style::default().fg(DIM),
                ),
                Span::raw(" "),
                Span::styled(entry.message.clone(), Style::default().fg(TEXT)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let max_offset = entries.len().saturating_sub(1);
    app.logs_scroll_offset = app.logs_scroll_offset.min(max_offset);

    let mut state = ListState::default();
    state.select(Some(app.logs_scroll_offset));
    frame.render_stateful_widget(list, inner, &mut state);
}

pub fn handle_key(app: &mut App, action: Action) {
    let last = app.log_buffer.len().saturating_sub(1);

    match action {
        Action::Back => app.toggle_logs(),
        Action::MoveUp => {
            app.logs_scroll_offset = app.logs_scroll_offset.saturating_sub(1);
        }
        Action::MoveDown => {
            app.logs_scroll_offset = (app.logs_scroll_offset + 1).min(last);
        }
        Action::PageUp => {
            app.logs_scroll_offset = app
                .logs_scroll_offset
                .saturating_sub(layout::PAGE_SCROLL_SIZE);
        }
        Action::PageDown => {
            app.logs_scroll_offset = (app.logs_scroll_offset + layout::PAGE_SCROLL_SIZE).min(last);
        }
        Action::GotoTop => app.logs_scroll_offset = 0,
        Action::GotoBottom => app.logs_scroll_offset = last,
        _ => {}
    }
}

/// Scrolls the log view by `delta` lines; negative is up.
pub fn scroll(app: &mut App, delta: i32) {
    let last = app.log_buffer.len().saturating_sub(1);
    let steps = delta.unsigned_abs() as usize * layout::SCROLL_WHEEL_STEPS;
    app.logs_scroll_offset = if delta < 0 {
        app.logs_scroll_offset.saturating_sub(steps)
    } else {
        (app.logs_scroll_offset + steps).min(last)
    };
}
