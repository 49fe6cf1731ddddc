use cinestream_core::PlaybackSource;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::app::App;

use super::{ACCENT, DIM, TEXT, meta_line, poster_lines};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(player) = app.logic.player() else {
        return;
    };
    let entry = &player.entry;

    let block = Block::bordered()
        .title(Span::styled(
            format!(" ▶ {} ", entry.title),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(inner);

    // Stands in for the video surface.
    let screen = rows[0];
    frame.render_widget(
        Paragraph::new(poster_lines(&entry.title, screen.width, screen.height)),
        screen,
    );

    let status = match &player.source {
        PlaybackSource::Embed(url) => Line::from(vec![
            Span::styled("Now playing  ", Style::default().fg(ACCENT)),
            Span::styled(url.clone(), Style::default().fg(DIM)),
        ]),
        PlaybackSource::Unavailable => Line::from(Span::styled(
            "Loading content…",
            Style::default().fg(DIM).add_modifier(Modifier::ITALIC),
        )),
    };

    let mut lines = vec![
        status,
        Line::from(Span::styled(meta_line(entry), Style::default().fg(DIM))),
    ];
    let description = entry.description_or_empty();
    if !description.is_empty() {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(TEXT),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        rows[1],
    );
}
