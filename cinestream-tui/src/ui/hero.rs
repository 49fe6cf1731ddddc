use cinestream_core::Region;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::app::App;

use super::{ACCENT, DIM, TEXT, border_color, layout, meta_line, poster_lines, string_to_color};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.logic.focus().region() == Region::Hero;
    let block = Block::bordered().border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entry) = app.logic.current_entry() else {
        let empty = if app.logic.catalogue().is_empty() {
            "Your catalogue is empty. Press a to add a title."
        } else {
            "Nothing in this category."
        };
        frame.render_widget(
            Paragraph::new(empty).style(Style::default().fg(DIM)),
            layout::inset(inner),
        );
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(layout::HERO_POSTER_WIDTH.min(inner.width / 2)),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    let poster = columns[0];
    frame.render_widget(
        Paragraph::new(poster_lines(&entry.title, poster.width, poster.height)),
        poster,
    );

    let mut lines = vec![
        Line::from(Span::styled(
            entry.title.clone(),
            Style::default()
                .fg(string_to_color(&entry.title))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(meta_line(entry), Style::default().fg(DIM))),
        Line::default(),
    ];
    let description = entry.description_or_empty();
    if !description.is_empty() {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(TEXT),
        )));
        lines.push(Line::default());
    }

    let play_style = if focused {
        Style::default()
            .fg(TEXT)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };
    lines.push(Line::from(Span::styled(" ▶ Play ", play_style)));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        columns[2],
    );
}
