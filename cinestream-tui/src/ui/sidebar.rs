use cinestream_core::{Region, cinestream_state::ALL_CATEGORY};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::App;

use super::{ACCENT, TEXT, border_color, layout, string_to_color, truncate};

pub const ADD_LABEL: &str = "+ ADD NEW";

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let focus = app.logic.focus();
    let focused = focus.region() == Region::Sidebar && !app.logs_visible;

    let block = Block::bordered().border_style(Style::default().fg(border_color(focused)));
    frame.render_widget(block, area);

    let inner = layout::inset(area);
    let brand = Paragraph::new(Line::from(Span::styled(
        "CINESTREAM",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(
        brand,
        Rect::new(inner.x, inner.y, inner.width, inner.height.min(1)),
    );

    let rows = layout::sidebar_rows(area);
    app.sidebar_visible_rows = (rows.height as usize).max(1);

    let categories = app.logic.categories();
    // One row per category, then the add row.
    let row_count = categories.len() + 1;
    app.sidebar_scroll = app
        .sidebar_scroll
        .min(row_count.saturating_sub(app.sidebar_visible_rows));

    let width = rows.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = (app.sidebar_scroll..row_count)
        .take(app.sidebar_visible_rows)
        .map(|index| {
            let label = categories.get(index).map_or(ADD_LABEL, String::as_str);
            let is_active = categories
                .get(index)
                .is_some_and(|c| c == focus.active_category());
            let is_focused = focused && focus.sidebar_index() == index;

            let marker = if is_active { "▌" } else { " " };
            let color = if index == categories.len() {
                ACCENT
            } else if label == ALL_CATEGORY {
                TEXT
            } else {
                string_to_color(label)
            };
            let mut style = Style::default().fg(color);
            if is_active {
                style = style.add_modifier(Modifier::BOLD);
            }
            if is_focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(format!("{} ", truncate(label, width)), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), rows);
}
