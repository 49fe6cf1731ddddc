use cinestream_core::Region;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::App;

use super::{DIM, TEXT, border_color, layout, meta_line, poster_lines, truncate};

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let focus = app.logic.focus();
    let focused = focus.region() == Region::Shelf;
    let filtered = app.logic.filtered();

    let title = format!(" {} ({}) ", focus.active_category(), filtered.len());
    let block = Block::bordered()
        .title(Span::styled(title, Style::default().fg(TEXT)))
        .border_style(Style::default().fg(border_color(focused)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.shelf_visible_cards = layout::cards_per_row(inner.width);
    app.shelf_scroll = app
        .shelf_scroll
        .min(filtered.len().saturating_sub(app.shelf_visible_cards));

    if filtered.is_empty() {
        frame.render_widget(
            Paragraph::new("No titles").style(Style::default().fg(DIM)),
            layout::inset(inner),
        );
        return;
    }

    for (slot, (index, entry)) in filtered
        .iter()
        .enumerate()
        .skip(app.shelf_scroll)
        .take(app.shelf_visible_cards)
        .enumerate()
    {
        let card = layout::card_rect(inner, slot);
        if card.width < 3 {
            break;
        }
        let is_focused = focused && focus.shelf_index() == index;

        let card_block =
            Block::bordered().border_style(Style::default().fg(border_color(is_focused)));
        let card_inner = card_block.inner(card);
        frame.render_widget(card_block, card);

        let text_width = card_inner.width as usize;
        let mut lines = poster_lines(
            &entry.title,
            card_inner.width,
            layout::CARD_POSTER_ROWS.min(card_inner.height),
        );
        let mut title_style = Style::default().fg(TEXT);
        if is_focused {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            truncate(&entry.title, text_width),
            title_style,
        )));
        lines.push(Line::from(Span::styled(
            truncate(&meta_line(entry), text_width),
            Style::default().fg(DIM),
        )));
        frame.render_widget(Paragraph::new(lines), card_inner);
    }
}
