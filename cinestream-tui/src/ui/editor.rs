use cinestream_core::FormField;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

use crate::app::App;

use super::{ACCENT, BACKGROUND, DIM, FOCUSED, TEXT, layout};

/// The last `width` display columns of `text`, so the end being typed stays visible.
fn tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

pub fn draw(frame: &mut Frame, app: &App, size: Rect) {
    let Some(form) = app.logic.form() else {
        return;
    };

    let fields = form.fields();
    let (buttons, rows): (Vec<FormField>, Vec<FormField>) =
        fields.into_iter().partition(|f| f.is_button());
    // Rows, a spacer, the buttons, and the status line.
    let area = layout::editor_rect(size, rows.len() as u16 + 3);

    let title = if form.editing().is_some() {
        " Edit Title "
    } else {
        " Add Title "
    };
    let block = Block::bordered()
        .title(Span::styled(
            title,
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(BACKGROUND));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let label_width = layout::EDITOR_LABEL_WIDTH;
    let value_width = (inner.width as usize).saturating_sub(label_width + 1);
    let focused_field = form.focused();
    let mut cursor = None;

    let mut lines: Vec<Line> = Vec::with_capacity(rows.len() + 3);
    for (row, field) in rows.iter().enumerate() {
        let is_focused = *field == focused_field;
        let label_style = if is_focused {
            Style::default().fg(FOCUSED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        let label = Span::styled(format!("{:>label_width$} ", field.label()), label_style);

        let value = match form.value(*field) {
            Some(text) => {
                let shown = tail(text, value_width.saturating_sub(1));
                if is_focused {
                    cursor = Some(Position::new(
                        inner.x + (label_width + 1 + shown.width()) as u16,
                        inner.y + row as u16,
                    ));
                }
                Span::styled(shown.to_string(), Style::default().fg(TEXT))
            }
            None => {
                let picker = format!("‹ {} ›", form.category_label());
                let style = if is_focused {
                    Style::default().fg(TEXT).add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(TEXT)
                };
                Span::styled(picker, style)
            }
        };
        lines.push(Line::from(vec![label, value]));
    }

    lines.push(Line::default());
    let mut button_spans = vec![Span::raw(" ".repeat(label_width + 1))];
    for button in &buttons {
        let text = match button {
            FormField::AutoFill if form.is_busy() => "Auto-filling…",
            other => other.label(),
        };
        let enabled = *button != FormField::AutoFill || app.logic.has_auto_fill();
        let mut style = Style::default().fg(if enabled { TEXT } else { DIM });
        if *button == focused_field {
            style = style.bg(ACCENT).add_modifier(Modifier::BOLD);
        }
        button_spans.push(Span::styled(format!(" {text} "), style));
        button_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(button_spans));

    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            format!("{:label_width$} {error}", ""),
            Style::default().fg(ACCENT),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(position) = cursor
        && app.confirm.is_none()
    {
        frame.set_cursor_position(position);
    }
}
