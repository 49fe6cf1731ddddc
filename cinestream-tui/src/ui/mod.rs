pub(crate) mod editor;
pub(crate) mod hero;
pub(crate) mod layout;
pub(crate) mod logs;
pub(crate) mod player;
pub(crate) mod shelf;
pub(crate) mod sidebar;

use std::hash::{Hash as _, Hasher as _};

use cinestream_core::Region;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use smol_str::ToSmolStr as _;
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

use crate::{
    app::{App, Confirm},
    keys,
};

// ── Palette ─────────────────────────────────────────────────────────────────

pub const BACKGROUND: Color = Color::Rgb(14, 14, 18);
pub const TEXT: Color = Color::Rgb(229, 229, 229);
pub const DIM: Color = Color::Rgb(128, 128, 140);
pub const ACCENT: Color = Color::Rgb(229, 9, 20);
pub const FOCUSED: Color = Color::White;
pub const UNFOCUSED_BORDER: Color = Color::Rgb(60, 60, 70);

pub fn border_color(focused: bool) -> Color {
    if focused { FOCUSED } else { UNFOCUSED_BORDER }
}

fn hsv_to_color([h, s, v]: [f32; 3]) -> Color {
    let h = (h.fract() + 1.0).fract();
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let f = h * 6.0 - (h * 6.0).floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let [r, g, b] = match (h * 6.0).floor() as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    };
    let to_u8 = |c: f32| (c * 255.0).round() as u8;
    Color::Rgb(to_u8(r), to_u8(g), to_u8(b))
}

fn string_hash(s: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

fn string_hue(s: &str) -> f32 {
    const DISTINCT_COLOURS: u64 = 36_000;
    (string_hash(s) % DISTINCT_COLOURS) as f32 / DISTINCT_COLOURS as f32
}

/// Hashes a string to produce a pleasing colour.
pub fn string_to_color(s: &str) -> Color {
    hsv_to_color([string_hue(s), 0.6, 0.85])
}

// ── Posters ─────────────────────────────────────────────────────────────────

const POSTER_GRID: usize = 4;

/// A deterministic 4x4 colour grid standing in for a title's poster: a diagonal
/// gradient around the title's hue.
fn poster_grid(title: &str) -> [[Color; POSTER_GRID]; POSTER_GRID] {
    let hue = string_hue(title);
    let hash = string_hash(title);
    let mut grid = [[Color::Reset; POSTER_GRID]; POSTER_GRID];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let jitter = ((hash >> ((row * POSTER_GRID + col) * 2)) & 0b11) as f32 * 0.02;
            let step = (row + col) as f32 / (2 * (POSTER_GRID - 1)) as f32;
            *cell = hsv_to_color([hue + step * 0.12, 0.55 + jitter, 0.9 - step * 0.55]);
        }
    }
    grid
}

/// Half-block poster art for `title`, `width` columns by `rows` terminal rows,
/// stretched from the colour grid via nearest-neighbour mapping.
pub fn poster_lines(title: &str, width: u16, rows: u16) -> Vec<Line<'static>> {
    let grid = poster_grid(title);
    let pixel_rows = rows as usize * 2;
    let cell = |pixel_row: usize, col: u16| {
        grid[pixel_row * POSTER_GRID / pixel_rows.max(1)]
            [col as usize * POSTER_GRID / width.max(1) as usize]
    };
    (0..rows as usize)
        .map(|row| {
            let spans = (0..width)
                .map(|col| {
                    Span::styled(
                        "\u{2580}",
                        Style::default()
                            .fg(cell(row * 2, col))
                            .bg(cell(row * 2 + 1, col)),
                    )
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

// ── Text ────────────────────────────────────────────────────────────────────

/// Cuts `text` to at most `width` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

/// `year • rating • category`, skipping what's missing.
pub fn meta_line(entry: &cinestream_core::cinestream_state::Entry) -> String {
    [
        entry.year.as_deref(),
        entry.rating.as_deref(),
        Some(entry.category.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" • ")
}

// ── Frame ───────────────────────────────────────────────────────────────────

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), size);

    let main = layout::split_main(size);

    if app.logs_visible {
        sidebar::draw(frame, app, main.sidebar);
        logs::draw(frame, app, main.content);
    } else if app.logic.player().is_some() {
        let area = Rect::new(
            size.x,
            size.y,
            size.width,
            main.help_bar.y.saturating_sub(size.y),
        );
        player::draw(frame, app, area);
    } else {
        sidebar::draw(frame, app, main.sidebar);
        let content = layout::split_content(main.content);
        hero::draw(frame, app, content.hero);
        shelf::draw(frame, app, content.shelf);
    }

    draw_help_bar(frame, app, main.help_bar);

    if app.logic.form().is_some() {
        editor::draw(frame, app, size);
    }

    if let Some(confirm) = &app.confirm {
        draw_confirm(frame, confirm, size);
    }
}

fn draw_confirm(frame: &mut Frame, confirm: &Confirm, size: Rect) {
    let yes = keys::KEY_CONFIRM_YES.to_smolstr();
    let no = keys::KEY_CONFIRM_NO.to_smolstr();
    let question = match confirm {
        Confirm::Delete { title, .. } => format!("Delete \"{}\"?", truncate(title, 40)),
        Confirm::Quit => "Quit?".to_string(),
    };
    let prompt = format!("{question} {yes}/{no}");
    // Border (2) + padding (2).
    let popup_area = layout::centered_rect(size, prompt.width() as u16 + 4, 3);

    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(format!(" {prompt}"))
        .block(Block::bordered().border_style(Style::default().fg(ACCENT)))
        .style(Style::default().fg(TEXT).bg(BACKGROUND));
    frame.render_widget(popup, popup_area);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.logic.focus();
    let (help_actions, select): (&[keys::Action], &str) = if app.confirm.is_some() {
        (&[], "")
    } else if app.logs_visible {
        (keys::LOGS_HELP, "")
    } else if app.logic.form().is_some() {
        (keys::FORM_HELP, "choose")
    } else if app.logic.player().is_some() {
        (keys::PLAYER_HELP, "open externally")
    } else {
        let select = match focus.region() {
            Region::Sidebar if focus.sidebar_index() >= app.logic.categories().len() => "add",
            Region::Sidebar => "filter",
            _ => "play",
        };
        (keys::BROWSE_HELP, select)
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for action in help_actions {
        if let Some((key, label)) = action.help_label(select) {
            spans.push(Span::styled(String::from(key), Style::default().fg(ACCENT)));
            spans.push(Span::styled(
                format!(":{label} "),
                Style::default().fg(DIM),
            ));
        }
    }

    if let Some(notice) = app.logic.notice() {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let room = (area.width as usize).saturating_sub(used + 1);
        let notice = truncate(notice, room);
        let pad = room.saturating_sub(notice.width());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(
            notice,
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ));
    }

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(BACKGROUND));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate("Heat", 10), "Heat");
        assert_eq!(truncate("Interstellar", 6), "Inter…");
        assert_eq!(truncate("千と千尋の神隠し", 5), "千と…");
    }

    #[test]
    fn posters_are_deterministic_per_title() {
        assert_eq!(poster_grid("Inception"), poster_grid("Inception"));
        assert_ne!(poster_grid("Inception"), poster_grid("Interstellar"));
        let lines = poster_lines("Inception", 7, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.spans.len() == 7));
    }
}
