use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ── Main layout ─────────────────────────────────────────────────────────────

pub const SIDEBAR_WIDTH: u16 = 26;
pub const CONTENT_MIN_WIDTH: u16 = 30;
pub const HELP_BAR_HEIGHT: u16 = 1;

pub struct MainLayout {
    pub sidebar: Rect,
    pub content: Rect,
    pub help_bar: Rect,
}

pub fn split_main(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(HELP_BAR_HEIGHT)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(CONTENT_MIN_WIDTH),
        ])
        .split(rows[0]);
    MainLayout {
        sidebar: columns[0],
        content: columns[1],
        help_bar: rows[1],
    }
}

// ── Hero above, shelf below ─────────────────────────────────────────────────

pub const HERO_MIN_HEIGHT: u16 = 6;
pub const HERO_POSTER_WIDTH: u16 = 32;

pub struct ContentLayout {
    pub hero: Rect,
    pub shelf: Rect,
}

pub fn split_content(area: Rect) -> ContentLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(HERO_MIN_HEIGHT),
            Constraint::Length(SHELF_HEIGHT),
        ])
        .split(area);
    ContentLayout {
        hero: chunks[0],
        shelf: chunks[1],
    }
}

// ── Sidebar ─────────────────────────────────────────────────────────────────

/// Brand line plus a blank spacer.
pub const BRAND_HEIGHT: u16 = 2;

/// The part of the sidebar (inside its border) that holds category rows.
pub fn sidebar_rows(sidebar: Rect) -> Rect {
    let inner = inset(sidebar);
    Rect::new(
        inner.x,
        inner.y + BRAND_HEIGHT.min(inner.height),
        inner.width,
        inner.height.saturating_sub(BRAND_HEIGHT),
    )
}

/// The sidebar row index under `(x, y)`, accounting for scroll.
pub fn sidebar_hit(sidebar: Rect, scroll: usize, x: u16, y: u16) -> Option<usize> {
    let rows = sidebar_rows(sidebar);
    contains(rows, x, y).then(|| scroll + (y - rows.y) as usize)
}

// ── Shelf cards ─────────────────────────────────────────────────────────────

pub const CARD_WIDTH: u16 = 22;
pub const CARD_GAP: u16 = 1;
pub const CARD_POSTER_ROWS: u16 = 5;
/// Poster, title line, meta line, and the card border.
pub const CARD_HEIGHT: u16 = CARD_POSTER_ROWS + 2 + 2;
pub const SHELF_HEIGHT: u16 = CARD_HEIGHT + 2;

/// How many whole cards fit side by side in `width` columns (at least one).
pub fn cards_per_row(width: u16) -> usize {
    ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1) as usize
}

/// The rectangle of the `slot`th visible card within the shelf's inner area.
pub fn card_rect(shelf_inner: Rect, slot: usize) -> Rect {
    let x = shelf_inner.x + slot as u16 * (CARD_WIDTH + CARD_GAP);
    let width = CARD_WIDTH.min((shelf_inner.x + shelf_inner.width).saturating_sub(x));
    Rect::new(
        x,
        shelf_inner.y,
        width,
        CARD_HEIGHT.min(shelf_inner.height),
    )
}

/// The shelf item under `(x, y)`, accounting for scroll. Gaps between cards miss.
pub fn shelf_hit(shelf: Rect, scroll: usize, x: u16, y: u16) -> Option<usize> {
    let inner = inset(shelf);
    if !contains(inner, x, y) {
        return None;
    }
    let offset = x - inner.x;
    let slot = offset / (CARD_WIDTH + CARD_GAP);
    (offset % (CARD_WIDTH + CARD_GAP) < CARD_WIDTH).then(|| scroll + slot as usize)
}

// ── Popups ──────────────────────────────────────────────────────────────────

pub const EDITOR_WIDTH_FRACTION: f32 = 0.7;
pub const EDITOR_MIN_WIDTH: u16 = 40;
pub const EDITOR_LABEL_WIDTH: usize = 17;

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn editor_rect(area: Rect, rows: u16) -> Rect {
    let width = ((area.width as f32 * EDITOR_WIDTH_FRACTION) as u16).max(EDITOR_MIN_WIDTH);
    centered_rect(area, width, rows + 2)
}

// ── Scrolling ───────────────────────────────────────────────────────────────

pub const PAGE_SCROLL_SIZE: usize = 20;
pub const SCROLL_WHEEL_STEPS: usize = 3;

/// The smallest change to `offset` that brings `index` into a window of `visible` items.
pub fn reveal(offset: usize, index: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if index < offset {
        index
    } else if index >= offset + visible {
        index + 1 - visible
    } else {
        offset
    }
}

// ── Log view ────────────────────────────────────────────────────────────────

pub const LOG_TARGET_WIDTH: usize = 24;
pub const LOG_TARGET_SUFFIX_LEN: usize = 21;

// ── Helpers ─────────────────────────────────────────────────────────────────

/// `area` without its one-cell border.
pub fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
