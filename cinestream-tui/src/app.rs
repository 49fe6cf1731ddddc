use cinestream_core::{self as cc, Effect, cinestream_state::EntryId, playback};

use crate::{config::Config, log_buffer::LogBuffer, ui::layout};

/// A yes/no question blocking all other input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    Delete { id: EntryId, title: String },
    Quit,
}

pub struct App {
    pub logic: cc::Logic,
    pub config: Config,
    pub log_buffer: LogBuffer,

    pub confirm: Option<Confirm>,
    pub logs_visible: bool,
    pub logs_scroll_offset: usize,
    pub should_quit: bool,
    pub needs_redraw: bool,

    // Scroll positions, and how many items fit; the latter are refreshed on every draw.
    pub sidebar_scroll: usize,
    pub sidebar_visible_rows: usize,
    pub shelf_scroll: usize,
    pub shelf_visible_cards: usize,
}

impl App {
    pub fn new(config: Config, logic: cc::Logic, log_buffer: LogBuffer) -> Self {
        Self {
            logic,
            config,
            log_buffer,

            confirm: None,
            logs_visible: false,
            logs_scroll_offset: 0,
            should_quit: false,
            needs_redraw: true,

            sidebar_scroll: 0,
            sidebar_visible_rows: 1,
            shelf_scroll: 0,
            shelf_visible_cards: 1,
        }
    }

    pub fn tick(&mut self) {
        self.logic.update();
        self.needs_redraw = true;
    }

    pub fn handle_input(&mut self, input: cc::Input) {
        let effects = self.logic.handle_input(input);
        self.apply_effects(effects);
    }

    pub fn activate_at(&mut self, target: cc::FocusTarget) {
        let effects = self.logic.activate_at(target);
        self.apply_effects(effects);
    }

    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScrollToTop => self.shelf_scroll = 0,
                Effect::RevealShelfItem(index) => {
                    self.shelf_scroll =
                        layout::reveal(self.shelf_scroll, index, self.shelf_visible_cards);
                }
                Effect::RevealSidebarItem(index) => {
                    self.sidebar_scroll =
                        layout::reveal(self.sidebar_scroll, index, self.sidebar_visible_rows);
                }
                Effect::LaunchExternal(url) => {
                    if let Err(e) = playback::launch_external(&url) {
                        tracing::error!("failed to open {url}: {e}");
                    }
                }
            }
        }
    }

    /// Asks before deleting the focused entry.
    pub fn request_delete(&mut self) {
        if let Some(entry) = self.logic.current_entry() {
            self.confirm = Some(Confirm::Delete {
                id: entry.id.clone(),
                title: entry.title.clone(),
            });
        }
    }

    pub fn confirm_accepted(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::Delete { id, .. } => {
                let effects = self.logic.delete(&id);
                self.apply_effects(effects);
            }
            Confirm::Quit => self.should_quit = true,
        }
    }

    pub fn toggle_logs(&mut self) {
        self.logs_visible = !self.logs_visible;
        if self.logs_visible {
            self.logs_scroll_offset = self.log_buffer.len().saturating_sub(1);
        }
    }
}
