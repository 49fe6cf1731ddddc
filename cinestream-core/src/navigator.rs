//! The focus state machine.
//!
//! [`FocusState`] records which region of the screen holds focus and where within it.
//! [`transition`] is a pure function from a state, an input and the current shape of the
//! catalogue to the next state, plus the effects the shell should carry out (scrolling,
//! launching playback). The shell never mutates focus directly; clicks are turned into
//! [`FocusState::focus_target`] followed by [`Input::Activate`].
use cinestream_state::{ALL_CATEGORY, Entry};

use crate::overlay::{BackTarget, Overlay, OverlayController};

/// Where focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Sidebar,
    Hero,
    Shelf,
    EditOverlay,
    PlayerOverlay,
}

/// The entire control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    Activate,
    Back,
}

/// Work the shell should do after a transition. Not part of the focus state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Scroll the main view back to the top.
    ScrollToTop,
    /// Bring the shelf card at this index into view.
    RevealShelfItem(usize),
    /// Bring the sidebar row at this index into view.
    RevealSidebarItem(usize),
    /// Open this URL in an external player.
    LaunchExternal(String),
}

/// A place the pointer can send focus to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Sidebar(usize),
    Hero,
    Shelf(usize),
}

/// A kind of catalogue mutation, for [`FocusState::after_catalogue_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueChange {
    Created,
    Updated,
    Deleted,
}

/// The shape of the catalogue as the navigator sees it.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueView<'a> {
    /// The category index, `All` first.
    pub categories: &'a [String],
    /// The entries in the active category.
    pub filtered: &'a [Entry],
}

/// The result of [`transition`]: the next state and what the shell should do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FocusState,
    pub effects: Vec<Effect>,
}

/// Where focus sits, along with the active category filter and any open overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    region: Region,
    sidebar_index: usize,
    shelf_index: usize,
    active_category: String,
    overlays: OverlayController,
}
impl FocusState {
    pub fn new(back_target: BackTarget) -> Self {
        Self {
            region: Region::Shelf,
            sidebar_index: 0,
            shelf_index: 0,
            active_category: ALL_CATEGORY.to_string(),
            overlays: OverlayController::new(back_target),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Index into the category index, or one past its end for the "Add" slot.
    pub fn sidebar_index(&self) -> usize {
        self.sidebar_index
    }

    pub fn shelf_index(&self) -> usize {
        self.shelf_index
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlays.current()
    }

    pub fn back_target(&self) -> BackTarget {
        self.overlays.back_target()
    }

    /// The entry the hero and the player act on, if the filtered view isn't empty.
    pub fn current_entry<'a>(&self, view: &CatalogueView<'a>) -> Option<&'a Entry> {
        if view.filtered.is_empty() {
            return None;
        }
        view.filtered.get(self.shelf_index % view.filtered.len())
    }

    /// Opens `overlay`, capturing the current region. Ignored if an overlay is already open.
    pub fn open_overlay(&mut self, overlay: Overlay) -> bool {
        let region = overlay.region();
        if !self.overlays.open(overlay, self.region) {
            return false;
        }
        self.region = region;
        true
    }

    /// Closes the open overlay and moves focus to the region chosen by the back target.
    pub fn close_overlay(&mut self) -> Option<Overlay> {
        let (overlay, region) = self.overlays.close()?;
        self.region = region;
        Some(overlay)
    }

    /// Moves focus to a pointer target, clamping the index. Ignored while an overlay is open.
    pub fn focus_target(&mut self, target: FocusTarget, view: &CatalogueView) {
        if self.overlays.is_open() {
            return;
        }
        match target {
            FocusTarget::Sidebar(index) => {
                self.region = Region::Sidebar;
                self.sidebar_index = index.min(view.categories.len());
            }
            FocusTarget::Hero => self.region = Region::Hero,
            FocusTarget::Shelf(index) => {
                self.region = Region::Shelf;
                self.shelf_index = index.min(view.filtered.len().saturating_sub(1));
            }
        }
    }

    /// Brings the category filter back in line with a recomputed category index.
    ///
    /// Returns `true` if the active category no longer exists and was reset to `All`.
    pub fn reconcile(&mut self, categories: &[String]) -> bool {
        self.sidebar_index = self.sidebar_index.min(categories.len());
        if categories.iter().any(|c| c == &self.active_category) {
            return false;
        }
        tracing::debug!(
            "category `{}` disappeared, resetting filter",
            self.active_category
        );
        self.active_category = ALL_CATEGORY.to_string();
        self.shelf_index = 0;
        true
    }

    /// Adjusts the shelf position after the catalogue changed underneath it.
    ///
    /// Returns the effect that brings the adjusted shelf position into view.
    pub fn after_catalogue_change(
        &mut self,
        change: CatalogueChange,
        filtered_len: usize,
    ) -> Effect {
        match change {
            CatalogueChange::Created | CatalogueChange::Deleted => self.shelf_index = 0,
            CatalogueChange::Updated => {
                self.shelf_index = self.shelf_index.min(filtered_len.saturating_sub(1));
            }
        }
        Effect::RevealShelfItem(self.shelf_index)
    }

    fn enter_sidebar(&mut self, effects: &mut Vec<Effect>) {
        self.region = Region::Sidebar;
        effects.push(Effect::RevealSidebarItem(self.sidebar_index));
    }

    fn apply(&mut self, input: Input, view: &CatalogueView, effects: &mut Vec<Effect>) {
        if self.overlays.is_open() {
            match input {
                Input::Back => {
                    self.close_overlay();
                }
                Input::Activate => {
                    if let Some(Overlay::Player { entry }) = self.overlays.current() {
                        effects.push(Effect::LaunchExternal(entry.playback_url.clone()));
                    }
                }
                _ => {}
            }
            return;
        }

        let category_count = view.categories.len();
        let filtered_count = view.filtered.len();
        match (self.region, input) {
            (region, Input::Back) if region != Region::Sidebar => self.enter_sidebar(effects),

            (Region::Sidebar, Input::Right) => self.region = Region::Hero,
            (Region::Sidebar, Input::Down) => {
                self.sidebar_index = (self.sidebar_index + 1).min(category_count);
                effects.push(Effect::RevealSidebarItem(self.sidebar_index));
            }
            (Region::Sidebar, Input::Up) => {
                self.sidebar_index = self.sidebar_index.saturating_sub(1);
                effects.push(Effect::RevealSidebarItem(self.sidebar_index));
            }
            (Region::Sidebar, Input::Activate) => match view.categories.get(self.sidebar_index) {
                Some(category) => {
                    self.active_category = category.clone();
                    self.shelf_index = 0;
                    self.region = if category == ALL_CATEGORY {
                        Region::Shelf
                    } else {
                        Region::Hero
                    };
                    effects.push(Effect::ScrollToTop);
                }
                None => {
                    self.open_overlay(Overlay::Edit { editing: None });
                }
            },

            (Region::Hero, Input::Left) => self.enter_sidebar(effects),
            (Region::Hero, Input::Down) => {
                self.region = Region::Shelf;
                self.shelf_index = 0;
                effects.push(Effect::RevealShelfItem(0));
            }

            (Region::Hero | Region::Shelf, Input::Activate) => {
                if let Some(entry) = self.current_entry(view) {
                    self.open_overlay(Overlay::Player {
                        entry: entry.clone(),
                    });
                }
            }

            (Region::Shelf, Input::Left) if self.shelf_index == 0 => self.enter_sidebar(effects),
            (Region::Shelf, Input::Left) => {
                self.shelf_index -= 1;
                effects.push(Effect::RevealShelfItem(self.shelf_index));
            }
            (Region::Shelf, Input::Right) if self.shelf_index + 1 < filtered_count => {
                self.shelf_index += 1;
                effects.push(Effect::RevealShelfItem(self.shelf_index));
            }
            (Region::Shelf, Input::Up) => {
                self.region = Region::Hero;
                effects.push(Effect::ScrollToTop);
            }

            _ => {}
        }
    }
}

/// Computes the focus state that follows `input`.
pub fn transition(state: &FocusState, input: Input, view: &CatalogueView) -> Transition {
    let mut state = state.clone();
    let mut effects = vec![];
    state.apply(input, view, &mut effects);
    Transition { state, effects }
}
