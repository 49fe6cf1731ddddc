//! Modal overlays (the edit form and the player) and where focus goes when they close.
use cinestream_state::Entry;
use serde::{Deserialize, Serialize};

use crate::navigator::Region;

/// A modal overlay and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// The edit form. `editing` is `None` when creating a new entry.
    Edit { editing: Option<Entry> },
    /// The player, showing `entry`.
    Player { entry: Entry },
}
impl Overlay {
    pub fn region(&self) -> Region {
        match self {
            Overlay::Edit { .. } => Region::EditOverlay,
            Overlay::Player { .. } => Region::PlayerOverlay,
        }
    }
}

/// Where focus returns to when an overlay is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackTarget {
    /// The player returns to the hero, the edit form to the shelf.
    #[default]
    Contextual,
    /// Whichever region was focused when the overlay was opened.
    Previous,
    /// Always the sidebar.
    Sidebar,
}
impl BackTarget {
    pub fn revert_region(self, overlay: &Overlay, opened_from: Region) -> Region {
        match self {
            BackTarget::Contextual => match overlay {
                Overlay::Player { .. } => Region::Hero,
                Overlay::Edit { .. } => Region::Shelf,
            },
            BackTarget::Previous => opened_from,
            BackTarget::Sidebar => Region::Sidebar,
        }
    }
}

/// Tracks the (at most one) open overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayController {
    open: Option<OpenOverlay>,
    back_target: BackTarget,
}
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenOverlay {
    overlay: Overlay,
    opened_from: Region,
}
impl OverlayController {
    pub fn new(back_target: BackTarget) -> Self {
        Self {
            open: None,
            back_target,
        }
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.open.as_ref().map(|o| &o.overlay)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn back_target(&self) -> BackTarget {
        self.back_target
    }

    /// Opens `overlay`, remembering `from` for [`BackTarget::Previous`].
    ///
    /// Returns `false` and does nothing if an overlay is already open.
    pub fn open(&mut self, overlay: Overlay, from: Region) -> bool {
        if let Some(open) = &self.open {
            tracing::debug!(
                "ignoring {:?} overlay, {:?} is already open",
                overlay.region(),
                open.overlay.region()
            );
            return false;
        }
        self.open = Some(OpenOverlay {
            overlay,
            opened_from: from,
        });
        true
    }

    /// Closes the open overlay, returning it and the region focus should revert to.
    pub fn close(&mut self) -> Option<(Overlay, Region)> {
        let OpenOverlay {
            overlay,
            opened_from,
        } = self.open.take()?;
        let region = self.back_target.revert_region(&overlay, opened_from);
        Some((overlay, region))
    }
}

#[cfg(test)]
mod tests {
    use cinestream_state::seed_entries;

    use super::*;

    fn player() -> Overlay {
        Overlay::Player {
            entry: seed_entries().remove(0),
        }
    }

    #[test]
    fn second_open_is_ignored() {
        let mut overlays = OverlayController::new(BackTarget::Contextual);
        assert!(overlays.open(Overlay::Edit { editing: None }, Region::Sidebar));
        assert!(!overlays.open(player(), Region::Shelf));
        assert_eq!(overlays.current(), Some(&Overlay::Edit { editing: None }));
    }

    #[test]
    fn contextual_revert() {
        let mut overlays = OverlayController::new(BackTarget::Contextual);
        overlays.open(player(), Region::Shelf);
        assert_eq!(overlays.close(), Some((player(), Region::Hero)));

        overlays.open(Overlay::Edit { editing: None }, Region::Sidebar);
        assert_eq!(
            overlays.close().map(|(_, region)| region),
            Some(Region::Shelf)
        );
        assert_eq!(overlays.close(), None);
    }

    #[test]
    fn previous_and_sidebar_revert() {
        let mut overlays = OverlayController::new(BackTarget::Previous);
        overlays.open(player(), Region::Shelf);
        assert_eq!(
            overlays.close().map(|(_, region)| region),
            Some(Region::Shelf)
        );

        let mut overlays = OverlayController::new(BackTarget::Sidebar);
        overlays.open(player(), Region::Hero);
        assert_eq!(
            overlays.close().map(|(_, region)| region),
            Some(Region::Sidebar)
        );
    }
}
