pub use cinestream_gemini as cg;
pub use cinestream_state;

pub mod catalogue;
pub mod categories;
pub mod enrichment;
pub mod form;
pub mod navigator;
pub mod overlay;
pub mod playback;
pub mod store;

mod logic;
pub use logic::{Logic, LogicArgs};

mod tokio_thread;

pub use catalogue::{Catalogue, CatalogueError};
pub use form::{EditForm, FormField, FormOutcome};
pub use navigator::{
    CatalogueChange, CatalogueView, Effect, FocusState, FocusTarget, Input, Region, Transition,
};
pub use overlay::{BackTarget, Overlay};
pub use playback::{PlaybackSource, PlayerView};
