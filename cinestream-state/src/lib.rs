//! Representations of cinestream's catalogue: the entries it stores, the drafts
//! used to create and edit them, and the categories they're filed under.
//!
//! Separated out so that the catalogue format can be shared between the core
//! logic and any tooling that wants to read a stored catalogue.
#![deny(missing_docs)]

mod entry;
pub use entry::{Entry, EntryId};

mod draft;
pub use draft::{CategoryChoice, EntryDraft, ValidationError, placeholder_poster_url};

mod category;
pub use category::{ALL_CATEGORY, DEFAULT_CATEGORIES, UNCATEGORIZED};

mod seed;
pub use seed::seed_entries;
