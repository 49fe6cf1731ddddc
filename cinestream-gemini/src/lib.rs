//! A barebones client for the Gemini `generateContent` API, used to suggest
//! metadata for catalogue entries.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod request;

mod suggest;
pub use suggest::*;
