//! Portal Studio: design the layout, styling and navigation of a video portal.
//!
//! The document model lives in [`portal`]; [`store`] owns the single draft and
//! applies every edit as an immutable patch. [`editing`] turns user intent into
//! patches, [`preview`] renders the draft, and [`tui`] is the terminal editor
//! built on top of all of it.

pub mod cli;
pub mod config;
pub mod editing;
pub mod portal;
pub mod preview;
pub mod sinks;
pub mod store;
pub mod tui;
