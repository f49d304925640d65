//! Text-art styles for glyphwave.
//!
//! The blocks are pre-rendered static data. [`builtin_styles`] returns the set that
//! ships with the binary, [`load_style_set`] reads a replacement set from JSON.

mod builtin;
mod loader;

pub use builtin::builtin_styles;
pub use loader::{ArtError, load_style_set, parse_style_set};
