//! Loading style sets from JSON.
//!
//! ```json
//! { "styles": [
//!     { "name": "mini", "blocks": ["AB\nCD", ["XY", "ZW"]] }
//! ] }
//! ```
//!
//! A block is either one newline separated string or a list of lines.

use std::path::{Path, PathBuf};

use glyphwave_core::{ArtBlock, Style, StyleSet};
use serde::Deserialize;
use thiserror::Error;

/// Failure to read a style set file.
#[derive(Debug, Error)]
pub enum ArtError {
    #[error("failed to read style set {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid style set: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct StyleSetFile {
    #[serde(default)]
    styles: Vec<StyleEntry>,
}

#[derive(Debug, Deserialize)]
struct StyleEntry {
    name: String,
    #[serde(default)]
    blocks: Vec<BlockEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockEntry {
    Text(String),
    Lines(Vec<String>),
}

impl From<BlockEntry> for ArtBlock {
    fn from(entry: BlockEntry) -> Self {
        match entry {
            BlockEntry::Text(text) => ArtBlock::parse(&text),
            BlockEntry::Lines(lines) => ArtBlock::from_lines(lines),
        }
    }
}

/// Parse a style set from JSON text.
pub fn parse_style_set(json: &str) -> Result<StyleSet, ArtError> {
    let file: StyleSetFile = serde_json::from_str(json)?;
    let styles = file
        .styles
        .into_iter()
        .map(|entry| {
            Style::new(
                entry.name,
                entry.blocks.into_iter().map(ArtBlock::from).collect(),
            )
        })
        .collect();
    Ok(StyleSet::new(styles))
}

/// Read and parse a style set file.
pub fn load_style_set(path: &Path) -> Result<StyleSet, ArtError> {
    let json = std::fs::read_to_string(path).map_err(|source| ArtError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_style_set(&json)
}
