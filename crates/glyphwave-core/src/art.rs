//! Text-art blocks and the styles that group them.

use std::fmt;

/// Glyph used for padding and for positions missing from a block.
pub const BLANK: char = ' ';

/// A rectangular grid of glyphs.
///
/// Ragged input lines are padded with [`BLANK`] up to the longest line, so every row
/// has exactly [`ArtBlock::width`] glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtBlock {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl ArtBlock {
    /// Build a block from individual lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<char>> = lines
            .into_iter()
            .map(|line| line.as_ref().trim_end_matches('\r').chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, BLANK);
        }
        Self { rows, width }
    }

    /// Build a block from newline separated text.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Number of glyphs per row (length of the longest input line).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the block holds no glyphs at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows.is_empty()
    }

    /// Glyph at `(row, col)`, or [`BLANK`] outside the block.
    pub fn glyph(&self, row: usize, col: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(BLANK)
    }

    /// Iterate over the padded rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for ArtBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// A named, ordered family of art blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub name: String,
    pub blocks: Vec<ArtBlock>,
}

impl Style {
    pub fn new(name: impl Into<String>, blocks: Vec<ArtBlock>) -> Self {
        Self {
            name: name.into(),
            blocks,
        }
    }
}

/// Every style available to an engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSet {
    styles: Vec<Style>,
}

impl StyleSet {
    pub fn new(styles: Vec<Style>) -> Self {
        Self { styles }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Look up a style by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Style> {
        self.styles
            .iter()
            .find(|style| style.name.eq_ignore_ascii_case(name))
    }

    /// Pick one style from a random seed.
    pub fn choose(&self, seed: u64) -> Option<&Style> {
        if self.styles.is_empty() {
            return None;
        }
        let idx = (seed % self.styles.len() as u64) as usize;
        self.styles.get(idx)
    }
}
