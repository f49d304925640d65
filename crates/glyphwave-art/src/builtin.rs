//! Built-in text-art blocks.

use glyphwave_core::{ArtBlock, Style, StyleSet};

/// Solid block letters (5 lines tall).
pub const BLOCK_HELLO: [&str; 5] = [
    "█  █ ████ █    █     ██ ",
    "█  █ █    █    █    █  █",
    "████ ███  █    █    █  █",
    "█  █ █    █    █    █  █",
    "█  █ ████ ████ ████  ██ ",
];

pub const BLOCK_GLYPH: [&str; 5] = [
    " ███ █    █   █ ███  █  █",
    "█    █     █ █  █  █ █  █",
    "█ ██ █      █   ███  ████",
    "█  █ █      █   █    █  █",
    " ███ ████   █   █    █  █",
];

pub const BLOCK_WAVE: [&str; 5] = [
    "█   █  ██  █   █ ████",
    "█   █ █  █ █   █ █",
    "█ █ █ ████ █   █ ███",
    "██ ██ █  █  █ █  █",
    "█   █ █  █   █   ████",
];

/// Line-drawn letters (5 lines tall).
pub const LINE_HELLO: [&str; 5] = [
    r" _   _ _____ _     _     ___  ",
    r"| | | | ____| |   | |   / _ \ ",
    r"| |_| |  _| | |   | |  | | | |",
    r"|  _  | |___| |___| |__| |_| |",
    r"|_| |_|_____|_____|_____\___/ ",
];

pub const LINE_GLYPH: [&str; 5] = [
    r"  ____ _  __   ______  _   _ ",
    r" / ___| | \ \ / /  _ \| | | |",
    r"| |  _| |  \ V /| |_) | |_| |",
    r"| |_| | |___| | |  __/|  _  |",
    r" \____|_____|_| |_|   |_| |_|",
];

pub const LINE_WAVE: [&str; 5] = [
    r"__        ___    __     _______ ",
    r"\ \      / / \   \ \   / / ____|",
    r" \ \ /\ / / _ \   \ \ / /|  _|  ",
    r"  \ V  V / ___ \   \ V / | |___ ",
    r"   \_/\_/_/   \_\   \_/  |_____|",
];

/// Spaced lowercase letters (one line tall).
pub const SPACED: [&str; 3] = ["h e l l o", "g l y p h", "w a v e"];

/// Every style that ships with glyphwave.
pub fn builtin_styles() -> StyleSet {
    StyleSet::new(vec![
        Style::new(
            "block",
            vec![
                ArtBlock::from_lines(BLOCK_HELLO),
                ArtBlock::from_lines(BLOCK_GLYPH),
                ArtBlock::from_lines(BLOCK_WAVE),
            ],
        ),
        Style::new(
            "line",
            vec![
                ArtBlock::from_lines(LINE_HELLO),
                ArtBlock::from_lines(LINE_GLYPH),
                ArtBlock::from_lines(LINE_WAVE),
            ],
        ),
        Style::new(
            "spaced",
            SPACED.iter().map(|line| ArtBlock::parse(line)).collect(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_styles_cycle() {
        let set = builtin_styles();
        assert_eq!(set.len(), 3);
        assert!(set.styles().iter().all(|style| style.blocks.len() > 1));
    }

    #[test]
    fn test_blocks_within_a_style_share_height() {
        for style in builtin_styles().styles() {
            let height = style.blocks[0].height();
            assert!(style.blocks.iter().all(|b| b.height() == height), "{}", style.name);
        }
    }

    #[test]
    fn test_ragged_block_is_padded() {
        let wave = ArtBlock::from_lines(BLOCK_WAVE);
        assert_eq!(wave.width(), 21);
        assert_eq!(wave.glyph(1, 20), ' ');
    }
}
