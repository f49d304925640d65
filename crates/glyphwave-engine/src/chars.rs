//! Character constants for the morph glitch.

/// Glyphs shown while a cell is glitching, drawn uniformly at random every frame.
pub const GLITCH_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '&', '*', '+', '=', '?', '/', '\\', '|', '<', '>', '~', '^', ';',
    ':', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];
