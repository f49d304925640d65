//! Small pseudo-random generator for glitch glyphs and style selection.

use std::time::{SystemTime, UNIX_EPOCH};

const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64* generator.
#[derive(Debug, Clone)]
pub struct GlitchRng {
    state: u64,
}

impl GlitchRng {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { FALLBACK_SEED } else { seed };
        Self { state }
    }

    /// Seed from the system clock.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform pick from `chars`, a blank for an empty slice.
    pub fn pick(&mut self, chars: &[char]) -> char {
        if chars.is_empty() {
            return ' ';
        }
        let idx = (self.next_u64() % chars.len() as u64) as usize;
        chars[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_still_advances() {
        let mut rng = GlitchRng::new(0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_pick_covers_alphabet() {
        let chars = ['a', 'b', 'c'];
        let mut rng = GlitchRng::new(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let ch = rng.pick(&chars);
            seen[chars.iter().position(|c| *c == ch).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(rng.pick(&[]), ' ');
    }
}
