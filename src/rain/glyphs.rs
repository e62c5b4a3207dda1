//! Glyph source: random display symbols for the falling trails.

use crate::error::{RainError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unicode_width::UnicodeWidthChar;

/// Default rain alphabet.
///
/// The repeated spaces are deliberate: about one draw in five is blank, which
/// breaks trails up into visible gaps.
pub const GLYPHS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', '.', '"', '=', '*', '+', '-', '<',
    '>', '|', '¦', '╌', '┊', '╎', ' ', ' ', ' ', ' ', ' ', ' ',
];

/// Uniform random draws from a fixed alphabet.
///
/// The source owns its random stream; two sources built from the same seed
/// yield the same symbols in the same order.
#[derive(Debug, Clone)]
pub struct CharacterSource<R = StdRng> {
    alphabet: Vec<char>,
    rng: R,
}

impl CharacterSource<StdRng> {
    /// Default alphabet, seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Default alphabet with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for CharacterSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CharacterSource<R> {
    /// Default alphabet drawing from `rng`.
    pub fn from_rng(rng: R) -> Self {
        Self {
            alphabet: GLYPHS.to_vec(),
            rng,
        }
    }

    /// Custom alphabet drawing from `rng`.
    ///
    /// Every symbol must occupy exactly one terminal column, otherwise rows
    /// would no longer line up with the grid.
    pub fn with_alphabet(alphabet: impl Into<Vec<char>>, rng: R) -> Result<Self> {
        let alphabet = alphabet.into();
        if alphabet.is_empty() {
            return Err(RainError::Alphabet("alphabet is empty".to_string()));
        }
        if let Some(&bad) = alphabet.iter().find(|c| c.width() != Some(1)) {
            return Err(RainError::Alphabet(format!(
                "symbol {bad:?} is not one column wide"
            )));
        }
        Ok(Self { alphabet, rng })
    }

    /// The symbols this source draws from, blanks included.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Draw the next symbol.
    #[inline]
    pub fn next_symbol(&mut self) -> char {
        self.alphabet[self.rng.gen_range(0..self.alphabet.len())]
    }
}
