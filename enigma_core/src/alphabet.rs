//! Canonical letter indexing shared by every wheel and the plugboard.

use serde::{Deserialize, Serialize};

use crate::error::EnigmaError;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ALPHABET_LEN: usize = 26;

/// Reduces `n` into `0..26`, never negative.
pub fn wrap(n: i32) -> u8 {
    n.rem_euclid(ALPHABET_LEN as i32) as u8
}

/// An uppercase Latin letter, stored as its alphabet index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Letter(u8);

impl Letter {
    pub const A: Letter = Letter(0);

    /// Returns `None` for anything outside `'A'..='Z'`.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self((index % ALPHABET_LEN) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Shifts the letter by `delta` places around the ring.
    pub fn offset(self, delta: i32) -> Self {
        Self(wrap(self.0 as i32 + delta))
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_LEN as u8).map(Letter)
    }
}

impl TryFrom<u8> for Letter {
    type Error = EnigmaError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (index as usize) < ALPHABET_LEN {
            Ok(Self(index))
        } else {
            Err(EnigmaError::LetterOutOfRange { index })
        }
    }
}

impl From<Letter> for u8 {
    fn from(letter: Letter) -> Self {
        letter.0
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
