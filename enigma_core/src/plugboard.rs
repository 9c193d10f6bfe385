use crate::alphabet::{ALPHABET_LEN, Letter};
use crate::error::EnigmaError;

pub const MAX_PLUG_PAIRS: usize = ALPHABET_LEN / 2;

/// Letter-pair swaps applied on the way into and out of the rotor stack.
///
/// Pairs are scanned in the order given and the first pair holding a
/// letter wins. Overlapping pairs are tolerated here; [`Plugboard::check_strict`]
/// is what rejects them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plugboard {
    pairs: Vec<(Letter, Letter)>,
}

impl Plugboard {
    pub fn new(pairs: &[(char, char)]) -> Result<Self, EnigmaError> {
        let pairs = pairs
            .iter()
            .map(|&(a, b)| Ok((plug_letter(a)?, plug_letter(b)?)))
            .collect::<Result<Vec<_>, EnigmaError>>()?;
        Ok(Self { pairs })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[(Letter, Letter)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn swap(&self, letter: Letter) -> Letter {
        for &(a, b) in &self.pairs {
            if letter == a {
                return b;
            }
            if letter == b {
                return a;
            }
        }
        letter
    }

    /// Character-level swap; anything outside A-Z is returned unchanged.
    pub fn swap_char(&self, c: char) -> char {
        match Letter::from_char(c) {
            Some(letter) => self.swap(letter).to_char(),
            None => c,
        }
    }

    /// Enforces the physical constraints of a real plug panel: at most 13
    /// cables, no letter cabled to itself, no letter used twice.
    pub fn check_strict(&self) -> Result<(), EnigmaError> {
        if self.pairs.len() > MAX_PLUG_PAIRS {
            return Err(EnigmaError::TooManyPlugPairs {
                count: self.pairs.len(),
            });
        }
        let mut used = [false; ALPHABET_LEN];
        for &(a, b) in &self.pairs {
            if a == b {
                return Err(EnigmaError::SelfPairedPlug {
                    letter: a.to_char(),
                });
            }
            for letter in [a, b] {
                if used[letter.index()] {
                    return Err(EnigmaError::RepeatedPlugLetter {
                        letter: letter.to_char(),
                    });
                }
                used[letter.index()] = true;
            }
        }
        Ok(())
    }
}

fn plug_letter(c: char) -> Result<Letter, EnigmaError> {
    Letter::from_char(c.to_ascii_uppercase()).ok_or(EnigmaError::NonAlphabeticPlug { ch: c })
}
