//! Validated letter permutations used by rotors and the reflector.

use crate::alphabet::{ALPHABET_LEN, Letter};
use crate::error::EnigmaError;

/// A permutation of the alphabet: position `i` maps alphabet letter `i`
/// to `forward[i]`. The inverse table is kept alongside so that looking
/// up where a letter sits in the wiring is a single index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wiring {
    forward: [Letter; ALPHABET_LEN],
    inverse: [Letter; ALPHABET_LEN],
}

impl Wiring {
    pub fn parse(wiring: &str) -> Result<Self, EnigmaError> {
        let malformed = |reason: String| EnigmaError::MalformedWiring {
            wiring: wiring.to_string(),
            reason,
        };
        let count = wiring.chars().count();
        if count != ALPHABET_LEN {
            return Err(malformed(format!("expected 26 letters, found {count}")));
        }
        let mut forward = [Letter::A; ALPHABET_LEN];
        let mut inverse = [Letter::A; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];
        for (i, c) in wiring.chars().enumerate() {
            let letter =
                Letter::from_char(c).ok_or_else(|| malformed(format!("{c:?} is not A-Z")))?;
            if seen[letter.index()] {
                return Err(malformed(format!("{c} appears twice")));
            }
            seen[letter.index()] = true;
            forward[i] = letter;
            inverse[letter.index()] = Letter::from_index(i);
        }
        Ok(Self { forward, inverse })
    }

    /// Contact reached when entering at `letter`.
    pub fn map(&self, letter: Letter) -> Letter {
        self.forward[letter.index()]
    }

    /// Position of `letter` within the wiring.
    pub fn position_of(&self, letter: Letter) -> Letter {
        self.inverse[letter.index()]
    }

    pub fn is_involution(&self) -> bool {
        Letter::all().all(|l| self.map(self.map(l)) == l)
    }

    pub fn has_fixed_point(&self) -> bool {
        Letter::all().any(|l| self.map(l) == l)
    }
}

impl std::fmt::Display for Wiring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for letter in self.forward {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Fixed involutive permutation that sends current back through the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reflector {
    name: &'static str,
    wiring: Wiring,
}

impl Reflector {
    pub fn parse(name: &'static str, wiring: &str) -> Result<Self, EnigmaError> {
        let parsed = Wiring::parse(wiring)?;
        if !parsed.is_involution() || parsed.has_fixed_point() {
            return Err(EnigmaError::ReflectorNotInvolution {
                wiring: wiring.to_string(),
            });
        }
        Ok(Self {
            name,
            wiring: parsed,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn reflect(&self, letter: Letter) -> Letter {
        self.wiring.map(letter)
    }
}
