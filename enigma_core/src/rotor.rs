//! A single rotating substitution wheel.
//!
//! Current entering from the plugboard side passes through
//! [`Rotor::forward`]; current returning from the reflector passes through
//! [`Rotor::backward`]. Both honour the current angular position and the
//! ring setting, and for a fixed pair of those the two are exact inverses.

use crate::alphabet::{Letter, wrap};
use crate::error::EnigmaError;
use crate::wheels::RotorSpec;
use crate::wiring::Wiring;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotor {
    name: &'static str,
    wiring: Wiring,
    notch: Letter,
    ring_setting: u8,
    position: u8,
}

impl Rotor {
    /// Creates a rotor at position 0 with ring setting 0.
    pub fn new(name: &'static str, wiring: Wiring, notch: Letter) -> Self {
        Self {
            name,
            wiring,
            notch,
            ring_setting: 0,
            position: 0,
        }
    }

    /// Instantiates a wheel type for one machine slot.
    pub fn from_spec(
        spec: &RotorSpec,
        ring_setting: u8,
        position: u8,
    ) -> Result<Self, EnigmaError> {
        let wiring = Wiring::parse(spec.wiring)?;
        let notch = Letter::from_char(spec.notch).ok_or(EnigmaError::MalformedNotch {
            notch: spec.notch,
        })?;
        Ok(Self::new(spec.name, wiring, notch)
            .with_ring_setting(ring_setting)
            .with_position(position))
    }

    pub fn with_ring_setting(mut self, ring_setting: u8) -> Self {
        self.ring_setting = wrap(ring_setting as i32);
        self
    }

    pub fn with_position(mut self, position: u8) -> Self {
        self.set_position(position);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn notch(&self) -> Letter {
        self.notch
    }

    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn set_position(&mut self, position: u8) {
        self.position = wrap(position as i32);
    }

    /// Letter currently visible in the machine window.
    pub fn window(&self) -> Letter {
        Letter::from_index(self.position as usize)
    }

    pub fn step(&mut self) {
        self.position = wrap(self.position as i32 + 1);
    }

    pub fn at_notch(&self) -> bool {
        self.window() == self.notch
    }

    pub fn forward(&self, letter: Letter) -> Letter {
        self.wiring.map(letter.offset(self.shift()))
    }

    pub fn backward(&self, letter: Letter) -> Letter {
        self.wiring.position_of(letter).offset(-self.shift())
    }

    fn shift(&self) -> i32 {
        self.position as i32 - self.ring_setting as i32
    }
}
