//! Machine settings as a plain record, validated strictly before use.
//!
//! The engine itself accepts anything it can represent (overlapping plug
//! pairs, out-of-range positions reduced mod 26). [`MachineConfig::validate`]
//! is the boundary check that rejects what a real operator could not set up.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::alphabet::{ALPHABET, ALPHABET_LEN};
use crate::error::EnigmaError;
use crate::machine::EnigmaMachine;
use crate::plugboard::Plugboard;
use crate::wheels::{REFERENCE_ROTORS, RotorId, WheelRegistry};

pub const MACHINE_CONFIG_VERSION: u16 = 1;

/// Cables handed out on a generated key sheet.
pub const KEY_SHEET_PLUG_PAIRS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Machine(#[from] EnigmaError),

    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON is invalid: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Rotor order, start positions, ring settings and plug pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    pub rotors: Vec<RotorId>,
    pub positions: Vec<u8>,
    pub ring_settings: Vec<u8>,
    pub plugboard: Vec<(char, char)>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rotors: REFERENCE_ROTORS.to_vec(),
            positions: vec![0; REFERENCE_ROTORS.len()],
            ring_settings: vec![0; REFERENCE_ROTORS.len()],
            plugboard: Vec::new(),
        }
    }
}

impl MachineConfig {
    /// Reference wheel order I-II-III with the given settings.
    pub fn reference(
        positions: Vec<u8>,
        ring_settings: Vec<u8>,
        plugboard: Vec<(char, char)>,
    ) -> Self {
        Self {
            rotors: REFERENCE_ROTORS.to_vec(),
            positions,
            ring_settings,
            plugboard,
        }
    }

    pub fn validate(&self) -> Result<(), EnigmaError> {
        self.validate_with(WheelRegistry::historical())
    }

    pub fn validate_with(&self, registry: WheelRegistry<'_>) -> Result<(), EnigmaError> {
        let rotors = self.rotors.len();
        if rotors != self.positions.len() || rotors != self.ring_settings.len() {
            return Err(EnigmaError::SettingsLengthMismatch {
                rotors,
                positions: self.positions.len(),
                ring_settings: self.ring_settings.len(),
            });
        }
        if self.rotors.is_empty() {
            return Err(EnigmaError::EmptyRotorStack);
        }
        for (slot, &id) in self.rotors.iter().enumerate() {
            if registry.rotor_by_id(id).is_none() {
                return Err(EnigmaError::UnknownRotor { slot, id: id.0 });
            }
        }
        check_range("position", &self.positions)?;
        check_range("ring setting", &self.ring_settings)?;
        Plugboard::new(&self.plugboard)?.check_strict()
    }

    /// Validates the settings and assembles a machine at its start position.
    pub fn build(&self) -> Result<EnigmaMachine, EnigmaError> {
        self.validate()?;
        EnigmaMachine::new(
            &self.rotors,
            &self.positions,
            &self.ring_settings,
            &self.plugboard,
        )
    }

    /// Draws a key sheet: every historical wheel once in random order,
    /// random positions and rings, and ten disjoint plug pairs.
    pub fn random_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let registry = WheelRegistry::historical();
        let mut rotors: Vec<RotorId> = registry.rotors().iter().map(|spec| spec.id).collect();
        rotors.shuffle(rng);
        let dist = Uniform::from(0..ALPHABET_LEN as u8);
        let positions = (0..rotors.len()).map(|_| dist.sample(rng)).collect();
        let ring_settings = (0..rotors.len()).map(|_| dist.sample(rng)).collect();
        let mut letters: Vec<char> = ALPHABET.chars().collect();
        letters.shuffle(rng);
        let plugboard = letters
            .chunks(2)
            .take(KEY_SHEET_PLUG_PAIRS)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self {
            rotors,
            positions,
            ring_settings,
            plugboard,
        }
    }

    /// Reads and validates a JSON config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read(path)?;
        let config: Self = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }
}

fn check_range(kind: &'static str, values: &[u8]) -> Result<(), EnigmaError> {
    match values
        .iter()
        .enumerate()
        .find(|(_, value)| **value as usize >= ALPHABET_LEN)
    {
        Some((slot, &value)) => Err(EnigmaError::SettingOutOfRange {
            kind,
            slot,
            value: value as i64,
        }),
        None => Ok(()),
    }
}

impl Serialize for MachineConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("MachineConfig", 5)?;
        state.serialize_field("version", &MACHINE_CONFIG_VERSION)?;
        state.serialize_field("rotors", &self.rotors)?;
        state.serialize_field("positions", &self.positions)?;
        state.serialize_field("ring_settings", &self.ring_settings)?;
        state.serialize_field("plugboard", &self.plugboard)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for MachineConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            version: u16,
            rotors: Vec<RotorId>,
            positions: Vec<u8>,
            ring_settings: Vec<u8>,
            #[serde(default)]
            plugboard: Vec<(char, char)>,
        }
        let helper = Helper::deserialize(deserializer)?;
        if helper.version != MACHINE_CONFIG_VERSION {
            return Err(D::Error::custom(format!(
                "MachineConfig version mismatch: expected {}, found {}",
                MACHINE_CONFIG_VERSION, helper.version
            )));
        }
        Ok(Self {
            rotors: helper.rotors,
            positions: helper.positions,
            ring_settings: helper.ring_settings,
            plugboard: helper.plugboard,
        })
    }
}
