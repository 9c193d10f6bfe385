//! Core of a three-wheel Enigma simulator.
//!
//! A machine steps its rotors (including the middle-rotor double step),
//! swaps the letter on the plugboard, runs it right-to-left through the
//! rotors, bounces it off the reflector, runs it back left-to-right and
//! swaps it on the plugboard again. Encryption and decryption are the same
//! operation on identically configured machines.
//!
//! ```
//! use enigma_core::MachineConfig;
//!
//! let config = MachineConfig::reference(vec![5, 10, 15], vec![0, 0, 0], vec![('A', 'B')]);
//! let cipher = config.build().unwrap().process("HELLO");
//! let plain = config.build().unwrap().process(&cipher);
//! assert_eq!(plain, "HELLO");
//! ```
//!
//! Historical cipher only; it offers no security.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod plugboard;
pub mod rotor;
pub mod wheels;
pub mod wiring;

pub use crate::alphabet::{ALPHABET, ALPHABET_LEN, Letter, wrap};
pub use crate::config::{
    ConfigError, KEY_SHEET_PLUG_PAIRS, MACHINE_CONFIG_VERSION, MachineConfig,
};
pub use crate::error::EnigmaError;
pub use crate::machine::EnigmaMachine;
pub use crate::plugboard::{MAX_PLUG_PAIRS, Plugboard};
pub use crate::rotor::Rotor;
pub use crate::wheels::{
    REFERENCE_ROTORS, REFLECTOR_B, ReflectorSpec, RotorId, RotorSpec, WheelRegistry,
};
pub use crate::wiring::{Reflector, Wiring};
