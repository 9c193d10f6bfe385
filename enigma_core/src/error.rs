use thiserror::Error;

/// Configuration failures raised while assembling wheels or a machine.
///
/// Text processing itself never fails; every error here surfaces at
/// construction time so no half-built machine is ever handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    #[error("rotor slot {slot}: unknown rotor id {id}")]
    UnknownRotor { slot: usize, id: u8 },

    #[error(
        "settings length mismatch: {rotors} rotors, {positions} positions, {ring_settings} ring settings"
    )]
    SettingsLengthMismatch {
        rotors: usize,
        positions: usize,
        ring_settings: usize,
    },

    #[error("machine needs at least one rotor")]
    EmptyRotorStack,

    #[error("{kind} for rotor slot {slot} must be within 0..=25, found {value}")]
    SettingOutOfRange {
        kind: &'static str,
        slot: usize,
        value: i64,
    },

    #[error("malformed wiring {wiring:?}: {reason}")]
    MalformedWiring { wiring: String, reason: String },

    #[error("notch {notch:?} is not a letter A-Z")]
    MalformedNotch { notch: char },

    #[error("reflector wiring {wiring:?} must pair every letter with a different letter")]
    ReflectorNotInvolution { wiring: String },

    #[error("plugboard character {ch:?} is not a letter A-Z")]
    NonAlphabeticPlug { ch: char },

    #[error("plugboard letter {letter} is paired with itself")]
    SelfPairedPlug { letter: char },

    #[error("plugboard letter {letter} appears in more than one pair")]
    RepeatedPlugLetter { letter: char },

    #[error("plugboard holds at most 13 pairs, found {count}")]
    TooManyPlugPairs { count: usize },

    #[error("letter index {index} is outside A-Z")]
    LetterOutOfRange { index: u8 },
}
