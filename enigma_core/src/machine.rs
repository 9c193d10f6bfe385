//! The cipher engine: rotor stepping plus the per-letter
//! plugboard -> rotors -> reflector -> rotors -> plugboard pipeline.

use log::{debug, trace};

use crate::alphabet::Letter;
use crate::error::EnigmaError;
use crate::plugboard::Plugboard;
use crate::rotor::Rotor;
use crate::wheels::{RotorId, WheelRegistry};
use crate::wiring::Reflector;

/// A stack of rotors (index 0 is leftmost), a reflector and a plugboard.
///
/// The only state that changes after construction is the rotor position
/// vector, so two machines built from the same settings stay in lockstep.
/// Engines are not meant to be shared; run one per thread if needed.
#[derive(Clone, Debug)]
pub struct EnigmaMachine {
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
}

impl EnigmaMachine {
    /// Assembles a machine from the historical wheel set.
    ///
    /// `rotor_ids`, `positions` and `ring_settings` are parallel lists in
    /// left-to-right stack order.
    pub fn new(
        rotor_ids: &[RotorId],
        positions: &[u8],
        ring_settings: &[u8],
        plug_pairs: &[(char, char)],
    ) -> Result<Self, EnigmaError> {
        Self::with_registry(
            WheelRegistry::historical(),
            rotor_ids,
            positions,
            ring_settings,
            plug_pairs,
        )
    }

    pub fn with_registry(
        registry: WheelRegistry<'_>,
        rotor_ids: &[RotorId],
        positions: &[u8],
        ring_settings: &[u8],
        plug_pairs: &[(char, char)],
    ) -> Result<Self, EnigmaError> {
        if rotor_ids.len() != positions.len() || rotor_ids.len() != ring_settings.len() {
            return Err(EnigmaError::SettingsLengthMismatch {
                rotors: rotor_ids.len(),
                positions: positions.len(),
                ring_settings: ring_settings.len(),
            });
        }
        let rotors = rotor_ids
            .iter()
            .enumerate()
            .map(|(slot, &id)| {
                let spec = registry
                    .rotor_by_id(id)
                    .ok_or(EnigmaError::UnknownRotor { slot, id: id.0 })?;
                Rotor::from_spec(spec, ring_settings[slot], positions[slot])
            })
            .collect::<Result<Vec<_>, EnigmaError>>()?;
        let reflector_spec = registry.reflector();
        let reflector = Reflector::parse(reflector_spec.name, reflector_spec.wiring)?;
        let plugboard = Plugboard::new(plug_pairs)?;
        Self::from_parts(rotors, reflector, plugboard)
    }

    pub fn from_parts(
        rotors: Vec<Rotor>,
        reflector: Reflector,
        plugboard: Plugboard,
    ) -> Result<Self, EnigmaError> {
        if rotors.is_empty() {
            return Err(EnigmaError::EmptyRotorStack);
        }
        let machine = Self {
            rotors,
            reflector,
            plugboard,
        };
        debug!(
            "machine assembled order={} window={} reflector={} plug_pairs={}",
            machine.wheel_order(),
            machine.window(),
            machine.reflector.name(),
            machine.plugboard.len()
        );
        Ok(machine)
    }

    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    pub fn positions(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Window letters, left to right.
    pub fn window(&self) -> String {
        self.rotors.iter().map(|r| r.window().to_char()).collect()
    }

    fn wheel_order(&self) -> String {
        self.rotors
            .iter()
            .map(Rotor::name)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Advances the stack by one keystroke.
    ///
    /// Every notch is read before any rotor moves. The rightmost rotor
    /// always steps, a rotor steps when its right neighbour sat at its
    /// notch, and an inner rotor sitting at its own notch steps again
    /// together with its left neighbour (the double step).
    pub fn step_rotors(&mut self) {
        let at_notch: Vec<bool> = self.rotors.iter().map(Rotor::at_notch).collect();
        let last = self.rotors.len() - 1;
        for (slot, rotor) in self.rotors.iter_mut().enumerate() {
            if slot == last {
                rotor.step();
                continue;
            }
            let pushed = at_notch[slot + 1];
            let double = slot > 0 && at_notch[slot];
            if pushed || double {
                trace!(
                    "turnover slot={} rotor={} pushed={} double={}",
                    slot,
                    rotor.name(),
                    pushed,
                    double
                );
                rotor.step();
            }
        }
    }

    /// Steps the rotors and enciphers one letter.
    pub fn encrypt_letter(&mut self, letter: Letter) -> Letter {
        self.step_rotors();
        self.transform(letter)
    }

    /// Enciphers `c` if it is an uppercase letter. Anything else comes back
    /// untouched and leaves the rotors where they are.
    pub fn encrypt_char(&mut self, c: char) -> char {
        match Letter::from_char(c) {
            Some(letter) => self.encrypt_letter(letter).to_char(),
            None => c,
        }
    }

    /// Upper-cases ASCII letters and runs every character through
    /// [`encrypt_char`](Self::encrypt_char) in order. Decryption is the same
    /// call on a machine reset to the starting settings.
    pub fn process(&mut self, text: &str) -> String {
        let start = self.window();
        let output: String = text
            .chars()
            .map(|c| self.encrypt_char(c.to_ascii_uppercase()))
            .collect();
        debug!(
            "processed chars={} window={}->{}",
            output.chars().count(),
            start,
            self.window()
        );
        output
    }

    fn transform(&self, letter: Letter) -> Letter {
        let mut current = self.plugboard.swap(letter);
        for rotor in self.rotors.iter().rev() {
            current = rotor.forward(current);
        }
        current = self.reflector.reflect(current);
        for rotor in &self.rotors {
            current = rotor.backward(current);
        }
        self.plugboard.swap(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::wheels::{REFERENCE_ROTORS, ReflectorSpec, RotorSpec};

    fn machine(positions: [u8; 3], rings: [u8; 3], plugs: &[(char, char)]) -> EnigmaMachine {
        EnigmaMachine::new(&REFERENCE_ROTORS, &positions, &rings, plugs).unwrap()
    }

    #[test]
    fn builds_three_rotors_in_order() {
        let m = machine([0, 0, 0], [0, 0, 0], &[('A', 'B')]);
        let names: Vec<_> = m.rotors().iter().map(Rotor::name).collect();
        assert_eq!(names, ["I", "II", "III"]);
        assert_eq!(m.plugboard().len(), 1);
        assert_eq!(m.window(), "AAA");
    }

    #[test]
    fn normal_step_moves_only_rightmost() {
        let mut m = machine([0, 0, 0], [0, 0, 0], &[]);
        m.step_rotors();
        assert_eq!(m.positions(), [0, 0, 1]);
    }

    #[test]
    fn right_notch_pushes_middle() {
        // Rotor III turns over at V (21).
        let mut m = machine([0, 0, 21], [0, 0, 0], &[]);
        m.step_rotors();
        assert_eq!(m.positions(), [0, 1, 22]);
    }

    #[test]
    fn middle_at_notch_double_steps() {
        // Rotor II turns over at E (4).
        let mut m = machine([0, 4, 0], [0, 0, 0], &[]);
        m.step_rotors();
        assert_eq!(m.positions(), [1, 5, 1]);
    }

    #[test]
    fn double_step_sequence_adu() {
        let mut m = machine([0, 3, 20], [0, 0, 0], &[]);
        let mut windows = Vec::new();
        for _ in 0..4 {
            m.step_rotors();
            windows.push(m.window());
        }
        assert_eq!(windows, ["ADV", "AEW", "BFX", "BFY"]);
    }

    #[test]
    fn leftmost_notch_has_no_effect() {
        // Rotor I turns over at Q (16) but nothing sits to its left.
        let mut m = machine([16, 0, 0], [0, 0, 0], &[]);
        m.step_rotors();
        assert_eq!(m.positions(), [16, 0, 1]);
    }

    #[test]
    fn non_letters_pass_through_without_stepping() {
        let mut m = machine([0, 0, 0], [0, 0, 0], &[]);
        for c in ['1', ' ', '!', 'a', 'é'] {
            assert_eq!(m.encrypt_char(c), c);
        }
        assert_eq!(m.positions(), [0, 0, 0]);
    }

    #[test]
    fn first_letter_from_reference_setting() {
        let mut m = machine([0, 0, 0], [0, 0, 0], &[]);
        let out = m.encrypt_char('A');
        assert!(ALPHABET.contains(out));
        assert_ne!(out, 'A');
        assert_eq!(out, 'D');
        assert_eq!(m.positions(), [0, 0, 1]);
    }

    #[test]
    fn plugboard_swaps_input_and_output() {
        let mut with_plug = machine([0, 0, 0], [0, 0, 0], &[('A', 'B')]);
        let mut without_plug = machine([0, 0, 0], [0, 0, 0], &[]);
        let plugged = with_plug.encrypt_char('A');
        let plain = without_plug.encrypt_char('B');
        let expected = match plain {
            'A' => 'B',
            'B' => 'A',
            other => other,
        };
        assert_eq!(plugged, expected);
    }

    #[test]
    fn hello_round_trips() {
        let mut enc = machine([0, 0, 0], [0, 0, 0], &[]);
        let cipher = enc.process("HELLO");
        assert_eq!(cipher, "VNACA");
        let mut dec = machine([0, 0, 0], [0, 0, 0], &[]);
        assert_eq!(dec.process(&cipher), "HELLO");
    }

    #[test]
    fn reciprocal_with_plugboard() {
        let plugs = [('A', 'B'), ('C', 'D')];
        let mut enc = machine([5, 10, 15], [0, 0, 0], &plugs);
        let cipher = enc.process("HELLO");
        assert_eq!(cipher, "VPPMB");
        let mut dec = machine([5, 10, 15], [0, 0, 0], &plugs);
        assert_eq!(dec.process(&cipher), "HELLO");
    }

    #[test]
    fn process_normalizes_case() {
        let mut upper = machine([0, 0, 0], [0, 0, 0], &[]);
        let mut lower = machine([0, 0, 0], [0, 0, 0], &[]);
        assert_eq!(lower.process("hello"), upper.process("HELLO"));
    }

    #[test]
    fn process_keeps_punctuation_in_place() {
        let mut m = machine([0, 3, 20], [1, 2, 3], &[('A', 'Z'), ('Q', 'W'), ('E', 'R')]);
        assert_eq!(m.process("Attack at dawn!"), "EYNBKW DU OLEH!");
    }

    #[test]
    fn never_maps_a_letter_to_itself() {
        for c in ALPHABET.chars() {
            let mut m = machine([0, 0, 0], [0, 0, 0], &[]);
            assert_ne!(m.encrypt_char(c), c, "{c} encrypted to itself");
        }
    }

    #[test]
    fn positions_and_rings_change_output() {
        let reference = machine([0, 0, 0], [0, 0, 0], &[]).process("A");
        let shifted = machine([1, 0, 0], [0, 0, 0], &[]).process("A");
        let ringed = machine([0, 0, 0], [1, 0, 0], &[]).process("A");
        assert_eq!(reference, "D");
        assert_eq!(shifted, "B");
        assert_eq!(ringed, "Y");
    }

    #[test]
    fn rejects_unknown_rotor_id() {
        let ids = [RotorId(0), RotorId(7), RotorId(2)];
        let err = EnigmaMachine::new(&ids, &[0; 3], &[0; 3], &[]).unwrap_err();
        assert_eq!(err, EnigmaError::UnknownRotor { slot: 1, id: 7 });
    }

    #[test]
    fn rejects_mismatched_settings() {
        let err = EnigmaMachine::new(&REFERENCE_ROTORS, &[0, 0], &[0, 0, 0], &[]).unwrap_err();
        assert_eq!(
            err,
            EnigmaError::SettingsLengthMismatch {
                rotors: 3,
                positions: 2,
                ring_settings: 3,
            }
        );
    }

    #[test]
    fn rejects_empty_stack() {
        assert_eq!(
            EnigmaMachine::new(&[], &[], &[], &[]).unwrap_err(),
            EnigmaError::EmptyRotorStack
        );
    }

    #[test]
    fn single_rotor_always_steps() {
        let mut m = EnigmaMachine::new(&[RotorId(1)], &[4], &[0], &[]).unwrap();
        m.step_rotors();
        assert_eq!(m.positions(), [5]);
    }

    #[test]
    fn four_rotor_stack_couples_adjacent_pairs() {
        let ids = [RotorId(0), RotorId(1), RotorId(1), RotorId(2)];

        // Third rotor (II) at its notch: it double-steps and pushes the second.
        let mut m = EnigmaMachine::new(&ids, &[0, 0, 4, 0], &[0; 4], &[]).unwrap();
        m.step_rotors();
        assert_eq!(m.positions(), [0, 1, 5, 1]);

        // Second rotor (II) at its notch: it double-steps and pushes the first.
        let mut m = EnigmaMachine::new(&ids, &[0, 4, 0, 0], &[0; 4], &[]).unwrap();
        m.step_rotors();
        assert_eq!(m.positions(), [1, 5, 0, 1]);
    }

    #[test]
    fn custom_registry_supplies_wheels_and_reflector() {
        const ROTOR_IV: RotorSpec = RotorSpec {
            id: RotorId(3),
            name: "IV",
            wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB",
            notch: 'J',
        };
        const ROTOR_V: RotorSpec = RotorSpec {
            id: RotorId(4),
            name: "V",
            wiring: "VZBRGITYUPSDNHLXAWMJQOFECK",
            notch: 'Z',
        };
        const REFLECTOR_C: ReflectorSpec = ReflectorSpec {
            name: "C",
            wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL",
        };
        static NAVAL: [RotorSpec; 2] = [ROTOR_IV, ROTOR_V];
        let registry = WheelRegistry::new(&NAVAL, REFLECTOR_C);
        let ids = [RotorId(4), RotorId(3)];
        let build = || EnigmaMachine::with_registry(registry, &ids, &[9, 25], &[3, 1], &[]);

        let mut m = build().unwrap();
        assert_eq!(m.reflector().name(), "C");
        let names: Vec<_> = m.rotors().iter().map(Rotor::name).collect();
        assert_eq!(names, ["V", "IV"]);
        let cipher = m.process("WEATHER REPORT");
        assert_eq!(build().unwrap().process(&cipher), "WEATHER REPORT");

        let err = EnigmaMachine::with_registry(registry, &[RotorId(0)], &[0], &[0], &[])
            .unwrap_err();
        assert_eq!(err, EnigmaError::UnknownRotor { slot: 0, id: 0 });
    }

    #[test]
    fn overlapping_plugs_are_tolerated_by_the_engine() {
        let mut m = machine([0, 0, 0], [0, 0, 0], &[('A', 'B'), ('A', 'C')]);
        let out = m.process("ABC");
        assert_eq!(out.chars().count(), 3);
    }
}
