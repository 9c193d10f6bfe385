use serde::{Deserialize, Serialize};

/// Identifier selecting a wheel type from a [`WheelRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotorId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotorSpec {
    pub id: RotorId,
    pub name: &'static str,
    pub wiring: &'static str,
    pub notch: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReflectorSpec {
    pub name: &'static str,
    pub wiring: &'static str,
}

const ROTOR_I: RotorSpec = RotorSpec {
    id: RotorId(0),
    name: "I",
    wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
    notch: 'Q',
};

const ROTOR_II: RotorSpec = RotorSpec {
    id: RotorId(1),
    name: "II",
    wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
    notch: 'E',
};

const ROTOR_III: RotorSpec = RotorSpec {
    id: RotorId(2),
    name: "III",
    wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
    notch: 'V',
};

static ROTOR_SET_HISTORICAL: [RotorSpec; 3] = [ROTOR_I, ROTOR_II, ROTOR_III];

pub const REFLECTOR_B: ReflectorSpec = ReflectorSpec {
    name: "B",
    wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT",
};

/// Default wheel order, left to right.
pub const REFERENCE_ROTORS: [RotorId; 3] = [RotorId(0), RotorId(1), RotorId(2)];

/// Read-only view over a set of wheel types and the reflector they share.
#[derive(Clone, Copy, Debug)]
pub struct WheelRegistry<'a> {
    rotors: &'a [RotorSpec],
    reflector: ReflectorSpec,
}

impl<'a> WheelRegistry<'a> {
    pub const fn new(rotors: &'a [RotorSpec], reflector: ReflectorSpec) -> Self {
        Self { rotors, reflector }
    }

    /// Rotors I, II and III with reflector B.
    pub fn historical() -> WheelRegistry<'static> {
        WheelRegistry {
            rotors: &ROTOR_SET_HISTORICAL,
            reflector: REFLECTOR_B,
        }
    }

    pub fn rotors(&self) -> &'a [RotorSpec] {
        self.rotors
    }

    pub fn rotor_by_id(&self, id: RotorId) -> Option<&'a RotorSpec> {
        self.rotors.iter().find(|spec| spec.id == id)
    }

    pub fn reflector(&self) -> ReflectorSpec {
        self.reflector
    }
}

impl Default for WheelRegistry<'static> {
    fn default() -> Self {
        Self::historical()
    }
}
