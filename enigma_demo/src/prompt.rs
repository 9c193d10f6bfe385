//! Console prompting and the line parsers shared with the flag-based commands.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use enigma_core::{
    ALPHABET_LEN, EnigmaError, MachineConfig, Plugboard, REFERENCE_ROTORS, RotorId,
    WheelRegistry,
};

/// What the interactive session collected.
pub struct PromptedRun {
    pub message: String,
    pub config: MachineConfig,
}

/// Asks for a message, start positions, ring settings and plug pairs, in
/// that order, re-asking whenever a settings line does not parse.
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<PromptedRun> {
    let message = ask(input, out, "Enter message: ")?;
    let slots = REFERENCE_ROTORS.len();
    let positions = ask_until(input, out, "Rotor positions (e.g. 0 0 0): ", |line| {
        parse_settings(line, "position", slots)
    })?;
    let ring_settings = ask_until(input, out, "Ring settings (e.g. 0 0 0): ", |line| {
        parse_settings(line, "ring setting", slots)
    })?;
    let plugboard = ask_until(input, out, "Plugboard pairs (e.g. AB CD): ", |line| {
        let pairs = parse_plug_pairs(line);
        Plugboard::new(&pairs)?.check_strict()?;
        Ok(pairs)
    })?;
    Ok(PromptedRun {
        message,
        config: MachineConfig::reference(positions, ring_settings, plugboard),
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("reading console input")? == 0 {
        bail!("input closed before all settings were entered");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn ask_until<R, W, T, F>(input: &mut R, out: &mut W, prompt: &str, parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T>,
{
    loop {
        let line = ask(input, out, prompt)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(out, "Invalid input: {err:#}")?,
        }
    }
}

/// Parses exactly `expected` whitespace-separated integers in `0..=25`.
pub fn parse_settings(line: &str, label: &'static str, expected: usize) -> Result<Vec<u8>> {
    let values = line
        .split_whitespace()
        .enumerate()
        .map(|(slot, token)| -> Result<u8> {
            let value: i64 = token
                .parse()
                .with_context(|| format!("{label} {token:?} is not a number"))?;
            if !(0..ALPHABET_LEN as i64).contains(&value) {
                return Err(EnigmaError::SettingOutOfRange {
                    kind: label,
                    slot,
                    value,
                }
                .into());
            }
            Ok(value as u8)
        })
        .collect::<Result<Vec<_>>>()?;
    if values.len() != expected {
        bail!("expected {expected} {label} values, found {}", values.len());
    }
    Ok(values)
}

/// Accepts wheel names (`I II III`) or numeric ids (`0 1 2`), left to right.
pub fn parse_rotor_order(line: &str) -> Result<Vec<RotorId>> {
    let registry = WheelRegistry::historical();
    let order = line
        .split_whitespace()
        .map(|token| {
            registry
                .rotors()
                .iter()
                .find(|spec| {
                    spec.name.eq_ignore_ascii_case(token)
                        || token.parse::<u8>().ok() == Some(spec.id.0)
                })
                .map(|spec| spec.id)
                .with_context(|| format!("unknown rotor {token:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if order.is_empty() {
        bail!("rotor order is empty");
    }
    Ok(order)
}

/// Upper-cases the line and takes every run of two adjacent letters as a
/// pair, scanning left to right without overlap. Everything else is ignored.
pub fn parse_plug_pairs(line: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = line.chars().map(|c| c.to_ascii_uppercase()).collect();
    let mut pairs = Vec::new();
    let mut i = 0;
    while i + 1 < chars.len() {
        let (a, b) = (chars[i], chars[i + 1]);
        if a.is_ascii_uppercase() && b.is_ascii_uppercase() {
            pairs.push((a, b));
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn settings_parse_three_values() {
        assert_eq!(parse_settings("0 12 25", "position", 3).unwrap(), [0, 12, 25]);
        assert_eq!(parse_settings("  1\t2  3 ", "position", 3).unwrap(), [1, 2, 3]);
    }

    #[test]
    fn settings_reject_bad_lines() {
        assert!(parse_settings("0 0", "position", 3).is_err());
        assert!(parse_settings("0 0 26", "position", 3).is_err());
        assert!(parse_settings("0 -1 0", "ring setting", 3).is_err());
        assert!(parse_settings("a b c", "position", 3).is_err());
        let err = parse_settings("0 0 30", "ring setting", 3).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EnigmaError>(),
            Some(&EnigmaError::SettingOutOfRange {
                kind: "ring setting",
                slot: 2,
                value: 30,
            })
        );
        assert_eq!(
            err.to_string(),
            "ring setting for rotor slot 2 must be within 0..=25, found 30"
        );
    }

    #[test]
    fn plug_pairs_follow_two_letter_runs() {
        assert_eq!(parse_plug_pairs("AB CD"), [('A', 'B'), ('C', 'D')]);
        assert_eq!(parse_plug_pairs("ab, cd"), [('A', 'B'), ('C', 'D')]);
        assert_eq!(parse_plug_pairs("ABCD"), [('A', 'B'), ('C', 'D')]);
        assert_eq!(parse_plug_pairs("ABC DE"), [('A', 'B'), ('D', 'E')]);
        assert!(parse_plug_pairs("A B 12").is_empty());
        assert!(parse_plug_pairs("").is_empty());
    }

    #[test]
    fn rotor_order_accepts_names_and_ids() {
        assert_eq!(
            parse_rotor_order("III i 1").unwrap(),
            [RotorId(2), RotorId(0), RotorId(1)]
        );
        assert!(parse_rotor_order("IV").is_err());
        assert!(parse_rotor_order("   ").is_err());
    }

    #[test]
    fn interactive_session_reprompts_on_bad_input() {
        let script = "hello world\n0 0\n0 0 0\n0 0 0\nAB BC\nAB CD\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out: Vec<u8> = Vec::new();
        let run = run_interactive(&mut input, &mut out).unwrap();
        assert_eq!(run.message, "hello world");
        assert_eq!(run.config.positions, [0, 0, 0]);
        assert_eq!(run.config.plugboard, [('A', 'B'), ('C', 'D')]);

        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(transcript.matches("Invalid input").count(), 2);
        assert!(transcript.contains("appears in more than one pair"));
    }

    #[test]
    fn interactive_session_fails_on_closed_input() {
        let mut input = Cursor::new("HELLO\n".as_bytes());
        let mut out: Vec<u8> = Vec::new();
        assert!(run_interactive(&mut input, &mut out).is_err());
    }

    #[test]
    fn prompted_settings_round_trip_a_message() {
        let script = "Attack at dawn!\n5 10 15\n0 0 0\nAB CD\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out: Vec<u8> = Vec::new();
        let run = run_interactive(&mut input, &mut out).unwrap();
        let cipher = run.config.build().unwrap().process(&run.message);
        let plain = run.config.build().unwrap().process(&cipher);
        assert_eq!(plain, "ATTACK AT DAWN!");
    }
}
