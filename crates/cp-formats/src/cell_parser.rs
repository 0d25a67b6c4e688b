//! Pattern cell parsing shared by the text importer.
//!
//! A channel field of a `ROW` record is `note inst vol eff...`, with `...`,
//! `..` and `.` standing for absent values.

use cp_ir::{Cell, Channel, EffectToken, Note, MAX_EFFECT_COLUMNS};

/// Semitone names in octave order.
const NOTE_NAMES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

/// A parsed channel field. `unknown_note` holds the note text when it could
/// not be read; the cell then has no note but keeps its other columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCell {
    pub cell: Cell,
    pub unknown_note: Option<String>,
}

/// Parse a note column. Returns `None` for text that is not a note.
///
/// Noise notes are written as a hex period class followed by `-#`.
pub fn parse_note(text: &str, channel: Channel) -> Option<Note> {
    match text {
        "..." => return Some(Note::None),
        "---" => return Some(Note::Halt),
        "===" => return Some(Note::Release),
        _ => {}
    }
    let bytes = text.as_bytes();
    if bytes.len() != 3 {
        return None;
    }

    if channel.is_noise() {
        if bytes[1] != b'-' {
            return None;
        }
        let class = (bytes[0] as char).to_digit(16)?;
        return Some(Note::Noise(class as u8));
    }

    let name = text.get(..2)?;
    let semitone = NOTE_NAMES.iter().position(|&n| n == name)?;
    let octave = (bytes[2] as char).to_digit(10)?;
    Some(Note::from_octave_semitone(octave as u8, semitone as u8))
}

fn parse_effect(text: &str) -> Option<Option<EffectToken>> {
    if text == "..." {
        return Some(None);
    }
    let bytes = text.as_bytes();
    if bytes.len() != 3 || !bytes[0].is_ascii_alphanumeric() {
        return None;
    }
    let param = u8::from_str_radix(&text[1..], 16).ok()?;
    Some(Some(EffectToken::new(bytes[0], param)))
}

/// Parse one channel field. Returns `None` if the field is malformed.
pub fn parse_cell(tokens: &[&str], channel: Channel) -> Option<ParsedCell> {
    let (&note, rest) = tokens.split_first()?;
    let (&inst, rest) = rest.split_first()?;
    let (&vol, effects) = rest.split_first()?;
    if effects.len() > MAX_EFFECT_COLUMNS {
        return None;
    }

    let mut cell = Cell::empty();
    let mut unknown_note = None;
    match parse_note(note, channel) {
        Some(n) => cell.note = n,
        None => unknown_note = Some(note.to_string()),
    }

    if inst != ".." {
        cell.instrument = Some(u8::from_str_radix(inst, 16).ok()?);
    }
    if vol != "." {
        let v = u8::from_str_radix(vol, 16).ok()?;
        if v > 0xF {
            return None;
        }
        cell.volume = Some(v);
    }
    for text in effects {
        if let Some(effect) = parse_effect(text)? {
            cell.effects.push(effect);
        }
    }

    Some(ParsedCell { cell, unknown_note })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melodic_notes() {
        assert_eq!(
            parse_note("A-3", Channel::Pulse1),
            Some(Note::from_octave_semitone(3, 9))
        );
        assert_eq!(
            parse_note("C#0", Channel::Triangle),
            Some(Note::from_octave_semitone(0, 1))
        );
        assert_eq!(parse_note("H-3", Channel::Pulse2), None);
        assert_eq!(parse_note("A-x", Channel::Pulse2), None);
    }

    #[test]
    fn noise_notes_use_hex_class() {
        assert_eq!(parse_note("C-#", Channel::Noise), Some(Note::Noise(12)));
        assert_eq!(parse_note("0-#", Channel::Noise), Some(Note::Noise(0)));
        assert_eq!(parse_note("C#4", Channel::Noise), None);
    }

    #[test]
    fn cut_and_release_on_any_channel() {
        for ch in Channel::ALL {
            assert_eq!(parse_note("---", ch), Some(Note::Halt));
            assert_eq!(parse_note("===", ch), Some(Note::Release));
            assert_eq!(parse_note("...", ch), Some(Note::None));
        }
    }

    #[test]
    fn full_cell() {
        let parsed = parse_cell(&["C-4", "0A", "F", "B01", "...", "D00"], Channel::Pulse1)
            .expect("valid cell");
        assert!(parsed.unknown_note.is_none());
        let cell = parsed.cell;
        assert_eq!(cell.note, Note::from_octave_semitone(4, 0));
        assert_eq!(cell.instrument, Some(0x0A));
        assert_eq!(cell.volume, Some(15));
        assert_eq!(cell.effects.len(), 2);
        assert_eq!(cell.effects[0], EffectToken::new(b'B', 1));
        assert_eq!(cell.effects[1], EffectToken::new(b'D', 0));
    }

    #[test]
    fn absent_columns() {
        let parsed = parse_cell(&["...", "..", ".", "..."], Channel::Triangle).expect("valid cell");
        assert!(parsed.cell.is_empty());
    }

    #[test]
    fn unknown_note_keeps_other_columns() {
        let parsed = parse_cell(&["^-1", "01", ".", "..."], Channel::Pulse2).expect("valid cell");
        assert_eq!(parsed.unknown_note.as_deref(), Some("^-1"));
        assert_eq!(parsed.cell.note, Note::None);
        assert_eq!(parsed.cell.instrument, Some(1));
    }

    #[test]
    fn malformed_cells() {
        assert!(parse_cell(&["C-4", "00"], Channel::Pulse1).is_none());
        assert!(parse_cell(&["C-4", "zz", ".", "..."], Channel::Pulse1).is_none());
        assert!(parse_cell(&["C-4", "00", "G", "..."], Channel::Pulse1).is_none());
        assert!(parse_cell(&["C-4", "00", ".", "B0"], Channel::Pulse1).is_none());
        let too_many = ["C-4", "00", ".", "...", "...", "...", "...", "..."];
        assert!(parse_cell(&too_many, Channel::Pulse1).is_none());
    }
}
