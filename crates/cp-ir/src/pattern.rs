//! Pattern and cell types for tracker sequences.

use alloc::vec::Vec;
use arrayvec::ArrayVec;
use core::fmt;

use crate::channel::{Channel, CHANNEL_COUNT};

/// Maximum number of effect columns per channel.
pub const MAX_EFFECT_COLUMNS: usize = 4;

/// Maximum rows in one pattern.
pub const MAX_ROWS: u16 = 256;

/// A note value in a pattern cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Note {
    /// No note
    #[default]
    None,
    /// Note cut (`---`)
    Halt,
    /// Note release (`===`)
    Release,
    /// Melodic note: octave 0-9, semitone 0-11
    Tone { octave: u8, semitone: u8 },
    /// Noise channel period class 0-15
    Noise(u8),
}

impl Note {
    /// Create a melodic note from octave and semitone.
    pub const fn from_octave_semitone(octave: u8, semitone: u8) -> Self {
        Note::Tone { octave, semitone }
    }

    /// True if the cell carries any note, including cut and release.
    pub const fn is_some(self) -> bool {
        !matches!(self, Note::None)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 12] = [
            "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
        ];
        match *self {
            Note::None => f.write_str("..."),
            Note::Halt => f.write_str("---"),
            Note::Release => f.write_str("==="),
            Note::Tone { octave, semitone } => {
                let name = NAMES.get(semitone as usize).copied().unwrap_or("??");
                write!(f, "{}{}", name, octave)
            }
            Note::Noise(class) => write!(f, "{:X}-#", class),
        }
    }
}

/// One effect column entry: a command letter and its parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectToken {
    /// ASCII command letter (`B`, `D`, `F`, `V`, ...)
    pub code: u8,
    pub param: u8,
}

impl EffectToken {
    pub const fn new(code: u8, param: u8) -> Self {
        Self { code, param }
    }

    pub fn letter(&self) -> char {
        self.code as char
    }
}

impl fmt::Display for EffectToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02X}", self.letter(), self.param)
    }
}

/// A single channel cell in a pattern row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Note value
    pub note: Note,
    /// Author-local instrument index
    pub instrument: Option<u8>,
    /// Volume column (0-15)
    pub volume: Option<u8>,
    /// Effect columns in authored order
    pub effects: ArrayVec<EffectToken, MAX_EFFECT_COLUMNS>,
}

impl Cell {
    /// Create an empty cell.
    pub const fn empty() -> Self {
        Self {
            note: Note::None,
            instrument: None,
            volume: None,
            effects: ArrayVec::new_const(),
        }
    }

    /// Returns true if the cell is completely empty.
    pub fn is_empty(&self) -> bool {
        self.note == Note::None
            && self.instrument.is_none()
            && self.volume.is_none()
            && self.effects.is_empty()
    }
}

/// A pattern slot: rows of cells across all five channels.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Number of rows (1-256)
    pub rows: u16,
    /// Pattern data, stored row-major: data[row * CHANNEL_COUNT + channel]
    pub data: Vec<Cell>,
}

impl Pattern {
    /// Create a new pattern with empty cells.
    pub fn new(rows: u16) -> Self {
        Self {
            rows,
            data: alloc::vec![Cell::empty(); rows as usize * CHANNEL_COUNT],
        }
    }

    /// Get a reference to a cell.
    pub fn cell(&self, row: u16, channel: Channel) -> &Cell {
        debug_assert!(row < self.rows);
        &self.data[row as usize * CHANNEL_COUNT + channel.index()]
    }

    /// Get a mutable reference to a cell.
    pub fn cell_mut(&mut self, row: u16, channel: Channel) -> &mut Cell {
        debug_assert!(row < self.rows);
        &mut self.data[row as usize * CHANNEL_COUNT + channel.index()]
    }

    /// All channel cells in a row.
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * CHANNEL_COUNT;
        &self.data[start..start + CHANNEL_COUNT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_display() {
        assert_eq!(Note::from_octave_semitone(3, 9).to_string(), "A-3");
        assert_eq!(Note::from_octave_semitone(4, 1).to_string(), "C#4");
        assert_eq!(Note::Noise(0xC).to_string(), "C-#");
        assert_eq!(Note::Halt.to_string(), "---");
    }

    #[test]
    fn release_and_halt_count_as_notes() {
        assert!(Note::Halt.is_some());
        assert!(Note::Release.is_some());
        assert!(!Note::None.is_some());
    }

    #[test]
    fn pattern_cell_access() {
        let mut pattern = Pattern::new(64);
        pattern.cell_mut(10, Channel::Triangle).note = Note::from_octave_semitone(2, 0);

        assert_eq!(pattern.cell(10, Channel::Triangle).note, Note::Tone { octave: 2, semitone: 0 });
        assert_eq!(pattern.cell(10, Channel::Pulse2).note, Note::None);
        assert_eq!(pattern.row(10).len(), CHANNEL_COUNT);
    }

    #[test]
    fn empty_cell_detection() {
        let mut cell = Cell::empty();
        assert!(cell.is_empty());
        cell.effects.push(EffectToken::new(b'B', 0));
        assert!(!cell.is_empty());
        assert_eq!(cell.effects[0].to_string(), "B00");
    }
}
