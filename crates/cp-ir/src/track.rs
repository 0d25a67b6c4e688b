//! Track structure and sequencing types.

use alloc::string::String;
use alloc::vec::Vec;

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::instrument::Instrument;
use crate::macros::{Macro, MacroKind, MACRO_KIND_COUNT};
use crate::pattern::{Cell, Pattern};

/// Speed used when the export has no track header.
pub const DEFAULT_SPEED: u8 = 6;

/// Rows per pattern when the export has no track header.
pub const DEFAULT_PATTERN_LENGTH: u16 = 64;

/// The only tempo the driver runs at.
pub const DEFAULT_TEMPO: u16 = 150;

/// One order-table row: a pattern slot per channel.
pub type Frame = [u8; CHANNEL_COUNT];

static EMPTY_CELL: Cell = Cell::empty();

/// A complete parsed track (song or sound effect).
#[derive(Clone, Debug)]
pub struct Track {
    /// Song title
    pub title: String,
    /// Initial speed (ticks per row)
    pub speed: u8,
    /// Tempo in BPM
    pub tempo: u16,
    /// Rows per pattern
    pub pattern_length: u16,
    /// Macros per kind, indexed by author-local index
    pub macros: [Vec<Macro>; MACRO_KIND_COUNT],
    /// Instruments, indexed by author-local index
    pub instruments: Vec<Instrument>,
    /// Order list
    pub order: Vec<Frame>,
    /// Pattern slots, indexed by slot number
    pub patterns: Vec<Pattern>,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: String::new(),
            speed: DEFAULT_SPEED,
            tempo: DEFAULT_TEMPO,
            pattern_length: DEFAULT_PATTERN_LENGTH,
            macros: Default::default(),
            instruments: Vec::new(),
            order: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

impl Track {
    /// Create a new empty track.
    pub fn new(title: &str) -> Self {
        Self {
            title: String::from(title),
            ..Self::default()
        }
    }

    /// Macros of one kind.
    pub fn macros(&self, kind: MacroKind) -> &[Macro] {
        &self.macros[kind.index()]
    }

    /// Define a macro, padding any gap below `index` with no-op macros.
    pub fn set_macro(&mut self, kind: MacroKind, index: usize, m: Macro) {
        let list = &mut self.macros[kind.index()];
        if list.len() <= index {
            list.resize(index + 1, Macro::noop());
        }
        list[index] = m;
    }

    /// Define an instrument, padding any gap with macro-less instruments.
    pub fn set_instrument(&mut self, index: usize, inst: Instrument) {
        if self.instruments.len() <= index {
            self.instruments.resize(index + 1, Instrument::default());
        }
        self.instruments[index] = inst;
    }

    /// Set an order-table row, padding any gap with frames of slot 0.
    pub fn set_frame(&mut self, index: usize, frame: Frame) {
        if self.order.len() <= index {
            self.order.resize(index + 1, [0; CHANNEL_COUNT]);
        }
        self.order[index] = frame;
    }

    /// Pattern slot, if anything was written to it.
    pub fn pattern(&self, slot: u8) -> Option<&Pattern> {
        self.patterns.get(slot as usize)
    }

    /// Pattern slot for writing, allocating empty slots up to it.
    pub fn pattern_mut(&mut self, slot: u8) -> &mut Pattern {
        let slot = slot as usize;
        if self.patterns.len() <= slot {
            let rows = self.pattern_length;
            self.patterns.resize_with(slot + 1, || Pattern::new(rows));
        }
        &mut self.patterns[slot]
    }

    /// Cell at a position; missing slots and rows read as empty.
    pub fn cell(&self, channel: Channel, slot: u8, row: u16) -> &Cell {
        match self.pattern(slot) {
            Some(p) if row < p.rows => p.cell(row, channel),
            _ => &EMPTY_CELL,
        }
    }

    /// Highest slot the order list references on a channel.
    pub fn max_slot(&self, channel: Channel) -> Option<u8> {
        self.order.iter().map(|frame| frame[channel.index()]).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Note;

    #[test]
    fn defaults_match_export_defaults() {
        let track = Track::default();
        assert_eq!(track.speed, 6);
        assert_eq!(track.pattern_length, 64);
        assert!(track.order.is_empty());
    }

    #[test]
    fn set_macro_pads_with_noop() {
        let mut track = Track::new("t");
        track.set_macro(MacroKind::Duty, 2, Macro::max_volume());
        let duty = track.macros(MacroKind::Duty);
        assert_eq!(duty.len(), 3);
        assert_eq!(duty[0], Macro::noop());
        assert_eq!(duty[2], Macro::max_volume());
        assert!(track.macros(MacroKind::Volume).is_empty());
    }

    #[test]
    fn set_instrument_pads_with_default() {
        let mut track = Track::new("t");
        track.set_instrument(1, Instrument::new("lead"));
        assert_eq!(track.instruments.len(), 2);
        assert_eq!(track.instruments[0], Instrument::default());
    }

    #[test]
    fn pattern_mut_uses_current_length() {
        let mut track = Track::new("t");
        track.pattern_length = 16;
        track.pattern_mut(2).cell_mut(3, Channel::Noise).note = Note::Noise(4);
        assert_eq!(track.patterns.len(), 3);
        assert_eq!(track.patterns[0].rows, 16);
        assert_eq!(track.cell(Channel::Noise, 2, 3).note, Note::Noise(4));
    }

    #[test]
    fn missing_cells_read_empty() {
        let track = Track::new("t");
        assert!(track.cell(Channel::Pulse1, 7, 200).is_empty());
    }

    #[test]
    fn max_slot_per_channel() {
        let mut track = Track::new("t");
        track.set_frame(0, [0, 1, 0, 0, 0]);
        track.set_frame(1, [2, 1, 0, 5, 9]);
        assert_eq!(track.max_slot(Channel::Pulse1), Some(2));
        assert_eq!(track.max_slot(Channel::Noise), Some(5));
        assert_eq!(Track::new("empty").max_slot(Channel::Pulse1), None);
    }
}
