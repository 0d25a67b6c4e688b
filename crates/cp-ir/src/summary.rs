//! Track feature summary: what a parsed export actually uses.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::channel::{Channel, CHANNEL_COUNT};
use crate::macros::{MacroKind, MACRO_KIND_COUNT};
use crate::pattern::Note;
use crate::track::Track;

/// Summary of one track, printed by `inspect`.
pub struct TrackSummary {
    pub frames: usize,
    pub pattern_slots: usize,
    pub macros: [usize; MACRO_KIND_COUNT],
    pub instruments: usize,
    pub notes: [usize; CHANNEL_COUNT],
    pub has_halt: bool,
    pub has_release: bool,
    pub effects: BTreeSet<char>,
    pub instruments_used: BTreeSet<u8>,
}

/// Scan the rows the order list actually plays.
pub fn summarize(track: &Track) -> TrackSummary {
    let mut summary = TrackSummary {
        frames: track.order.len(),
        pattern_slots: track.patterns.len(),
        macros: [0; MACRO_KIND_COUNT],
        instruments: track.instruments.len(),
        notes: [0; CHANNEL_COUNT],
        has_halt: false,
        has_release: false,
        effects: BTreeSet::new(),
        instruments_used: BTreeSet::new(),
    };
    for kind in MacroKind::ALL {
        summary.macros[kind.index()] = track.macros(kind).len();
    }

    for channel in Channel::ALL {
        let slots: BTreeSet<u8> = track.order.iter().map(|f| f[channel.index()]).collect();
        for slot in slots {
            for row in 0..track.pattern_length {
                let cell = track.cell(channel, slot, row);
                match cell.note {
                    Note::None => {}
                    Note::Halt => summary.has_halt = true,
                    Note::Release => summary.has_release = true,
                    Note::Tone { .. } | Note::Noise(_) => summary.notes[channel.index()] += 1,
                }
                if let Some(inst) = cell.instrument {
                    summary.instruments_used.insert(inst);
                }
                summary.effects.extend(cell.effects.iter().map(|e| e.letter()));
            }
        }
    }

    summary
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames:   {} ({} pattern slots)", self.frames, self.pattern_slots)?;
        write!(f, "Macros:  ")?;
        for kind in MacroKind::ALL {
            write!(f, " {} {}", kind, self.macros[kind.index()])?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Instruments: {} defined, {} used",
            self.instruments,
            self.instruments_used.len()
        )?;
        write!(f, "Notes:   ")?;
        for channel in Channel::ALL {
            write!(f, " {} {}", channel.name(), self.notes[channel.index()])?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Note types: Tone{}{}",
            if self.has_halt { ", Halt" } else { "" },
            if self.has_release { ", Release" } else { "" },
        )?;
        if self.effects.is_empty() {
            writeln!(f, "Effects:  (none)")?;
        } else {
            let letters: Vec<char> = self.effects.iter().copied().collect();
            let joined: alloc::string::String = letters
                .iter()
                .map(|c| alloc::format!("{}xx", c))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Effects:  {}", joined)?;
        }
        Ok(())
    }
}
