//! Instrument macros: per-tick parameter sequences with a loop point.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Marker byte separating a macro's ticks from its loop index.
pub const LOOP_SENTINEL: i8 = -128;

/// Most authored values a macro may hold. The loop index is one byte and a
/// one-shot pitch macro grows by one tick, so longer macros are cut here.
pub const MAX_MACRO_LEN: usize = 255;

/// Number of macro kinds an instrument references.
pub const MACRO_KIND_COUNT: usize = 5;

/// Which instrument parameter a macro drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MacroKind {
    Volume,
    Arpeggio,
    Pitch,
    HiPitch,
    Duty,
}

impl MacroKind {
    /// All kinds in instrument slot order.
    pub const ALL: [MacroKind; MACRO_KIND_COUNT] = [
        MacroKind::Volume,
        MacroKind::Arpeggio,
        MacroKind::Pitch,
        MacroKind::HiPitch,
        MacroKind::Duty,
    ];

    /// Slot index (0-4), also the export's numeric macro type.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(MacroKind::Volume),
            1 => Some(MacroKind::Arpeggio),
            2 => Some(MacroKind::Pitch),
            3 => Some(MacroKind::HiPitch),
            4 => Some(MacroKind::Duty),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MacroKind::Volume => "volume",
            MacroKind::Arpeggio => "arpeggio",
            MacroKind::Pitch => "pitch",
            MacroKind::HiPitch => "hi-pitch",
            MacroKind::Duty => "duty",
        }
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A macro as the driver sees it: tick values and the tick to resume at
/// after the last one.
///
/// Equality covers ticks and loop point only; the kind is not part of a
/// macro's identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Macro {
    ticks: Vec<i8>,
    loop_point: u8,
}

impl Default for Macro {
    fn default() -> Self {
        Self::noop()
    }
}

impl Macro {
    /// Create a macro from raw ticks and a loop point.
    pub fn new(ticks: Vec<i8>, loop_point: u8) -> Self {
        Self { ticks, loop_point }
    }

    /// The "do nothing" macro: a single zero tick, looping on itself.
    pub fn noop() -> Self {
        Self::new(vec![0], 0)
    }

    /// Full volume, held.
    pub fn max_volume() -> Self {
        Self::new(vec![15], 0)
    }

    /// Build a macro from authored values.
    ///
    /// `loop_point` of `None` means the macro is one-shot: it holds its last
    /// tick forever. A one-shot pitch macro gets a trailing zero tick so the
    /// pitch stops drifting once the sequence runs out. An empty sequence is
    /// the no-op macro. Values past [`MAX_MACRO_LEN`] are dropped, and a loop
    /// point that no longer lands on a tick makes the macro one-shot.
    pub fn from_authored(kind: MacroKind, values: Vec<i8>, loop_point: Option<u8>) -> Self {
        if values.is_empty() {
            return Self::noop();
        }
        let mut ticks = values;
        ticks.truncate(MAX_MACRO_LEN);
        let loop_point = match loop_point.filter(|&point| (point as usize) < ticks.len()) {
            Some(point) => point,
            None => {
                if kind == MacroKind::Pitch {
                    ticks.push(0);
                }
                u8::try_from(ticks.len() - 1).unwrap_or(u8::MAX)
            }
        };
        Self { ticks, loop_point }
    }

    pub fn ticks(&self) -> &[i8] {
        &self.ticks
    }

    pub fn loop_point(&self) -> u8 {
        self.loop_point
    }

    /// Bytes as laid out for the driver: ticks, sentinel, loop index.
    pub fn packed(&self) -> Vec<i16> {
        let mut out: Vec<i16> = self.ticks.iter().map(|&t| t as i16).collect();
        out.push(LOOP_SENTINEL as i16);
        out.push(self.loop_point as i16);
        out
    }

    /// Size in bytes of the packed form.
    pub fn packed_len(&self) -> usize {
        self.ticks.len() + 2
    }
}
