use core::fmt;

use cp_ir::{Channel, EffectToken, Note};
use thiserror::Error;

/// Where in a track a problem was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLocation {
    pub channel: Channel,
    pub pattern: u8,
    pub row: u16,
}

impl RowLocation {
    pub const fn new(channel: Channel, pattern: u8, row: u16) -> Self {
        Self {
            channel,
            pattern,
            row,
        }
    }
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel {}, pattern {:02X}, row {:02X}",
            self.channel, self.pattern, self.row
        )
    }
}

/// A problem found while encoding one track. None of these stop packing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("hi-pitch macro unsupported in instrument {instrument:02X}")]
    HiPitch { instrument: usize },

    #[error("multiple Bxx effects in {0}")]
    DuplicateLoop(RowLocation),

    #[error("no loop point found; use a Bxx effect")]
    NoLoopPoint,

    #[error("{effect} parameter must be 00 in {at}")]
    NonZeroParam { at: RowLocation, effect: EffectToken },

    #[error("unsupported effect {effect} in {at}")]
    UnknownEffect { at: RowLocation, effect: EffectToken },

    #[error("note release (===) unsupported in {0}")]
    Release(RowLocation),

    #[error("note {note} out of range in {at}")]
    NoteOutOfRange { at: RowLocation, note: Note },

    #[error("instrument {instrument:02X} not defined in {at}")]
    UnknownInstrument { at: RowLocation, instrument: u8 },

    #[error("too many skipped rows ({rows}) in {at}")]
    TooManySkips { at: RowLocation, rows: usize },

    #[error("too many skipped rows ({rows}) at end of channel {channel}, pattern {pattern:02X}")]
    TooManySkipsAtEnd {
        channel: Channel,
        pattern: u8,
        rows: usize,
    },

    #[error("{table} index {index} does not fit in a byte")]
    PoolOverflow { table: &'static str, index: usize },

    #[error("speed is {speed}; sound effects assume speed 1")]
    SfxSpeed { speed: u8 },

    #[error("note not found on row 0 of pattern 0 in pulse 1 or noise")]
    SfxNoNote,

    #[error("no note halt found")]
    SfxNoHalt,
}
