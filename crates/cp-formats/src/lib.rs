//! Format importers for chippack.
//!
//! Parses FamiTracker text exports into the track model. Problems with
//! individual records are collected rather than returned early, so a caller
//! always gets a best-effort track plus the full list of what went wrong.

mod cell_parser;
mod text_format;

pub use cell_parser::{parse_cell, parse_note};
pub use text_format::{decode_record, load_text, Record, REQUIRED_TEMPO};

use cp_ir::{Channel, MacroKind};
use thiserror::Error;

/// A problem found while importing one export.
///
/// `line` is the 1-based line number in the export text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: macro release unsupported ({kind} macro {index})")]
    MacroRelease { line: usize, kind: MacroKind, index: u8 },

    #[error("line {line}: only absolute macro mode supported ({kind} macro {index})")]
    MacroMode { line: usize, kind: MacroKind, index: u8 },

    #[error("line {line}: loop point {loop_point} past the end of {kind} macro {index}")]
    MacroLoop {
        line: usize,
        kind: MacroKind,
        index: u8,
        loop_point: i32,
    },

    #[error("line {line}: {kind} macro {index} has {len} values, only {max} kept")]
    MacroLength {
        line: usize,
        kind: MacroKind,
        index: u8,
        len: usize,
        max: usize,
    },

    #[error("line {line}: value -128 is reserved for the loop marker ({kind} macro {index})")]
    MacroSentinel { line: usize, kind: MacroKind, index: u8 },

    #[error("line {line}: only tempo {expected} supported, found {tempo}")]
    Tempo { line: usize, tempo: u16, expected: u16 },

    #[error("line {line}: malformed {record} record")]
    Malformed { line: usize, record: &'static str },

    #[error("line {line}: unknown note {text:?} in channel {channel}")]
    UnknownNote {
        line: usize,
        channel: Channel,
        text: String,
    },

    #[error("line {line}: row {row:02X} is past the pattern length {rows}")]
    RowOutOfRange { line: usize, row: u16, rows: u16 },

    #[error("no TITLE record found")]
    MissingTitle,

    #[error("track {track} not found")]
    TrackNotFound { track: usize },
}
