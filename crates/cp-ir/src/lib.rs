//! Core track model types for chippack.
//!
//! This crate defines the in-memory representation of one tracker export:
//! macros, instruments, per-channel patterns and the frame order. The text
//! importer emits these types and the packer consumes them.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod channel;
mod diagnosed;
mod instrument;
mod macros;
mod pattern;
mod summary;
pub mod tables;
mod track;

pub use channel::{Channel, CHANNEL_COUNT, ENCODED_CHANNEL_COUNT};
pub use diagnosed::Diagnosed;
pub use instrument::Instrument;
pub use macros::{Macro, MacroKind, LOOP_SENTINEL, MACRO_KIND_COUNT, MAX_MACRO_LEN};
pub use pattern::{Cell, EffectToken, Note, Pattern, MAX_EFFECT_COLUMNS, MAX_ROWS};
pub use summary::{summarize, TrackSummary};
pub use track::{Frame, Track, DEFAULT_PATTERN_LENGTH, DEFAULT_SPEED, DEFAULT_TEMPO};
