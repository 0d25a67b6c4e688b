//! Byte-code packing for chippack.
//!
//! Songs and sound effects are packed one at a time against a shared
//! [`Pool`], which deduplicates macros, instruments and patterns across the
//! whole run. Encoding problems are collected next to the packed value; a
//! track with errors still produces usable output.

mod error;
mod instruments;
mod order;
mod pattern;
mod pool;
mod sfx;
mod skip;
mod song;
pub mod tokens;

pub use error::{PackError, RowLocation};
pub use instruments::{default_macro, remap_instruments, remap_macros, MacroMap};
pub use order::{remap_order, PackedFrame, PatternMap};
pub use pattern::{encode_pattern, EncodedPattern};
pub use pool::{
    InstrumentEntry, Interned, MacroEntry, MacroOrigin, PatternEntry, Pool, PoolTables, SfxEntry,
    DEFAULT_MACRO, DEFAULT_VOLUME_MACRO,
};
pub use sfx::{pack_sfx, PackedSfx, SfxMode};
pub use skip::{SkipOverflow, SkipWriter};
pub use song::{pack_song, PackedSong};
