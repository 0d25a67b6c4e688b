//! Whole-song packing: macros, instruments, patterns and order.

use cp_ir::{Channel, Diagnosed, Track};
use tracing::debug;

use crate::error::PackError;
use crate::instruments::{remap_instruments, remap_macros};
use crate::order::{remap_order, PackedFrame, PatternMap};
use crate::pattern::encode_pattern;
use crate::pool::Pool;

/// Per-song output. Pattern and instrument data live in the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedSong {
    pub title: String,
    pub speed: u8,
    pub pattern_length: u16,
    pub order: Vec<PackedFrame>,
    /// Global patterns this song added to the pool, in index order
    pub new_patterns: Vec<usize>,
}

/// Pack one song against the pool.
pub fn pack_song(pool: &mut Pool, track: &Track) -> Diagnosed<PackedSong, PackError> {
    let mut errors = Vec::new();

    let macros = remap_macros(pool, track);
    let instrument_map = remap_instruments(pool, track, &macros, &mut errors);

    let mut patterns = PatternMap::default();
    let mut new_patterns = Vec::new();
    let mut loop_found = false;
    for channel in Channel::ENCODED {
        let Some(max_slot) = track.max_slot(channel) else {
            continue;
        };
        for slot in 0..=max_slot {
            let encoded = encode_pattern(track, &instrument_map, channel, slot);
            errors.extend(encoded.errors);
            loop_found |= encoded.value.loop_markers > 0;

            let interned = pool.intern_pattern(encoded.value.bytes, &track.title, channel, slot);
            if interned.is_new {
                new_patterns.push(interned.index);
            }
            patterns.push(channel, interned.index);
        }
    }

    let order = remap_order(track, &patterns, &mut errors);
    if !loop_found {
        errors.push(PackError::NoLoopPoint);
    }
    debug!(
        title = %track.title,
        frames = order.len(),
        new_patterns = new_patterns.len(),
        errors = errors.len(),
        "packed song"
    );

    Diagnosed {
        value: PackedSong {
            title: track.title.clone(),
            speed: track.speed,
            pattern_length: track.pattern_length,
            order,
            new_patterns,
        },
        errors,
    }
}
