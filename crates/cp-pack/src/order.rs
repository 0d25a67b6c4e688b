//! Order table remapping.

use cp_ir::{Channel, Track, ENCODED_CHANNEL_COUNT};

use crate::error::PackError;
use crate::instruments::index_byte;

/// One packed frame: a global pattern index per encoded channel.
pub type PackedFrame = [u8; ENCODED_CHANNEL_COUNT];

/// Global pattern index for each (channel, local slot) of a track.
#[derive(Clone, Debug, Default)]
pub struct PatternMap {
    slots: [Vec<usize>; ENCODED_CHANNEL_COUNT],
}

impl PatternMap {
    pub fn push(&mut self, channel: Channel, global: usize) {
        self.slots[channel.index()].push(global);
    }

    pub fn get(&self, channel: Channel, slot: u8) -> Option<usize> {
        self.slots.get(channel.index())?.get(slot as usize).copied()
    }
}

/// Translate every frame's local slots to global pattern indices. The DPCM
/// column is dropped.
pub fn remap_order(track: &Track, patterns: &PatternMap, errors: &mut Vec<PackError>) -> Vec<PackedFrame> {
    track
        .order
        .iter()
        .map(|frame| {
            let mut packed = [0u8; ENCODED_CHANNEL_COUNT];
            for channel in Channel::ENCODED {
                // Every slot the order names was encoded, so the lookup hits.
                let global = patterns
                    .get(channel, frame[channel.index()])
                    .unwrap_or_default();
                packed[channel.index()] = index_byte("pattern", global, errors);
            }
            packed
        })
        .collect()
}
