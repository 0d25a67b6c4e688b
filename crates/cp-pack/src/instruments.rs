//! Macro and instrument remapping from author-local to pool indices.

use cp_ir::{MacroKind, Track, MACRO_KIND_COUNT};

use crate::error::PackError;
use crate::pool::{MacroOrigin, Pool, DEFAULT_MACRO, DEFAULT_VOLUME_MACRO};

/// Local to global macro index map, one list per kind.
#[derive(Clone, Debug, Default)]
pub struct MacroMap {
    maps: [Vec<usize>; MACRO_KIND_COUNT],
}

impl MacroMap {
    /// Global index of a local macro, if the track defines it.
    pub fn get(&self, kind: MacroKind, local: u8) -> Option<usize> {
        self.maps[kind.index()].get(local as usize).copied()
    }
}

/// Default macro for a kind whose slot is empty.
pub const fn default_macro(kind: MacroKind) -> usize {
    match kind {
        MacroKind::Volume => DEFAULT_VOLUME_MACRO,
        _ => DEFAULT_MACRO,
    }
}

/// Intern every macro the track defines.
pub fn remap_macros(pool: &mut Pool, track: &Track) -> MacroMap {
    let mut map = MacroMap::default();
    for kind in MacroKind::ALL {
        for (local, content) in track.macros(kind).iter().enumerate() {
            let interned = pool.intern_macro(content, || MacroOrigin::Track {
                title: track.title.clone(),
                kind,
                local,
            });
            map.maps[kind.index()].push(interned.index);
        }
    }
    map
}

/// Narrow a pool index to the byte the driver stores.
pub(crate) fn index_byte(table: &'static str, index: usize, errors: &mut Vec<PackError>) -> u8 {
    match u8::try_from(index) {
        Ok(byte) => byte,
        Err(_) => {
            errors.push(PackError::PoolOverflow { table, index });
            index as u8
        }
    }
}

/// Resolve each instrument's macro slots and intern it. Returns the global
/// instrument byte for each local instrument.
pub fn remap_instruments(
    pool: &mut Pool,
    track: &Track,
    macros: &MacroMap,
    errors: &mut Vec<PackError>,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(track.instruments.len());
    for (local, inst) in track.instruments.iter().enumerate() {
        let mut slots = [0u8; MACRO_KIND_COUNT];
        for kind in MacroKind::ALL {
            let global = inst
                .macro_ref(kind)
                .and_then(|l| macros.get(kind, l))
                .unwrap_or(default_macro(kind));
            if kind == MacroKind::HiPitch && global != DEFAULT_MACRO {
                errors.push(PackError::HiPitch { instrument: local });
            }
            slots[kind.index()] = index_byte("macro", global, errors);
        }
        let interned = pool.intern_instrument(slots, &track.title, &inst.name);
        out.push(index_byte("instrument", interned.index, errors));
    }
    out
}
