//! Size report.

use std::io::{self, Write};

use cp_ir::MacroKind;
use cp_pack::PoolTables;

use crate::PackedSet;

/// Pointer bytes per table entry.
const POINTER: usize = 2;

/// Bytes per order frame.
const FRAME: usize = 4;

/// Byte totals per data table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sizes {
    pub macros: usize,
    pub instruments: usize,
    pub orders: usize,
    pub patterns: usize,
    pub sfx: usize,
    /// Speed and pattern length per song
    pub misc: usize,
}

impl Sizes {
    pub fn of(set: &PackedSet) -> Self {
        let t = &set.tables;
        Self {
            macros: t
                .macros
                .iter()
                .map(|m| POINTER + m.content.packed_len())
                .sum(),
            instruments: t.instruments.len() * 4,
            orders: set
                .songs
                .iter()
                .map(|s| POINTER + s.song.order.len() * FRAME)
                .sum(),
            patterns: t.patterns.iter().map(|p| POINTER + p.bytes.len()).sum(),
            // pointer pair plus mode
            sfx: t.sfx.iter().map(|s| 3 + s.sfx.bytes.len()).sum(),
            misc: set.songs.len() * 2,
        }
    }

    pub fn total(&self) -> usize {
        self.macros + self.instruments + self.orders + self.patterns + self.sfx + self.misc
    }
}

/// Bytes and count of pooled macros first defined as `kind`. Seed macros
/// belong to no kind.
fn macro_kind_size(tables: &PoolTables, kind: MacroKind) -> (usize, usize) {
    tables
        .macros
        .iter()
        .filter(|m| m.origin.kind() == Some(kind))
        .fold((0, 0), |(size, count), m| {
            (size + POINTER + m.content.packed_len(), count + 1)
        })
}

/// Render `music_stats.txt`, ending with the error log if it is not empty.
pub fn write_stats(w: &mut impl Write, set: &PackedSet) -> io::Result<()> {
    let t = &set.tables;
    let sizes = Sizes::of(set);

    writeln!(w, "Macro count: {}", t.macros.len())?;
    writeln!(w, "Instrument count: {}", t.instruments.len())?;
    writeln!(w, "Pattern count: {}", t.patterns.len())?;
    writeln!(w)?;
    writeln!(w, "Macro size:      {:5} bytes", sizes.macros)?;
    writeln!(w, "Instrument size: {:5} bytes", sizes.instruments)?;
    writeln!(w, "Order size:      {:5} bytes", sizes.orders)?;
    writeln!(w, "Pattern size:    {:5} bytes", sizes.patterns)?;
    writeln!(w, "SFX size:        {:5} bytes", sizes.sfx)?;
    writeln!(w, "Misc:            {:5} bytes", sizes.misc)?;
    writeln!(w, "TOTAL:           {:5} bytes", sizes.total())?;
    writeln!(w)?;

    for kind in MacroKind::ALL {
        let (size, count) = macro_kind_size(t, kind);
        writeln!(
            w,
            "Macro type {}:    {:5} bytes in {:3} macros ({})",
            kind.index(),
            size,
            count,
            kind
        )?;
    }
    writeln!(w)?;

    for (i, entry) in set.songs.iter().enumerate() {
        let song = &entry.song;
        let patterns: usize = song
            .new_patterns
            .iter()
            .map(|&p| POINTER + t.patterns[p].bytes.len())
            .sum();
        let size = patterns + POINTER + song.order.len() * FRAME + 2;
        writeln!(
            w,
            "Song {:2}:         {:5} bytes in {:3} patterns ({})",
            i,
            size,
            song.new_patterns.len(),
            entry.ident
        )?;
    }
    writeln!(w)?;

    for (i, (entry, ident)) in t.sfx.iter().zip(&set.sfx_idents).enumerate() {
        writeln!(w, "SFX {:2}:          {:5} bytes ({})", i, 3 + entry.sfx.bytes.len(), ident)?;
    }

    if !set.log.is_empty() {
        write!(w, "\n\nReported errors:\n{}", set.log)?;
    }
    Ok(())
}
