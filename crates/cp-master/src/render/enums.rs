//! Song and sound effect enums for game code.

use std::io::{self, Write};

use super::GENERATED_BANNER;
use crate::PackedSet;

/// Render `data_music_enums.inc`.
pub fn write_enums_asm(w: &mut impl Write, set: &PackedSet) -> io::Result<()> {
    writeln!(w, "{}", GENERATED_BANNER)?;
    writeln!(w)?;
    writeln!(w, "MUSIC_COUNT = {}", set.songs.len())?;
    writeln!(w, "SFX_COUNT = {}", set.tables.sfx.len())?;
    writeln!(w)?;

    writeln!(w, ".enum")?;
    for (i, entry) in set.songs.iter().enumerate() {
        writeln!(w, "MUSIC_{} = {}", entry.ident, i)?;
    }
    writeln!(w, ".endenum")?;
    writeln!(w)?;

    writeln!(w, ".enum")?;
    for (i, ident) in set.sfx_idents.iter().enumerate() {
        writeln!(w, "SOUND_{} = {}", ident, i)?;
    }
    writeln!(w, ".endenum")?;
    writeln!(w)?;

    for (i, entry) in set.tables.sfx.iter().enumerate() {
        writeln!(w, "SOUND_MODE__{} = {}", i, entry.sfx.mode.value())?;
    }
    writeln!(w)?;
    writeln!(w, "; end of file")
}
