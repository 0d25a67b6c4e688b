//! The music data include file.

use std::io::{self, Write};

use cp_ir::{tables, MacroKind, LOOP_SENTINEL};
use cp_pack::tokens::{self, B_XX, F_XX, INST};

use super::{write_byte_lines, write_pointer_tables, GENERATED_BANNER};
use crate::PackedSet;

/// Tokens per line in pattern and sound effect streams.
const STREAM_PER_LINE: usize = 16;

/// Entries per line in the tuning tables.
const TUNING_PER_LINE: usize = 12;

/// Instrument slots the driver reads; hi-pitch is never stored.
const DRIVER_SLOTS: [MacroKind; 4] = [
    MacroKind::Volume,
    MacroKind::Arpeggio,
    MacroKind::Pitch,
    MacroKind::Duty,
];

/// Symbolic form of a pattern stream. Operands of `INST`, `B_XX` and `F_XX`
/// are always plain hex even when they collide with a token value.
fn pattern_stream(bytes: &[u8]) -> Vec<String> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut operand = false;
    for &b in bytes {
        let name = if operand {
            None
        } else {
            tokens::pattern_token_name(b)
        };
        out.push(name.map_or_else(|| format!("${:02X}", b), str::to_string));
        operand = !operand && matches!(b, INST | B_XX | F_XX);
    }
    out
}

fn sfx_stream(bytes: &[u8]) -> Vec<String> {
    bytes
        .iter()
        .map(|&b| tokens::sfx_token_name(b).map_or_else(|| format!("${:02X}", b), str::to_string))
        .collect()
}

fn macro_bytes(ticks: &[i8], loop_point: u8) -> Vec<String> {
    ticks
        .iter()
        .map(|t| t.to_string())
        .chain(["LOOP".to_string(), loop_point.to_string()])
        .collect()
}

/// Render `data_music.inc`.
pub fn write_music_asm(w: &mut impl Write, set: &PackedSet, segment: &str) -> io::Result<()> {
    let t = &set.tables;

    writeln!(w, "{}", GENERATED_BANNER)?;
    writeln!(w)?;
    writeln!(w, "MUSIC_COUNT = {}", set.songs.len())?;
    writeln!(w, "SFX_COUNT = {}", t.sfx.len())?;
    writeln!(w, "MACRO_COUNT = {}", t.macros.len())?;
    writeln!(w, "INSTRUMENT_COUNT = {}", t.instruments.len())?;
    writeln!(w, "PATTERN_COUNT = {}", t.patterns.len())?;
    writeln!(w)?;
    writeln!(w, "LOOP = {}", LOOP_SENTINEL)?;
    for (name, value) in tokens::pattern_tokens().chain(tokens::sfx_tokens()) {
        writeln!(w, "{} = ${:02X}", name, value)?;
    }
    writeln!(w)?;
    writeln!(w, ".segment \"{}\"", segment)?;
    writeln!(w)?;

    // macros
    for (i, entry) in t.macros.iter().enumerate() {
        writeln!(w, "data_macro_{:02X}: ; {}", i, entry.origin)?;
        let m = &entry.content;
        write_byte_lines(w, macro_bytes(m.ticks(), m.loop_point()), usize::MAX)?;
    }
    writeln!(w)?;
    write_pointer_tables(w, "data_music_macro", "data_macro", t.macros.len())?;

    // instruments
    writeln!(w, "data_music_instrument:")?;
    for (i, inst) in t.instruments.iter().enumerate() {
        let slots: Vec<String> = DRIVER_SLOTS
            .iter()
            .map(|k| format!("${:02X}", inst.macros[k.index()]))
            .collect();
        writeln!(w, ".byte {} ; {:02X} {}: {}", slots.join(", "), i, inst.title, inst.name)?;
    }
    writeln!(w)?;

    writeln!(w, "data_music_speed:")?;
    write_byte_lines(w, set.songs.iter().map(|s| s.song.speed.to_string()), usize::MAX)?;
    writeln!(w)?;
    writeln!(w, "data_music_pattern_length:")?;
    // 256 rows wraps to 0, which the driver reads as 256.
    write_byte_lines(
        w,
        set.songs.iter().map(|s| (s.song.pattern_length as u8).to_string()),
        usize::MAX,
    )?;
    writeln!(w)?;

    // orders
    for (i, entry) in set.songs.iter().enumerate() {
        writeln!(w, "data_order_{:02X}: ; {}", i, entry.ident)?;
        for (j, frame) in entry.song.order.iter().enumerate() {
            writeln!(
                w,
                ".byte ${:02X}, ${:02X}, ${:02X}, ${:02X} ; {:02X}",
                frame[0], frame[1], frame[2], frame[3], j
            )?;
        }
        writeln!(w)?;
    }
    write_pointer_tables(w, "data_music_order", "data_order", set.songs.len())?;

    // patterns
    for (i, p) in t.patterns.iter().enumerate() {
        writeln!(w, "data_pattern_{:02X}: ; {} {} {:02X}", i, p.title, p.channel.name(), p.slot)?;
        write_byte_lines(w, pattern_stream(&p.bytes), STREAM_PER_LINE)?;
        writeln!(w)?;
    }
    write_pointer_tables(w, "data_music_pattern", "data_pattern", t.patterns.len())?;

    // sound effects
    for (i, (entry, ident)) in t.sfx.iter().zip(&set.sfx_idents).enumerate() {
        writeln!(w, "data_sfx_{:02X}: ; {}", i, ident)?;
        write_byte_lines(w, sfx_stream(&entry.sfx.bytes), STREAM_PER_LINE)?;
        writeln!(w)?;
    }
    write_pointer_tables(w, "data_sfx", "data_sfx", t.sfx.len())?;

    // tuning
    let tuning = tables::tuning_table();
    writeln!(w, "data_music_tuning_low:")?;
    write_byte_lines(w, tuning.iter().map(|p| format!("${:02X}", p & 0xFF)), TUNING_PER_LINE)?;
    writeln!(w)?;
    writeln!(w, "data_music_tuning_high:")?;
    write_byte_lines(w, tuning.iter().map(|p| format!("${:02X}", p >> 8)), TUNING_PER_LINE)?;
    writeln!(w)?;

    writeln!(w, "data_music_multiply:")?;
    write_byte_lines(w, tables::multiply_table().iter().map(|m| format!("${:X}", m)), 16)?;
    writeln!(w)?;

    writeln!(w, "; end of file")
}
