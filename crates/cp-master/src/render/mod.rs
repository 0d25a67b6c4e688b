//! Text renderers for the generated artifacts.
//!
//! Each renderer writes one file from a finished [`PackedSet`](crate::PackedSet).
//! Output depends only on the set, so two runs over the same input produce
//! identical files.

mod asm;
mod enums;
mod stats;

use std::io::{self, Write};

pub use asm::write_music_asm;
pub use enums::write_enums_asm;
pub use stats::{write_stats, Sizes};

/// First line of every generated include file.
const GENERATED_BANNER: &str = "; automatically generated by chippack";

/// Write `items` as `.byte` lines of at most `per_line` entries.
///
/// Nothing is written for an empty list.
fn write_byte_lines<I>(w: &mut impl Write, items: I, per_line: usize) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut line: Vec<String> = Vec::new();
    for item in items {
        line.push(item.as_ref().to_string());
        if line.len() == per_line {
            writeln!(w, ".byte {}", line.join(", "))?;
            line.clear();
        }
    }
    if !line.is_empty() {
        writeln!(w, ".byte {}", line.join(", "))?;
    }
    Ok(())
}

/// A `<label` / `>label` pointer table pair.
fn write_pointer_tables(
    w: &mut impl Write,
    table: &str,
    label: &str,
    count: usize,
) -> io::Result<()> {
    for (suffix, op) in [("low", '<'), ("high", '>')] {
        writeln!(w, "{}_{}:", table, suffix)?;
        for i in 0..count {
            writeln!(w, ".byte {}{}_{:02X}", op, label, i)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
