//! Lookup tables shared with the playback driver.
//!
//! Both tables are pure functions of their index, so they are computed here
//! rather than stored in the data files.

/// CPU clock of an NTSC 2A03 in Hz.
pub const CPU_CLOCK_HZ: f64 = 1_789_772.0;

/// Largest value the 11-bit pulse/triangle timer accepts.
pub const PERIOD_MAX: u16 = 0x7FF;

/// Entries in the tuning table: eight octaves from C-0.
pub const TUNING_LEN: usize = 96;

/// Index of A-3 (440 Hz) in the tuning table.
pub const A440_INDEX: usize = 45;

/// Highest value of a volume operand.
pub const VOLUME_MAX: u8 = 15;

/// Timer period for note `index`, where index 0 is C-0.
pub fn note_period(index: usize) -> u16 {
    let semitones = index as f64 - A440_INDEX as f64;
    let freq = 440.0 * libm::pow(2.0, semitones / 12.0);
    let period = libm::trunc(CPU_CLOCK_HZ / (16.0 * freq) - 0.5);
    if period >= PERIOD_MAX as f64 {
        PERIOD_MAX
    } else if period <= 0.0 {
        0
    } else {
        period as u16
    }
}

/// All timer periods, C-0 first.
pub fn tuning_table() -> [u16; TUNING_LEN] {
    let mut table = [0u16; TUNING_LEN];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = note_period(i);
    }
    table
}

/// Scale volume `a` by volume `b`.
///
/// Rounds down, except that two audible operands never produce silence.
pub const fn multiply(a: u8, b: u8) -> u8 {
    let product = (a as u16 * b as u16) / VOLUME_MAX as u16;
    if product == 0 && a != 0 && b != 0 {
        1
    } else {
        product as u8
    }
}

/// Volume multiply table, row-major by `a`: 16x16 entries.
pub fn multiply_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    for a in 0..16u8 {
        for b in 0..16u8 {
            table[a as usize * 16 + b as usize] = multiply(a, b);
        }
    }
    table
}
