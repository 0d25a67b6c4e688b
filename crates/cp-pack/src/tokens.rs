//! Byte-code token values understood by the driver.
//!
//! Bytes below [`HALT`] are skip counts. Bytes from `HALT + 1` up to the
//! volume range are note pitches.

/// Note cut; also the base of the pitch range.
pub const HALT: u8 = 0x80;

/// Volume 0; volumes 1-15 follow.
pub const VOL0: u8 = 0xE0;
/// Instrument change, followed by a global instrument index.
pub const INST: u8 = 0xF0;
/// Loop point (`Bxx`), followed by the frame to loop to.
pub const B_XX: u8 = 0xF1;
/// Pattern break (`D00`).
pub const D_00: u8 = 0xF2;
/// Speed change (`Fxx`), followed by the new speed.
pub const F_XX: u8 = 0xF3;
/// Note delay (`Gxx`). Reserved; not produced by the encoder.
pub const G_XX: u8 = 0xF4;
/// Fine pitch (`Pxx`). Reserved; not produced by the encoder.
pub const P_XX: u8 = 0xF5;
/// Portamento (`3xx`). Reserved; not produced by the encoder.
pub const E_XX: u8 = 0xF6;

/// Sound effect volume 0; volumes 1-15 follow.
pub const SFX_VOL0: u8 = 0xE0;
/// Sound effect duty 0; duties 1-3 follow.
pub const SFX_DUTY0: u8 = 0xF0;

/// Largest skip count a single byte can hold.
pub const SKIP_MAX: u8 = 0x7F;

const VOLUME_NAMES: [&str; 16] = [
    "VOL0", "VOL1", "VOL2", "VOL3", "VOL4", "VOL5", "VOL6", "VOL7", "VOL8", "VOL9", "VOLA",
    "VOLB", "VOLC", "VOLD", "VOLE", "VOLF",
];

const SFX_VOLUME_NAMES: [&str; 16] = [
    "SVL0", "SVL1", "SVL2", "SVL3", "SVL4", "SVL5", "SVL6", "SVL7", "SVL8", "SVL9", "SVLA",
    "SVLB", "SVLC", "SVLD", "SVLE", "SVLF",
];

const SFX_DUTY_NAMES: [&str; 4] = ["SDT0", "SDT1", "SDT2", "SDT3"];

/// Symbolic name of a pattern token, if the byte has one.
pub fn pattern_token_name(byte: u8) -> Option<&'static str> {
    match byte {
        HALT => Some("HALT"),
        B_XX => Some("B_XX"),
        D_00 => Some("D_00"),
        F_XX => Some("F_XX"),
        G_XX => Some("G_XX"),
        P_XX => Some("P_XX"),
        E_XX => Some("E_XX"),
        INST => Some("INST"),
        b if (VOL0..VOL0 + 16).contains(&b) => Some(VOLUME_NAMES[(b - VOL0) as usize]),
        _ => None,
    }
}

/// Symbolic name of a sound effect token, if the byte has one.
pub fn sfx_token_name(byte: u8) -> Option<&'static str> {
    match byte {
        HALT => Some("SHLT"),
        b if (SFX_VOL0..SFX_VOL0 + 16).contains(&b) => {
            Some(SFX_VOLUME_NAMES[(b - SFX_VOL0) as usize])
        }
        b if (SFX_DUTY0..SFX_DUTY0 + 4).contains(&b) => {
            Some(SFX_DUTY_NAMES[(b - SFX_DUTY0) as usize])
        }
        _ => None,
    }
}

/// Every named pattern token, in declaration order.
pub fn pattern_tokens() -> impl Iterator<Item = (&'static str, u8)> {
    [HALT, B_XX, D_00, F_XX, G_XX, P_XX, E_XX, INST]
        .into_iter()
        .chain(VOL0..VOL0 + 16)
        .filter_map(|b| pattern_token_name(b).map(|name| (name, b)))
}

/// Every named sound effect token, in declaration order.
pub fn sfx_tokens() -> impl Iterator<Item = (&'static str, u8)> {
    core::iter::once(HALT)
        .chain(SFX_VOL0..SFX_VOL0 + 16)
        .chain(SFX_DUTY0..SFX_DUTY0 + 4)
        .filter_map(|b| sfx_token_name(b).map(|name| (name, b)))
}

/// Pitch token for a melodic note.
pub const fn tone_pitch(octave: u8, semitone: u8) -> u16 {
    HALT as u16 + 1 + semitone as u16 + 12 * octave as u16
}

/// Pitch token for a noise period class.
pub const fn noise_pitch(class: u8) -> u16 {
    HALT as u16 + 1 + class as u16
}
