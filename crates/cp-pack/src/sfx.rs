//! Sound effect encoder.

use arrayvec::ArrayVec;
use cp_ir::{Channel, Diagnosed, Note, Track};

use crate::error::{PackError, RowLocation};
use crate::pattern::note_token;
use crate::skip::SkipWriter;
use crate::tokens::{HALT, SFX_DUTY0, SFX_VOL0};

/// Which channel a sound effect plays on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SfxMode {
    #[default]
    Square = 0,
    Noise = 1,
}

impl SfxMode {
    /// Source channel in the export.
    pub const fn channel(self) -> Channel {
        match self {
            SfxMode::Square => Channel::Pulse1,
            SfxMode::Noise => Channel::Noise,
        }
    }

    /// Valid bits of a `Vxx` parameter on this channel.
    pub const fn duty_mask(self) -> u8 {
        match self {
            SfxMode::Square => 0x03,
            SfxMode::Noise => 0x01,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// A packed sound effect stream, always ending in [`HALT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedSfx {
    pub bytes: Vec<u8>,
    pub mode: SfxMode,
}

/// Encode a sound effect from pattern 0 of pulse 1 or, failing that, noise.
///
/// Scanning stops at the first note cut. Tokens on the cut row are kept;
/// a skip still pending at that point is dropped.
pub fn pack_sfx(track: &Track) -> Diagnosed<PackedSfx, PackError> {
    let mut out = Diagnosed::new(PackedSfx {
        bytes: vec![HALT],
        mode: SfxMode::Square,
    });
    if track.speed != 1 {
        out.push(PackError::SfxSpeed { speed: track.speed });
    }

    let Some(mode) = [SfxMode::Square, SfxMode::Noise]
        .into_iter()
        .find(|m| track.cell(m.channel(), 0, 0).note.is_some())
    else {
        out.push(PackError::SfxNoNote);
        return out;
    };
    let channel = mode.channel();

    let mut writer = SkipWriter::new();
    let mut last_volume = None;
    let mut halted = false;
    for row in 0..track.pattern_length {
        let at = RowLocation::new(channel, 0, row);
        let cell = track.cell(channel, 0, row);
        let mut tokens = ArrayVec::<u8, 8>::new();

        for &effect in &cell.effects {
            match effect.code {
                b'V' => tokens.push(SFX_DUTY0 + (effect.param & mode.duty_mask())),
                _ => out.errors.push(PackError::UnknownEffect { at, effect }),
            }
        }
        if let Some(volume) = cell.volume {
            if last_volume != Some(volume) {
                last_volume = Some(volume);
                tokens.push(SFX_VOL0 + volume);
            }
        }

        let mut onset = false;
        if cell.note == Note::Halt {
            halted = true;
            onset = true;
        } else if let Some(pitch) = note_token(cell.note, at, &mut out.errors) {
            tokens.push(pitch);
            onset = true;
        }

        if tokens.is_empty() {
            writer.silent_row();
        } else if let Err(overflow) = writer.write_row(&tokens, onset) {
            out.errors.push(PackError::TooManySkips {
                at,
                rows: overflow.rows,
            });
        }
        if halted {
            break;
        }
    }

    if !halted {
        out.push(PackError::SfxNoHalt);
    }
    let mut bytes = writer.into_bytes();
    bytes.push(HALT);
    out.value = PackedSfx { bytes, mode };
    out
}
