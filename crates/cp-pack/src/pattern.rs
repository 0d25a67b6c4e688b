//! Pattern byte-code encoder.

use arrayvec::ArrayVec;
use cp_ir::{Cell, Channel, Diagnosed, Note, Track};

use crate::error::{PackError, RowLocation};
use crate::skip::SkipWriter;
use crate::tokens::{noise_pitch, tone_pitch, B_XX, D_00, F_XX, HALT, INST, VOL0};

/// Most tokens one row can produce: four two-byte effects, a volume, an
/// instrument change and a note.
const ROW_TOKENS_MAX: usize = 12;

type RowTokens = ArrayVec<u8, ROW_TOKENS_MAX>;

/// One channel's pattern as byte-code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPattern {
    pub bytes: Vec<u8>,
    /// Number of loop markers (`Bxx`) found
    pub loop_markers: usize,
}

/// Pitch token for a note, or `None` if the note has none.
///
/// Reports notes the driver cannot play.
pub(crate) fn note_token(note: Note, at: RowLocation, errors: &mut Vec<PackError>) -> Option<u8> {
    let pitch = match note {
        Note::None => return None,
        Note::Halt => return Some(HALT),
        Note::Release => {
            errors.push(PackError::Release(at));
            return None;
        }
        Note::Tone { octave, semitone } => tone_pitch(octave, semitone),
        Note::Noise(class) => noise_pitch(class),
    };
    if pitch >= VOL0 as u16 {
        errors.push(PackError::NoteOutOfRange { at, note });
        return None;
    }
    Some(pitch as u8)
}

/// Per-pattern encoder state. Instrument and volume start unset so the
/// first value in a pattern is always written.
struct PatternEncoder<'a> {
    instrument_map: &'a [u8],
    last_volume: Option<u8>,
    last_instrument: Option<u8>,
    loop_markers: usize,
}

impl PatternEncoder<'_> {
    fn encode_row(&mut self, cell: &Cell, at: RowLocation, errors: &mut Vec<PackError>) -> (RowTokens, bool) {
        let mut tokens = RowTokens::new();

        for &effect in &cell.effects {
            match effect.code {
                b'B' => {
                    tokens.push(B_XX);
                    tokens.push(effect.param);
                    self.loop_markers += 1;
                    if self.loop_markers > 1 {
                        errors.push(PackError::DuplicateLoop(at));
                    }
                }
                b'D' => {
                    tokens.push(D_00);
                    if effect.param != 0 {
                        errors.push(PackError::NonZeroParam { at, effect });
                    }
                }
                b'F' => {
                    tokens.push(F_XX);
                    tokens.push(effect.param);
                }
                _ => errors.push(PackError::UnknownEffect { at, effect }),
            }
        }

        if let Some(volume) = cell.volume {
            if self.last_volume != Some(volume) {
                self.last_volume = Some(volume);
                tokens.push(VOL0 + volume);
            }
        }

        if let Some(local) = cell.instrument {
            if self.last_instrument != Some(local) {
                match self.instrument_map.get(local as usize) {
                    Some(&global) => {
                        self.last_instrument = Some(local);
                        tokens.push(INST);
                        tokens.push(global);
                    }
                    None => errors.push(PackError::UnknownInstrument {
                        at,
                        instrument: local,
                    }),
                }
            }
        }

        let pitch = note_token(cell.note, at, errors);
        if let Some(pitch) = pitch {
            tokens.push(pitch);
        }
        (tokens, pitch.is_some())
    }
}

/// Encode one (channel, slot) of a track.
///
/// `instrument_map` maps local instrument numbers to global instrument
/// bytes.
pub fn encode_pattern(
    track: &Track,
    instrument_map: &[u8],
    channel: Channel,
    slot: u8,
) -> Diagnosed<EncodedPattern, PackError> {
    let mut errors = Vec::new();
    let mut encoder = PatternEncoder {
        instrument_map,
        last_volume: None,
        last_instrument: None,
        loop_markers: 0,
    };
    let mut writer = SkipWriter::new();

    for row in 0..track.pattern_length {
        let at = RowLocation::new(channel, slot, row);
        let (tokens, onset) = encoder.encode_row(track.cell(channel, slot, row), at, &mut errors);
        if tokens.is_empty() {
            writer.silent_row();
        } else if let Err(overflow) = writer.write_row(&tokens, onset) {
            errors.push(PackError::TooManySkips {
                at,
                rows: overflow.rows,
            });
        }
    }

    let (bytes, result) = writer.finish();
    if let Err(overflow) = result {
        errors.push(PackError::TooManySkipsAtEnd {
            channel,
            pattern: slot,
            rows: overflow.rows,
        });
    }

    Diagnosed {
        value: EncodedPattern {
            bytes,
            loop_markers: encoder.loop_markers,
        },
        errors,
    }
}
