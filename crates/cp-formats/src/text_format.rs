//! FamiTracker text export importer.
//!
//! The export is line oriented: the first whitespace-separated token names
//! the record kind. Each line is decoded once into a [`Record`] and then
//! applied to the track being built.

use cp_ir::{
    Cell, Channel, Diagnosed, Frame, Instrument, Macro, MacroKind, Track, CHANNEL_COUNT,
    LOOP_SENTINEL, MACRO_KIND_COUNT, MAX_MACRO_LEN, MAX_ROWS,
};
use tracing::debug;

use crate::cell_parser::parse_cell;
use crate::FormatError;

/// The only tempo the driver plays at.
pub const REQUIRED_TEMPO: u16 = 150;

/// One decoded line of an export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// `TITLE "<string>"`
    Title(String),
    /// `MACRO <type> <index> <loop> <release> <mode> : <values>`
    Macro {
        kind: MacroKind,
        index: u8,
        loop_point: i32,
        release: i32,
        mode: i32,
        values: Vec<i8>,
    },
    /// `INST2A03 <index> <m0> <m1> <m2> <m3> <m4> "<name>"`
    Instrument {
        index: u8,
        macros: [Option<u8>; MACRO_KIND_COUNT],
        name: String,
    },
    /// `TRACK <pattern_len> <speed> <tempo> "<name>"`
    TrackHeader {
        pattern_length: u16,
        speed: u8,
        tempo: u16,
        name: String,
    },
    /// `ORDER <frame> : <c0> <c1> <c2> <c3> <c4>`
    Order { frame: u8, slots: Frame },
    /// `PATTERN <slot>`
    PatternSelect(u8),
    /// `ROW <row> : <ch0> : <ch1> : <ch2> : <ch3> : <ch4>`
    Row {
        row: u16,
        cells: [Cell; CHANNEL_COUNT],
        /// Note columns that could not be read, by channel
        unknown_notes: Vec<(Channel, String)>,
    },
}

/// Text between the first and last double quote on a line.
fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let end = line.rfind('"')?;
    (end >= start).then(|| &line[start..end])
}

fn hex_u8(text: &str) -> Option<u8> {
    u8::from_str_radix(text, 16).ok()
}

fn decode_macro(fields: &[&str]) -> Option<Record> {
    if fields.len() < 6 {
        return None;
    }
    let kind = MacroKind::from_index(fields[1].parse().ok()?)?;
    let index = fields[2].parse().ok()?;
    let loop_point = fields[3].parse().ok()?;
    let release = fields[4].parse().ok()?;
    let mode = fields[5].parse().ok()?;

    let values = match fields.get(6) {
        None => &[][..],
        Some(&":") => &fields[7..],
        Some(count) => {
            let count: usize = count.parse().ok()?;
            let values = &fields[7..];
            if values.len() != count {
                return None;
            }
            values
        }
    };
    let values = values
        .iter()
        .map(|v| v.parse::<i8>().ok())
        .collect::<Option<Vec<_>>>()?;

    Some(Record::Macro {
        kind,
        index,
        loop_point,
        release,
        mode,
        values,
    })
}

fn decode_instrument(line: &str, fields: &[&str]) -> Option<Record> {
    if fields.len() < 8 {
        return None;
    }
    let index = fields[1].parse().ok()?;
    let mut macros = [None; MACRO_KIND_COUNT];
    for (slot, text) in macros.iter_mut().zip(&fields[2..7]) {
        let value: i16 = text.parse().ok()?;
        if value >= 0 {
            *slot = Some(u8::try_from(value).ok()?);
        }
    }
    let name = quoted(line)?.to_string();
    Some(Record::Instrument {
        index,
        macros,
        name,
    })
}

fn decode_track_header(line: &str, fields: &[&str]) -> Option<Record> {
    if fields.len() < 4 {
        return None;
    }
    let pattern_length: u16 = fields[1].parse().ok()?;
    if pattern_length == 0 || pattern_length > MAX_ROWS {
        return None;
    }
    Some(Record::TrackHeader {
        pattern_length,
        speed: fields[2].parse().ok()?,
        tempo: fields[3].parse().ok()?,
        name: quoted(line).unwrap_or_default().to_string(),
    })
}

fn decode_order(fields: &[&str]) -> Option<Record> {
    if fields.len() != 3 + CHANNEL_COUNT || fields[2] != ":" {
        return None;
    }
    let frame = hex_u8(fields[1])?;
    let mut slots = [0u8; CHANNEL_COUNT];
    for (slot, text) in slots.iter_mut().zip(&fields[3..]) {
        *slot = hex_u8(text)?;
    }
    Some(Record::Order { frame, slots })
}

fn decode_row(fields: &[&str]) -> Option<Record> {
    if fields.len() < 3 || fields[2] != ":" {
        return None;
    }
    let row = u16::from_str_radix(fields[1], 16).ok()?;

    let groups: Vec<&[&str]> = fields[3..].split(|t| *t == ":").collect();
    if groups.len() != CHANNEL_COUNT {
        return None;
    }
    let mut cells = Vec::with_capacity(CHANNEL_COUNT);
    let mut unknown_notes = Vec::new();
    for (channel, tokens) in Channel::ALL.into_iter().zip(groups) {
        let parsed = parse_cell(tokens, channel)?;
        if let Some(text) = parsed.unknown_note {
            unknown_notes.push((channel, text));
        }
        cells.push(parsed.cell);
    }

    Some(Record::Row {
        row,
        cells: cells.try_into().ok()?,
        unknown_notes,
    })
}

/// Decode one line.
///
/// Blank lines, comments and record kinds the packer has no use for
/// (`AUTHOR`, `COLUMNS`, `DPCMDEF`, ...) decode to `Ok(None)`.
pub fn decode_record(line_no: usize, line: &str) -> Result<Option<Record>, FormatError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some(&kind) = fields.first() else {
        return Ok(None);
    };

    let (name, record) = match kind {
        "TITLE" => ("TITLE", quoted(line).map(|t| Record::Title(t.to_string()))),
        "MACRO" => ("MACRO", decode_macro(&fields)),
        "INST2A03" => ("INST2A03", decode_instrument(line, &fields)),
        "TRACK" => ("TRACK", decode_track_header(line, &fields)),
        "ORDER" => ("ORDER", decode_order(&fields)),
        "PATTERN" => (
            "PATTERN",
            fields.get(1).and_then(|t| hex_u8(t)).map(Record::PatternSelect),
        ),
        "ROW" => ("ROW", decode_row(&fields)),
        _ => return Ok(None),
    };

    record.map(Some).ok_or(FormatError::Malformed {
        line: line_no,
        record: name,
    })
}

/// Records that belong to a track section rather than the whole file.
fn is_track_scoped(kind: &str) -> bool {
    matches!(kind, "ORDER" | "PATTERN" | "ROW")
}

/// Import track number `track` (1-based) from an export.
///
/// Macros and instruments are shared by every track in a file and are
/// always read. Errors never stop the import; the returned track holds
/// everything that could be read.
pub fn load_text(text: &str, track: usize) -> Diagnosed<Track, FormatError> {
    let mut out = Diagnosed::new(Track::default());
    let mut tracks_seen = 0usize;
    let mut title_seen = false;
    let mut slot = 0u8;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let Some(kind) = line.split_whitespace().next() else {
            continue;
        };
        if is_track_scoped(kind) && tracks_seen != track {
            continue;
        }

        let record = match decode_record(line_no, line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                debug!(line = line_no, error = %e, "skipping record");
                out.push(e);
                continue;
            }
        };
        debug!(line = line_no, kind, "record");

        let dest = &mut out.value;
        match record {
            Record::Title(title) => {
                dest.title = title;
                title_seen = true;
            }
            Record::Macro {
                kind,
                index,
                loop_point,
                release,
                mode,
                mut values,
            } => {
                if release != -1 {
                    out.errors.push(FormatError::MacroRelease {
                        line: line_no,
                        kind,
                        index,
                    });
                }
                if mode != 0 {
                    out.errors.push(FormatError::MacroMode {
                        line: line_no,
                        kind,
                        index,
                    });
                }
                if values.contains(&LOOP_SENTINEL) {
                    out.errors.push(FormatError::MacroSentinel {
                        line: line_no,
                        kind,
                        index,
                    });
                    continue;
                }
                if values.len() > MAX_MACRO_LEN {
                    out.errors.push(FormatError::MacroLength {
                        line: line_no,
                        kind,
                        index,
                        len: values.len(),
                        max: MAX_MACRO_LEN,
                    });
                    values.truncate(MAX_MACRO_LEN);
                }
                let loop_point = match u8::try_from(loop_point) {
                    Ok(point) if (point as usize) < values.len() => Some(point),
                    _ if loop_point < 0 => None,
                    _ => {
                        out.errors.push(FormatError::MacroLoop {
                            line: line_no,
                            kind,
                            index,
                            loop_point,
                        });
                        None
                    }
                };
                dest.set_macro(
                    kind,
                    index as usize,
                    Macro::from_authored(kind, values, loop_point),
                );
            }
            Record::Instrument {
                index,
                macros,
                name,
            } => {
                dest.set_instrument(index as usize, Instrument { name, macros });
            }
            Record::TrackHeader {
                pattern_length,
                speed,
                tempo,
                name,
            } => {
                tracks_seen += 1;
                if tracks_seen != track {
                    continue;
                }
                debug!(track, name = %name, pattern_length, speed, "track selected");
                dest.pattern_length = pattern_length;
                dest.speed = speed;
                dest.tempo = tempo;
                if tempo != REQUIRED_TEMPO {
                    out.errors.push(FormatError::Tempo {
                        line: line_no,
                        tempo,
                        expected: REQUIRED_TEMPO,
                    });
                }
            }
            Record::Order { frame, slots } => dest.set_frame(frame as usize, slots),
            Record::PatternSelect(s) => slot = s,
            Record::Row {
                row,
                cells,
                unknown_notes,
            } => {
                for (channel, text) in unknown_notes {
                    out.errors.push(FormatError::UnknownNote {
                        line: line_no,
                        channel,
                        text,
                    });
                }
                let pattern = dest.pattern_mut(slot);
                if row >= pattern.rows {
                    out.errors.push(FormatError::RowOutOfRange {
                        line: line_no,
                        row,
                        rows: pattern.rows,
                    });
                    continue;
                }
                for (channel, cell) in Channel::ALL.into_iter().zip(cells) {
                    *pattern.cell_mut(row, channel) = cell;
                }
            }
        }
    }

    if !title_seen {
        out.push(FormatError::MissingTitle);
    }
    if tracks_seen < track {
        out.push(FormatError::TrackNotFound { track });
    }
    out
}
