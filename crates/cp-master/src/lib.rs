//! Batch controller for chippack.
//!
//! Finds the tracker sources, keeps their text exports fresh, packs every
//! song and then every sound effect against one pool, and writes the
//! generated artifacts. Per-track problems are collected in an [`ErrorLog`]
//! and never stop the run.

mod config;
mod discover;
mod error;
mod ident;
mod log;
pub mod render;

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cp_formats::load_text;
use cp_pack::{pack_sfx, pack_song, PackedSong, Pool, PoolTables};
use tracing::{info, warn};

pub use config::{Config, ExportConfig, InputConfig, OutputConfig, CONFIG_FILE};
pub use discover::{discover, refresh, Exporter, FamiTracker, SourceFile, SourceKind, MAX_FILES};
pub use error::BatchError;
pub use ident::{sanitize_title, IdentSet, TitleWarning};
pub use log::{ErrorLog, LogSection};

/// Generated music include file.
pub const MUSIC_ASM: &str = "data_music.inc";
/// Generated enum include file.
pub const ENUMS_ASM: &str = "data_music_enums.inc";
/// Generated statistics report.
pub const STATS_FILE: &str = "music_stats.txt";

/// Every song's title identifier next to its packed data.
#[derive(Clone, Debug)]
pub struct SongEntry {
    pub ident: String,
    pub song: PackedSong,
}

/// Everything a run produced, ready to render.
#[derive(Clone, Debug)]
pub struct PackedSet {
    pub tables: PoolTables,
    pub songs: Vec<SongEntry>,
    /// Identifier per sound effect, parallel to `tables.sfx`
    pub sfx_idents: Vec<String>,
    pub log: ErrorLog,
}

/// Accumulates songs then sound effects into one pool.
pub struct Batch {
    pool: Pool,
    songs: Vec<SongEntry>,
    sfx_idents: Vec<String>,
    music_names: IdentSet,
    sound_names: IdentSet,
    log: ErrorLog,
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

fn record<E: Display>(log: &mut ErrorLog, heading: &'static str, source: &str, errors: &[E]) {
    for e in errors {
        warn!(source, "{}", e);
    }
    log.add(heading, source, errors);
}

impl Batch {
    pub fn new() -> Self {
        let pool = Pool::new();
        let mut sound_names = IdentSet::new();
        let sfx_idents = pool
            .sfx()
            .iter()
            .enumerate()
            .map(|(i, entry)| sound_names.assign(&entry.title, i).0)
            .collect();
        Self {
            pool,
            songs: Vec::new(),
            sfx_idents,
            music_names: IdentSet::new(),
            sound_names,
            log: ErrorLog::default(),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// Import and pack a song from export text. `source` names it in the
    /// error log. Returns the song number.
    pub fn add_song_text(&mut self, source: &str, text: &str) -> usize {
        let loaded = load_text(text, 1);
        record(&mut self.log, log::LOAD_ERRORS, source, &loaded.errors);
        let track = loaded.value;

        let packed = pack_song(&mut self.pool, &track);
        record(&mut self.log, log::PACK_ERRORS, source, &packed.errors);

        let index = self.songs.len();
        let (ident, warnings) = self.music_names.assign(&track.title, index);
        record(&mut self.log, log::TITLE_WARNINGS, source, &warnings);
        info!(source, ident = %ident, frames = packed.value.order.len(), "packed song");

        self.songs.push(SongEntry {
            ident,
            song: packed.value,
        });
        index
    }

    /// Import and pack a sound effect from export text. Returns its ID.
    pub fn add_sfx_text(&mut self, source: &str, text: &str) -> usize {
        let loaded = load_text(text, 1);
        record(&mut self.log, log::LOAD_ERRORS, source, &loaded.errors);
        let track = loaded.value;

        let packed = pack_sfx(&track);
        record(&mut self.log, log::PACK_ERRORS, source, &packed.errors);

        let index = self.pool.push_sfx(&track.title, packed.value);
        let (ident, warnings) = self.sound_names.assign(&track.title, index);
        record(&mut self.log, log::TITLE_WARNINGS, source, &warnings);
        info!(source, ident = %ident, "packed sound effect");

        self.sfx_idents.push(ident);
        index
    }

    fn add_text(&mut self, kind: SourceKind, source: &str, text: &str) -> usize {
        match kind {
            SourceKind::Music => self.add_song_text(source, text),
            SourceKind::Sfx => self.add_sfx_text(source, text),
        }
    }

    /// Read a text export from disk and add it.
    pub fn add_file(&mut self, kind: SourceKind, path: &Path) -> Result<usize, BatchError> {
        let text = fs::read_to_string(path).map_err(|source| BatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.add_text(kind, &path.display().to_string(), &text))
    }

    /// Discover, re-export as needed, and pack every source the config
    /// points at. Songs are packed before sound effects.
    ///
    /// A text export that cannot be read is logged and skipped; only
    /// failures that affect the whole run are returned.
    pub fn run(&mut self, config: &Config, exporter: &dyn Exporter) -> Result<(), BatchError> {
        fs::create_dir_all(&config.output.dir).map_err(|source| BatchError::Write {
            path: config.output.dir.clone(),
            source,
        })?;
        for kind in [SourceKind::Music, SourceKind::Sfx] {
            for src in discover(kind, &config.input.dir, &config.output.dir) {
                info!(source = %src.source.display(), "processing");
                if !config.export.skip {
                    refresh(&src, exporter)?;
                }
                let label = src.text.display().to_string();
                match fs::read_to_string(&src.text) {
                    Ok(text) => {
                        self.add_text(kind, &label, &text);
                    }
                    Err(e) => {
                        let error = format!("failed to read text export: {}", e);
                        record(&mut self.log, log::LOAD_ERRORS, &label, &[error]);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn finish(self) -> PackedSet {
        PackedSet {
            tables: self.pool.finalize(),
            songs: self.songs,
            sfx_idents: self.sfx_idents,
            log: self.log,
        }
    }
}

fn write_file(
    path: PathBuf,
    body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<PathBuf, BatchError> {
    let wrap = |source| BatchError::Write {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(wrap)?;
    let mut w = BufWriter::new(file);
    body(&mut w).map_err(wrap)?;
    w.flush().map_err(wrap)?;
    info!(path = %path.display(), "wrote");
    Ok(path)
}

/// Write the three artifacts into `dir`, creating it if needed.
pub fn write_artifacts(set: &PackedSet, dir: &Path, segment: &str) -> Result<Vec<PathBuf>, BatchError> {
    fs::create_dir_all(dir).map_err(|source| BatchError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(vec![
        write_file(dir.join(MUSIC_ASM), |w| render::write_music_asm(w, set, segment))?,
        write_file(dir.join(ENUMS_ASM), |w| render::write_enums_asm(w, set))?,
        write_file(dir.join(STATS_FILE), |w| render::write_stats(w, set))?,
    ])
}
