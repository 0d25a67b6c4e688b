//! Source discovery and text re-export.
//!
//! Songs are `music_00.ftm`, `music_01.ftm`, ... and effects are
//! `sfx_01.ftm`, ... (effect 0 is the built-in silent one). Numbering stops
//! at the first missing file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::BatchError;

/// Highest file number + 1 that discovery looks at.
pub const MAX_FILES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Music,
    Sfx,
}

impl SourceKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            SourceKind::Music => "music",
            SourceKind::Sfx => "sfx",
        }
    }

    pub const fn first_number(self) -> usize {
        match self {
            SourceKind::Music => 0,
            SourceKind::Sfx => 1,
        }
    }
}

/// One tracker source and where its text export goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub kind: SourceKind,
    pub number: usize,
    /// The `.ftm` module
    pub source: PathBuf,
    /// Its text export
    pub text: PathBuf,
    /// Exporter log
    pub log: PathBuf,
}

impl SourceFile {
    pub fn new(kind: SourceKind, number: usize, input_dir: &Path, output_dir: &Path) -> Self {
        let stem = format!("{}_{:02}", kind.prefix(), number);
        Self {
            kind,
            number,
            source: input_dir.join(format!("{}.ftm", stem)),
            text: output_dir.join(format!("{}.txt", stem)),
            log: output_dir.join(format!("{}_log.txt", stem)),
        }
    }

    /// True if the text export is missing or older than the source.
    pub fn needs_export(&self) -> io::Result<bool> {
        let text_time = match fs::metadata(&self.text) {
            Ok(meta) => meta.modified()?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e),
        };
        let source_time = fs::metadata(&self.source)?.modified()?;
        Ok(text_time < source_time)
    }
}

/// Numbered sources of one kind, stopping at the first gap.
pub fn discover(kind: SourceKind, input_dir: &Path, output_dir: &Path) -> Vec<SourceFile> {
    (kind.first_number()..MAX_FILES)
        .map(|n| SourceFile::new(kind, n, input_dir, output_dir))
        .take_while(|src| src.source.exists())
        .collect()
}

/// Produces a text export from a tracker module.
pub trait Exporter {
    /// Write the text export of `src.source` to `src.text`.
    fn export(&self, src: &SourceFile) -> Result<(), BatchError>;
}

/// Runs the FamiTracker executable in export mode.
pub struct FamiTracker {
    program: PathBuf,
}

impl FamiTracker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Exporter for FamiTracker {
    fn export(&self, src: &SourceFile) -> Result<(), BatchError> {
        let status = Command::new(&self.program)
            .arg(&src.source)
            .arg("-export")
            .arg(&src.text)
            .arg(&src.log)
            .status()
            .map_err(|source| BatchError::Export {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            // The previous export, if any, is still usable.
            warn!(source = %src.source.display(), %status, "exporter failed");
        }
        Ok(())
    }
}

/// Re-export `src` if its text is stale. Returns whether it exported.
pub fn refresh(src: &SourceFile, exporter: &dyn Exporter) -> Result<bool, BatchError> {
    let stale = src.needs_export().map_err(|source| BatchError::Read {
        path: src.source.clone(),
        source,
    })?;
    if !stale {
        return Ok(false);
    }
    exporter.export(src)?;
    info!(text = %src.text.display(), "exported to text");
    Ok(true)
}
