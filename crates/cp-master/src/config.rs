//! Run configuration (`chippack.toml`).

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::BatchError;

/// Default config file name.
pub const CONFIG_FILE: &str = "chippack.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the `.ftm` sources live.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
}

/// Where text exports and generated artifacts go.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Assembler segment for the music data
    #[serde(default = "default_segment")]
    pub segment: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Tracker executable used to refresh text exports
    #[serde(default = "default_famitracker")]
    pub famitracker: PathBuf,
    /// Never re-export; use the text files already present
    #[serde(default)]
    pub skip: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("../output")
}

fn default_segment() -> String {
    "DATA".to_string()
}

fn default_famitracker() -> PathBuf {
    PathBuf::from("FamiTracker.exe")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            segment: default_segment(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            famitracker: default_famitracker(),
            skip: false,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, BatchError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(BatchError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&text).map_err(|source| BatchError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
