use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run. Problems inside a track are never this; they
/// go to the error log instead.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run exporter {}", program.display())]
    Export {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
