//! The run's error log: per-source sections of error text.

use std::fmt;

pub(crate) const LOAD_ERRORS: &str = "Load errors for";
pub(crate) const PACK_ERRORS: &str = "Packing errors for";
pub(crate) const TITLE_WARNINGS: &str = "Title warnings for";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSection {
    pub heading: &'static str,
    pub source: String,
    pub lines: Vec<String>,
}

/// Errors from every track in a run, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorLog {
    sections: Vec<LogSection>,
}

impl ErrorLog {
    /// Add a section. Nothing is added for an empty error list.
    pub fn add<E: fmt::Display>(&mut self, heading: &'static str, source: &str, errors: &[E]) {
        if errors.is_empty() {
            return;
        }
        self.sections.push(LogSection {
            heading,
            source: source.to_string(),
            lines: errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[LogSection] {
        &self.sections
    }

    /// Total number of reported errors.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.lines.len()).sum()
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "{}: {}", section.heading, section.source)?;
            for line in &section.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
