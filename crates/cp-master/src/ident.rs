//! Assembler identifiers from track titles.

use std::collections::HashSet;

use thiserror::Error;

/// A title that could not be used as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TitleWarning {
    #[error("title {title:?} renamed to {ident}")]
    Sanitized { title: String, ident: String },

    #[error("duplicate name {ident} renamed to {renamed}")]
    Duplicate { ident: String, renamed: String },
}

/// Upper-case a title and replace anything an assembler symbol cannot hold.
///
/// Characters outside `[A-Z0-9_]` become `_`, a leading digit gets a `_`
/// prefix and an empty title becomes `UNTITLED`.
pub fn sanitize_title(title: &str) -> String {
    let mut ident: String = title
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("UNTITLED");
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Hands out unique identifiers within one enum.
#[derive(Debug, Default)]
pub struct IdentSet {
    seen: HashSet<String>,
}

impl IdentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for entry `index` titled `title`, plus any renames made.
    pub fn assign(&mut self, title: &str, index: usize) -> (String, Vec<TitleWarning>) {
        let mut warnings = Vec::new();
        let mut ident = sanitize_title(title);
        if ident != title.to_uppercase() {
            warnings.push(TitleWarning::Sanitized {
                title: title.to_string(),
                ident: ident.clone(),
            });
        }
        if self.seen.contains(&ident) {
            let mut renamed = format!("{}_{}", ident, index);
            while self.seen.contains(&renamed) {
                renamed.push('_');
            }
            warnings.push(TitleWarning::Duplicate {
                ident,
                renamed: renamed.clone(),
            });
            ident = renamed;
        }
        self.seen.insert(ident.clone());
        (ident, warnings)
    }
}
